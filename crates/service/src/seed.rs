use models::rol::{Rol, YeniRol, TAM_YETKI};
use tracing::info;

use crate::{
    errors::ServiceError,
    storage::depo::{DepoStore, COLLECTIONS},
};

/// Roles created on first run. Existing roles are never touched.
const VARSAYILAN_ROLLER: [(&str, &[&str]); 2] = [
    ("yonetici", &[TAM_YETKI]),
    ("kullanici", &["stok_goruntuleme", "siparis_goruntuleme"]),
];

/// Makes sure every collection file exists and the default roles are present.
///
/// Safe to call repeatedly.
pub async fn setup_database(store: &DepoStore) -> Result<(), ServiceError> {
    for collection in COLLECTIONS {
        store.raw().ensure_collection(collection).await?;
    }

    for (rol_adi, yetkiler) in VARSAYILAN_ROLLER {
        if store.roller.exists_eq("rol_adi", rol_adi).await? {
            continue;
        }
        let rol = Rol::create(YeniRol {
            rol_adi: Some(rol_adi.to_string()),
            yetkiler: Some(yetkiler.iter().map(|y| y.to_string()).collect()),
        })?;
        store.roller.insert(&rol.rol_id, &rol).await?;
        info!(rol_adi, "varsayilan_rol_olusturuldu");
    }

    info!("veritabani_hazir");
    Ok(())
}
