use std::{path::Path, sync::Arc};

use models::{bildirim::Bildirim, firma::Firma, personel::Personel, rol::Rol, siparis::Siparis,
    stok::StokHareket, tedarikci::Tedarikci, urun::Urun};

use super::{json_store::JsonFileStore, Collection, DocumentStore};
use crate::errors::ServiceError;

/// Every collection the application persists, in setup order.
pub const COLLECTIONS: [&str; 8] = [
    models::firma::COLLECTION,
    models::personel::COLLECTION,
    models::tedarikci::COLLECTION,
    models::urun::COLLECTION,
    models::siparis::COLLECTION,
    models::stok::COLLECTION,
    models::rol::COLLECTION,
    models::bildirim::COLLECTION,
];

/// Typed handle over the document store, one [`Collection`] per entity.
///
/// Cloning is cheap; all clones share the same underlying store.
#[derive(Clone)]
pub struct DepoStore {
    raw: Arc<dyn DocumentStore>,
    pub firmalar: Collection<Firma>,
    pub personeller: Collection<Personel>,
    pub tedarikciler: Collection<Tedarikci>,
    pub urunler: Collection<Urun>,
    pub siparisler: Collection<Siparis>,
    pub hareketler: Collection<StokHareket>,
    pub roller: Collection<Rol>,
    pub bildirimler: Collection<Bildirim>,
}

impl DepoStore {
    /// Open the default file-backed store under `data_dir`.
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, ServiceError> {
        let raw = JsonFileStore::open(data_dir.as_ref()).await?;
        Ok(Self::with_store(raw))
    }

    /// Wrap an already-built store implementation.
    pub fn with_store(raw: Arc<dyn DocumentStore>) -> Self {
        Self {
            firmalar: Collection::new(raw.clone(), models::firma::COLLECTION),
            personeller: Collection::new(raw.clone(), models::personel::COLLECTION),
            tedarikciler: Collection::new(raw.clone(), models::tedarikci::COLLECTION),
            urunler: Collection::new(raw.clone(), models::urun::COLLECTION),
            siparisler: Collection::new(raw.clone(), models::siparis::COLLECTION),
            hareketler: Collection::new(raw.clone(), models::stok::COLLECTION),
            roller: Collection::new(raw.clone(), models::rol::COLLECTION),
            bildirimler: Collection::new(raw.clone(), models::bildirim::COLLECTION),
            raw,
        }
    }

    /// Access the untyped store, mainly for setup and diagnostics.
    pub fn raw(&self) -> &Arc<dyn DocumentStore> {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::firma::YeniFirma;

    #[tokio::test]
    async fn typed_collections_round_trip() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("depo_store_{}", uuid::Uuid::new_v4()));
        let store = DepoStore::open(&dir).await?;

        let firma = models::firma::Firma::create(YeniFirma {
            firma_ad: Some("Acme".into()),
            firma_vergi_no: Some("1234567890".into()),
            firma_telefon: Some("05551234567".into()),
            ..Default::default()
        })?;
        store.firmalar.insert(&firma.firma_id, &firma).await?;

        let loaded = store.firmalar.get(&firma.firma_id).await?;
        assert_eq!(loaded.map(|f| f.firma_ad), Some("Acme".to_string()));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
