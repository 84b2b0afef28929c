use models::rol::{Rol, YeniRol};

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Create a role with its permission list.
pub async fn create_rol(store: &DepoStore, input: YeniRol) -> Result<Rol, ServiceError> {
    let rol = Rol::create(input)?;
    if store.roller.exists_eq("rol_adi", &rol.rol_adi).await? {
        return Err(ServiceError::Conflict("Bu rol adı zaten kullanılmaktadır".into()));
    }
    store.roller.insert(&rol.rol_id, &rol).await?;
    Ok(rol)
}

/// List roles alphabetically by name.
pub async fn list_roller(store: &DepoStore) -> Result<Vec<Rol>, ServiceError> {
    let mut roller = store.roller.list().await?;
    roller.sort_by(|a, b| a.rol_adi.cmp(&b.rol_adi));
    Ok(roller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store;

    fn depocu() -> YeniRol {
        YeniRol {
            rol_adi: Some("depocu".into()),
            yetkiler: Some(vec!["stok_goruntuleme".into(), "stok_ekleme".into()]),
        }
    }

    #[tokio::test]
    async fn create_rol_rejects_duplicate_name() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let rol = create_rol(&store, depocu()).await?;
        assert_eq!(rol.rol_adi, "depocu");

        let err = create_rol(&store, depocu()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.to_string(), "Bu rol adı zaten kullanılmaktadır");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_roller_sorts_by_name() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        create_rol(&store, YeniRol {
            rol_adi: Some("yonetici".into()),
            yetkiler: Some(vec!["tam_yetki".into()]),
        })
        .await?;
        create_rol(&store, depocu()).await?;

        let roller = list_roller(&store).await?;
        assert_eq!(
            roller.iter().map(|r| r.rol_adi.as_str()).collect::<Vec<_>>(),
            vec!["depocu", "yonetici"]
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
