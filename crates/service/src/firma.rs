use models::firma::{Firma, FirmaGuncelle, FirmaOzet, YeniFirma};

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Create a company. Tax numbers are unique.
pub async fn create_firma(store: &DepoStore, input: YeniFirma) -> Result<Firma, ServiceError> {
    let firma = Firma::create(input)?;
    if store
        .firmalar
        .exists_eq("firma_vergi_no", &firma.firma_vergi_no)
        .await?
    {
        return Err(ServiceError::Conflict(
            "Bu vergi numarası ile kayıtlı bir firma zaten mevcut".into(),
        ));
    }
    store.firmalar.insert(&firma.firma_id, &firma).await?;
    Ok(firma)
}

/// Get a company by id.
pub async fn get_firma(store: &DepoStore, firma_id: &str) -> Result<Firma, ServiceError> {
    store
        .firmalar
        .get(firma_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Firma bulunamadı".into()))
}

/// Update the mutable company fields.
pub async fn update_firma(
    store: &DepoStore,
    firma_id: &str,
    update: FirmaGuncelle,
) -> Result<Firma, ServiceError> {
    let mut firma = get_firma(store, firma_id).await?;
    firma.apply_update(update)?;
    store.firmalar.insert(&firma.firma_id, &firma).await?;
    Ok(firma)
}

/// List companies as summaries, alphabetically by name.
pub async fn list_firmalar(store: &DepoStore) -> Result<Vec<FirmaOzet>, ServiceError> {
    let mut firmalar = store.firmalar.list().await?;
    firmalar.sort_by(|a, b| a.firma_ad.cmp(&b.firma_ad));
    Ok(firmalar.iter().map(FirmaOzet::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ornek_firma, temp_store};

    #[tokio::test]
    async fn firma_crud_service() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let firma = create_firma(&store, ornek_firma()).await?;
        let found = get_firma(&store, &firma.firma_id).await?;
        assert_eq!(found.firma_id, firma.firma_id);

        let updated = update_firma(
            &store,
            &firma.firma_id,
            FirmaGuncelle { firma_ad: Some("Yeni Depo A.Ş.".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.firma_ad, "Yeni Depo A.Ş.");
        assert!(updated.guncelleme_tarihi.is_some());

        let mut ikinci = ornek_firma();
        ikinci.firma_ad = Some("Ankara Depo".into());
        ikinci.firma_vergi_no = Some("9876543210".into());
        create_firma(&store, ikinci).await?;

        let listed = list_firmalar(&store).await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].firma_ad, "Ankara Depo");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_firma_rejects_duplicate_vergi_no() {
        let (store, dir) = temp_store().await;
        create_firma(&store, ornek_firma()).await.unwrap();

        let err = create_firma(&store, ornek_firma()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Bu vergi numarası ile kayıtlı bir firma zaten mevcut"
        );
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn get_firma_maps_missing_to_not_found() {
        let (store, dir) = temp_store().await;
        let err = get_firma(&store, "yok").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Firma bulunamadı");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn update_firma_rejects_invalid_phone() {
        let (store, dir) = temp_store().await;
        let firma = create_firma(&store, ornek_firma()).await.unwrap();
        let err = update_firma(
            &store,
            &firma.firma_id,
            FirmaGuncelle { firma_telefon: Some("123".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Geçersiz telefon numarası formatı");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
