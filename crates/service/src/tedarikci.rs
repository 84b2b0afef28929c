use models::tedarikci::{Tedarikci, YeniTedarikci};

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Create a supplier. Supplier names are not unique; the same firm may
/// appear under several contact records.
pub async fn create_tedarikci(
    store: &DepoStore,
    input: YeniTedarikci,
) -> Result<Tedarikci, ServiceError> {
    let tedarikci = Tedarikci::create(input)?;
    store.tedarikciler.insert(&tedarikci.tedarikci_id, &tedarikci).await?;
    Ok(tedarikci)
}

/// Get a supplier by id.
pub async fn get_tedarikci(
    store: &DepoStore,
    tedarikci_id: &str,
) -> Result<Tedarikci, ServiceError> {
    store
        .tedarikciler
        .get(tedarikci_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Tedarikçi bulunamadı".into()))
}

/// List suppliers alphabetically by name.
pub async fn list_tedarikciler(store: &DepoStore) -> Result<Vec<Tedarikci>, ServiceError> {
    let mut tedarikciler = store.tedarikciler.list().await?;
    tedarikciler.sort_by(|a, b| a.tedarikci_ad.cmp(&b.tedarikci_ad));
    Ok(tedarikciler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store;

    fn ornek(ad: &str) -> YeniTedarikci {
        YeniTedarikci {
            tedarikci_ad: Some(ad.into()),
            tedarikci_telefon_no: Some("05551234567".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn tedarikci_crud_service() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let tedarikci = create_tedarikci(&store, ornek("Mersin Lojistik")).await?;
        let found = get_tedarikci(&store, &tedarikci.tedarikci_id).await?;
        assert_eq!(found.tedarikci_ad, "Mersin Lojistik");

        create_tedarikci(&store, ornek("Adana Nakliyat")).await?;
        let listed = list_tedarikciler(&store).await?;
        assert_eq!(listed[0].tedarikci_ad, "Adana Nakliyat");

        let err = get_tedarikci(&store, "yok").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Tedarikçi bulunamadı");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
