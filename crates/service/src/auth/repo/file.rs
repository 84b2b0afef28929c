use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{personel::Personel, rol::Rol};
use serde_json::json;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::storage::depo::DepoStore;

/// The document store doubles as the auth repository; store failures map to
/// [`AuthError::Store`] through the blanket `From` impl.
#[async_trait]
impl AuthRepository for DepoStore {
    async fn find_personel_by_eposta(&self, eposta: &str) -> Result<Option<Personel>, AuthError> {
        Ok(self.personeller.find_first_eq("personel_eposta_adresi", eposta).await?)
    }

    async fn find_personel_by_id(&self, personel_id: &str) -> Result<Option<Personel>, AuthError> {
        Ok(self.personeller.get(personel_id).await?)
    }

    async fn update_son_giris(
        &self,
        personel_id: &str,
        zaman: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        self.personeller.merge(personel_id, json!({ "son_giris": zaman })).await?;
        Ok(())
    }

    async fn find_rol_by_adi(&self, rol_adi: &str) -> Result<Option<Rol>, AuthError> {
        Ok(self.roller.find_first_eq("rol_adi", rol_adi).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use models::errors::ModelError;
    use models::personel::YeniPersonel;

    #[tokio::test]
    async fn son_giris_merge_survives_reload() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("auth_repo_{}", uuid::Uuid::new_v4()));
        let store = DepoStore::open(&dir).await?;

        let personel = Personel::create(
            YeniPersonel {
                personel_ad: Some("Ali".into()),
                personel_soyad: Some("Yılmaz".into()),
                personel_eposta_adresi: Some("ali@depo.com".into()),
                personel_sifre: Some("Gizli1234".into()),
                firma_firma_id: Some("firma-1".into()),
                ..Default::default()
            },
            |plain| hash_password(plain).map_err(|e| ModelError::Validation(e.to_string())),
        )?;
        let id = personel.personel_id.clone();
        store.personeller.insert(&id, &personel).await?;

        let zaman = Utc::now();
        store.update_son_giris(&id, zaman).await?;

        let reopened = DepoStore::open(&dir).await?;
        let loaded = reopened.find_personel_by_id(&id).await?.unwrap();
        assert_eq!(loaded.son_giris.map(|t| t.timestamp()), Some(zaman.timestamp()));
        assert_eq!(
            reopened.find_personel_by_eposta("ali@depo.com").await?.map(|p| p.personel_id),
            Some(id)
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
