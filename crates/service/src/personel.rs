use chrono::{DateTime, Utc};
use models::errors::ModelError;
use models::personel::{Personel, PersonelSanitized, YeniPersonel};
use serde::Serialize;

use crate::auth::hash_password;
use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Last-login projection for a staff member.
#[derive(Debug, Clone, Serialize)]
pub struct SonGirisBilgisi {
    pub personel_id: String,
    pub personel_ad: String,
    pub personel_soyad: String,
    pub son_giris: Option<DateTime<Utc>>,
}

impl From<&Personel> for SonGirisBilgisi {
    fn from(personel: &Personel) -> Self {
        Self {
            personel_id: personel.personel_id.clone(),
            personel_ad: personel.personel_ad.clone(),
            personel_soyad: personel.personel_soyad.clone(),
            son_giris: personel.son_giris,
        }
    }
}

/// Register a staff member. Field validation errors surface before the
/// uniqueness and company checks.
pub async fn create_personel(
    store: &DepoStore,
    input: YeniPersonel,
) -> Result<Personel, ServiceError> {
    let personel = Personel::create(input, |plain| {
        hash_password(plain).map_err(|e| ModelError::Validation(e.to_string()))
    })?;

    if store
        .personeller
        .exists_eq("personel_eposta_adresi", &personel.personel_eposta_adresi)
        .await?
    {
        return Err(ServiceError::Conflict(
            "Bu e-posta adresi ile kayıtlı personel bulunmaktadır".into(),
        ));
    }
    if store.firmalar.get(&personel.firma_firma_id).await?.is_none() {
        return Err(ServiceError::Validation("Belirtilen firma bulunamadı".into()));
    }

    store.personeller.insert(&personel.personel_id, &personel).await?;
    Ok(personel)
}

/// Get a staff member by id.
pub async fn get_personel(store: &DepoStore, personel_id: &str) -> Result<Personel, ServiceError> {
    store
        .personeller
        .get(personel_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Personel bulunamadı".into()))
}

/// Last-login details for a staff member.
pub async fn son_giris_bilgisi(
    store: &DepoStore,
    personel_id: &str,
) -> Result<SonGirisBilgisi, ServiceError> {
    let personel = get_personel(store, personel_id).await?;
    Ok(SonGirisBilgisi::from(&personel))
}

/// List staff, optionally restricted to one company, sanitized and sorted by
/// first name.
pub async fn list_personeller(
    store: &DepoStore,
    firma_id: Option<&str>,
) -> Result<Vec<PersonelSanitized>, ServiceError> {
    let mut personeller = match firma_id {
        Some(id) => store.personeller.find_eq("firma_firma_id", id).await?,
        None => store.personeller.list().await?,
    };
    personeller.sort_by(|a, b| a.personel_ad.cmp(&b.personel_ad));
    Ok(personeller.iter().map(Personel::sanitized).collect())
}
