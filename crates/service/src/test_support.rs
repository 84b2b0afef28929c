//! Shared helpers for service tests.

use std::path::PathBuf;

use models::errors::ModelError;
use models::firma::{Firma, YeniFirma};
use models::personel::{Personel, YeniPersonel};

use crate::auth::hash_password;
use crate::storage::depo::DepoStore;

/// Fresh file-backed store under a unique temp directory. Callers remove the
/// directory when done.
pub async fn temp_store() -> (DepoStore, PathBuf) {
    let dir = std::env::temp_dir().join(format!("depo_svc_{}", uuid::Uuid::new_v4()));
    let store = DepoStore::open(&dir).await.expect("store open");
    (store, dir)
}

pub fn ornek_firma() -> YeniFirma {
    YeniFirma {
        firma_ad: Some("Depo A.Ş.".into()),
        firma_vergi_no: Some("1234567890".into()),
        firma_telefon: Some("05551234567".into()),
        ..Default::default()
    }
}

pub fn ornek_personel(eposta: &str, firma_id: &str) -> YeniPersonel {
    YeniPersonel {
        personel_ad: Some("Ali".into()),
        personel_soyad: Some("Yılmaz".into()),
        personel_eposta_adresi: Some(eposta.into()),
        personel_sifre: Some("Gizli1234".into()),
        firma_firma_id: Some(firma_id.into()),
        ..Default::default()
    }
}

/// Seed a company and a staff member directly, bypassing the service checks.
pub async fn seed_firma_ve_personel(store: &DepoStore, eposta: &str) -> (Firma, Personel) {
    let firma = Firma::create(ornek_firma()).expect("firma input");
    store.firmalar.insert(&firma.firma_id, &firma).await.expect("firma insert");

    let personel = Personel::create(ornek_personel(eposta, &firma.firma_id), |plain| {
        hash_password(plain).map_err(|e| ModelError::Validation(e.to_string()))
    })
    .expect("personel input");
    store
        .personeller
        .insert(&personel.personel_id, &personel)
        .await
        .expect("personel insert");

    (firma, personel)
}
