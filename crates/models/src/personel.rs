use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validators::{
    is_strong_password, is_valid_email, is_valid_turkish_phone, none_if_empty, RequiredFields,
};

pub const COLLECTION: &str = "personel";

pub const DEFAULT_ROL: &str = "kullanici";

/// Staff document. `personel_sifre` holds the password hash and must never
/// leave the store unsanitized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personel {
    pub personel_id: String,
    pub personel_ad: String,
    pub personel_soyad: String,
    #[serde(default)]
    pub personel_telefon_no: Option<String>,
    pub personel_eposta_adresi: String,
    pub personel_sifre: String,
    pub firma_firma_id: String,
    pub rol: String,
    pub olusturulma_tarihi: DateTime<Utc>,
    #[serde(default)]
    pub son_giris: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniPersonel {
    #[serde(default)]
    pub personel_ad: Option<String>,
    #[serde(default)]
    pub personel_soyad: Option<String>,
    #[serde(default)]
    pub personel_telefon_no: Option<String>,
    #[serde(default)]
    pub personel_eposta_adresi: Option<String>,
    #[serde(default)]
    pub personel_sifre: Option<String>,
    #[serde(default)]
    pub firma_firma_id: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
}

/// Wire view with the password hash stripped.
#[derive(Debug, Clone, Serialize)]
pub struct PersonelSanitized {
    pub personel_id: String,
    pub personel_ad: String,
    pub personel_soyad: String,
    pub personel_telefon_no: Option<String>,
    pub personel_eposta_adresi: String,
    pub firma_firma_id: String,
    pub rol: String,
    pub olusturulma_tarihi: DateTime<Utc>,
    pub son_giris: Option<DateTime<Utc>>,
}

impl Personel {
    /// Validates the input, hashes the password through `hash_fn` and builds
    /// the document. Hashing only runs once validation has passed.
    pub fn create<F>(input: YeniPersonel, hash_fn: F) -> Result<Self, ModelError>
    where
        F: FnOnce(&str) -> Result<String, ModelError>,
    {
        let mut req = RequiredFields::new();
        req.check("personel_ad", input.personel_ad.as_deref());
        req.check("personel_soyad", input.personel_soyad.as_deref());
        req.check(
            "personel_eposta_adresi",
            input.personel_eposta_adresi.as_deref(),
        );
        req.check("personel_sifre", input.personel_sifre.as_deref());
        req.check("firma_firma_id", input.firma_firma_id.as_deref());
        req.finish()?;

        let personel_eposta_adresi = input.personel_eposta_adresi.unwrap_or_default();
        if !is_valid_email(&personel_eposta_adresi) {
            return Err(ModelError::Validation("Geçersiz e-posta formatı".into()));
        }
        let sifre = input.personel_sifre.unwrap_or_default();
        if !is_strong_password(&sifre) {
            return Err(ModelError::Validation(
                "Şifre en az 8 karakter uzunluğunda olmalı ve en az bir büyük harf, bir küçük harf ve bir rakam içermelidir".into(),
            ));
        }
        let personel_telefon_no = none_if_empty(input.personel_telefon_no);
        if let Some(telefon) = &personel_telefon_no {
            if !is_valid_turkish_phone(telefon) {
                return Err(ModelError::Validation(
                    "Geçersiz telefon numarası formatı".into(),
                ));
            }
        }

        let personel_sifre = hash_fn(&sifre)?;

        Ok(Self {
            personel_id: Uuid::new_v4().to_string(),
            personel_ad: input.personel_ad.unwrap_or_default(),
            personel_soyad: input.personel_soyad.unwrap_or_default(),
            personel_telefon_no,
            personel_eposta_adresi,
            personel_sifre,
            firma_firma_id: input.firma_firma_id.unwrap_or_default(),
            rol: none_if_empty(input.rol).unwrap_or_else(|| DEFAULT_ROL.to_string()),
            olusturulma_tarihi: Utc::now(),
            son_giris: None,
        })
    }

    pub fn sanitized(&self) -> PersonelSanitized {
        PersonelSanitized {
            personel_id: self.personel_id.clone(),
            personel_ad: self.personel_ad.clone(),
            personel_soyad: self.personel_soyad.clone(),
            personel_telefon_no: self.personel_telefon_no.clone(),
            personel_eposta_adresi: self.personel_eposta_adresi.clone(),
            firma_firma_id: self.firma_firma_id.clone(),
            rol: self.rol.clone(),
            olusturulma_tarihi: self.olusturulma_tarihi,
            son_giris: self.son_giris,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> YeniPersonel {
        YeniPersonel {
            personel_ad: Some("Ali".into()),
            personel_soyad: Some("Yılmaz".into()),
            personel_eposta_adresi: Some("ali@depo.com".into()),
            personel_sifre: Some("Gizli1234".into()),
            firma_firma_id: Some("firma-1".into()),
            ..Default::default()
        }
    }

    fn fake_hash(s: &str) -> Result<String, ModelError> {
        Ok(format!("hashed:{s}"))
    }

    #[test]
    fn create_hashes_password_and_defaults_role() {
        let p = Personel::create(valid_input(), fake_hash).unwrap();
        assert_eq!(p.personel_sifre, "hashed:Gizli1234");
        assert_eq!(p.rol, "kullanici");
        assert!(p.son_giris.is_none());
    }

    #[test]
    fn create_rejects_weak_password_before_hashing() {
        let mut input = valid_input();
        input.personel_sifre = Some("zayif".into());
        let err = Personel::create(input, |_| panic!("must not hash")).unwrap_err();
        assert!(err.to_string().starts_with("Şifre en az 8 karakter"));
    }

    #[test]
    fn create_lists_missing_fields() {
        let err = Personel::create(YeniPersonel::default(), fake_hash).unwrap_err();
        assert_eq!(
            err.to_string(),
            "personel_ad, personel_soyad, personel_eposta_adresi, personel_sifre, firma_firma_id alanları zorunludur"
        );
    }

    #[test]
    fn sanitized_drops_password_hash() {
        let p = Personel::create(valid_input(), fake_hash).unwrap();
        let json = serde_json::to_value(p.sanitized()).unwrap();
        assert!(json.get("personel_sifre").is_none());
        assert_eq!(json["personel_eposta_adresi"], "ali@depo.com");
    }
}
