use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validators::{
    is_valid_email, is_valid_tax_number, is_valid_turkish_phone, none_if_empty, RequiredFields,
};

pub const COLLECTION: &str = "firma";

/// Company document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firma {
    pub firma_id: String,
    pub firma_ad: String,
    pub firma_vergi_no: String,
    pub firma_telefon: String,
    #[serde(default)]
    pub firma_adres: Option<String>,
    #[serde(default)]
    pub firma_eposta_adresi: Option<String>,
    #[serde(default)]
    pub firma_sahibi: Option<String>,
    pub olusturulma_tarihi: DateTime<Utc>,
    #[serde(default)]
    pub guncelleme_tarihi: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniFirma {
    #[serde(default)]
    pub firma_ad: Option<String>,
    #[serde(default)]
    pub firma_vergi_no: Option<String>,
    #[serde(default)]
    pub firma_telefon: Option<String>,
    #[serde(default)]
    pub firma_adres: Option<String>,
    #[serde(default)]
    pub firma_eposta_adresi: Option<String>,
    #[serde(default)]
    pub firma_sahibi: Option<String>,
}

/// Partial update; omitted fields keep their value. The tax number is
/// fixed after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirmaGuncelle {
    #[serde(default)]
    pub firma_ad: Option<String>,
    #[serde(default)]
    pub firma_telefon: Option<String>,
    #[serde(default)]
    pub firma_adres: Option<String>,
    #[serde(default)]
    pub firma_eposta_adresi: Option<String>,
}

/// Listing projection with only the essential columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmaOzet {
    pub firma_id: String,
    pub firma_ad: String,
    pub firma_vergi_no: String,
    pub firma_telefon: String,
}

impl From<&Firma> for FirmaOzet {
    fn from(firma: &Firma) -> Self {
        Self {
            firma_id: firma.firma_id.clone(),
            firma_ad: firma.firma_ad.clone(),
            firma_vergi_no: firma.firma_vergi_no.clone(),
            firma_telefon: firma.firma_telefon.clone(),
        }
    }
}

impl Firma {
    pub fn create(input: YeniFirma) -> Result<Self, ModelError> {
        let mut req = RequiredFields::new();
        req.check("firma_ad", input.firma_ad.as_deref());
        req.check("firma_vergi_no", input.firma_vergi_no.as_deref());
        req.check("firma_telefon", input.firma_telefon.as_deref());
        req.finish()?;

        let firma_vergi_no = input.firma_vergi_no.unwrap_or_default();
        if !is_valid_tax_number(&firma_vergi_no) {
            return Err(ModelError::Validation(
                "Geçersiz vergi numarası formatı".into(),
            ));
        }
        let firma_telefon = input.firma_telefon.unwrap_or_default();
        if !is_valid_turkish_phone(&firma_telefon) {
            return Err(ModelError::Validation(
                "Geçersiz telefon numarası formatı".into(),
            ));
        }
        let firma_eposta_adresi = none_if_empty(input.firma_eposta_adresi);
        if let Some(eposta) = &firma_eposta_adresi {
            if !is_valid_email(eposta) {
                return Err(ModelError::Validation("Geçersiz e-posta formatı".into()));
            }
        }

        Ok(Self {
            firma_id: Uuid::new_v4().to_string(),
            firma_ad: input.firma_ad.unwrap_or_default(),
            firma_vergi_no,
            firma_telefon,
            firma_adres: none_if_empty(input.firma_adres),
            firma_eposta_adresi,
            firma_sahibi: none_if_empty(input.firma_sahibi),
            olusturulma_tarihi: Utc::now(),
            guncelleme_tarihi: None,
        })
    }

    /// Applies the allowed update fields and stamps the update time.
    pub fn apply_update(&mut self, update: FirmaGuncelle) -> Result<(), ModelError> {
        if let Some(ad) = none_if_empty(update.firma_ad) {
            self.firma_ad = ad;
        }
        if let Some(telefon) = none_if_empty(update.firma_telefon) {
            if !is_valid_turkish_phone(&telefon) {
                return Err(ModelError::Validation(
                    "Geçersiz telefon numarası formatı".into(),
                ));
            }
            self.firma_telefon = telefon;
        }
        if let Some(adres) = update.firma_adres {
            self.firma_adres = none_if_empty(Some(adres));
        }
        if let Some(eposta) = update.firma_eposta_adresi {
            let eposta = none_if_empty(Some(eposta));
            if let Some(e) = &eposta {
                if !is_valid_email(e) {
                    return Err(ModelError::Validation("Geçersiz e-posta formatı".into()));
                }
            }
            self.firma_eposta_adresi = eposta;
        }
        self.guncelleme_tarihi = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> YeniFirma {
        YeniFirma {
            firma_ad: Some("Depo A.Ş.".into()),
            firma_vergi_no: Some("1234567890".into()),
            firma_telefon: Some("05551234567".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_stamps_id_and_timestamp() {
        let firma = Firma::create(valid_input()).unwrap();
        assert!(!firma.firma_id.is_empty());
        assert_eq!(firma.firma_ad, "Depo A.Ş.");
        assert!(firma.guncelleme_tarihi.is_none());
    }

    #[test]
    fn create_lists_missing_fields() {
        let err = Firma::create(YeniFirma::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "firma_ad, firma_vergi_no, firma_telefon alanları zorunludur"
        );
    }

    #[test]
    fn create_rejects_bad_tax_number() {
        let mut input = valid_input();
        input.firma_vergi_no = Some("123".into());
        let err = Firma::create(input).unwrap_err();
        assert_eq!(err.to_string(), "Geçersiz vergi numarası formatı");
    }

    #[test]
    fn create_rejects_bad_email() {
        let mut input = valid_input();
        input.firma_eposta_adresi = Some("not-an-email".into());
        assert!(matches!(Firma::create(input), Err(ModelError::Validation(_))));
    }

    #[test]
    fn update_touches_only_provided_fields() {
        let mut firma = Firma::create(valid_input()).unwrap();
        let vergi_no = firma.firma_vergi_no.clone();
        firma
            .apply_update(FirmaGuncelle {
                firma_ad: Some("Yeni Depo A.Ş.".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(firma.firma_ad, "Yeni Depo A.Ş.");
        assert_eq!(firma.firma_vergi_no, vergi_no);
        assert!(firma.guncelleme_tarihi.is_some());
    }
}
