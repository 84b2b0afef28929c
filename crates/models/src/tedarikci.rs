use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validators::{is_valid_email, is_valid_turkish_phone, none_if_empty, RequiredFields};

pub const COLLECTION: &str = "tedarikci";

/// Supplier document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tedarikci {
    pub tedarikci_id: String,
    pub tedarikci_ad: String,
    pub tedarikci_telefon_no: String,
    #[serde(default)]
    pub tedarikci_adresi: Option<String>,
    #[serde(default)]
    pub tedarikci_eposta_adresi: Option<String>,
    pub olusturulma_tarihi: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniTedarikci {
    #[serde(default)]
    pub tedarikci_ad: Option<String>,
    #[serde(default)]
    pub tedarikci_telefon_no: Option<String>,
    #[serde(default)]
    pub tedarikci_adresi: Option<String>,
    #[serde(default)]
    pub tedarikci_eposta_adresi: Option<String>,
}

impl Tedarikci {
    pub fn create(input: YeniTedarikci) -> Result<Self, ModelError> {
        let mut req = RequiredFields::new();
        req.check("tedarikci_ad", input.tedarikci_ad.as_deref());
        req.check("tedarikci_telefon_no", input.tedarikci_telefon_no.as_deref());
        req.finish()?;

        let tedarikci_telefon_no = input.tedarikci_telefon_no.unwrap_or_default();
        if !is_valid_turkish_phone(&tedarikci_telefon_no) {
            return Err(ModelError::Validation(
                "Geçersiz telefon numarası formatı".into(),
            ));
        }
        let tedarikci_eposta_adresi = none_if_empty(input.tedarikci_eposta_adresi);
        if let Some(eposta) = &tedarikci_eposta_adresi {
            if !is_valid_email(eposta) {
                return Err(ModelError::Validation("Geçersiz e-posta formatı".into()));
            }
        }

        Ok(Self {
            tedarikci_id: Uuid::new_v4().to_string(),
            tedarikci_ad: input.tedarikci_ad.unwrap_or_default(),
            tedarikci_telefon_no,
            tedarikci_adresi: none_if_empty(input.tedarikci_adresi),
            tedarikci_eposta_adresi,
            olusturulma_tarihi: Utc::now(),
        })
    }
}
