use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validators::{is_positive_number, RequiredFields};

pub const COLLECTION: &str = "siparis";

/// Order lifecycle states, serialized with the exact wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiparisDurum {
    #[serde(rename = "beklemede")]
    Beklemede,
    #[serde(rename = "onaylandı")]
    Onaylandi,
    #[serde(rename = "teslim edildi")]
    TeslimEdildi,
    #[serde(rename = "iptal")]
    Iptal,
}

impl SiparisDurum {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        match raw {
            "beklemede" => Ok(Self::Beklemede),
            "onaylandı" => Ok(Self::Onaylandi),
            "teslim edildi" => Ok(Self::TeslimEdildi),
            "iptal" => Ok(Self::Iptal),
            _ => Err(ModelError::Validation(
                "Geçerli bir durum belirtmeniz gerekmektedir (beklemede, onaylandı, teslim edildi, iptal)"
                    .into(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beklemede => "beklemede",
            Self::Onaylandi => "onaylandı",
            Self::TeslimEdildi => "teslim edildi",
            Self::Iptal => "iptal",
        }
    }

    pub const ALL: [SiparisDurum; 4] = [
        Self::Beklemede,
        Self::Onaylandi,
        Self::TeslimEdildi,
        Self::Iptal,
    ];
}

/// Order document. One product per order; the quantity rides on the order
/// itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Siparis {
    pub siparis_id: String,
    pub siparis_tarihi: DateTime<Utc>,
    pub urun_kodu: String,
    pub urun_adi: String,
    pub urun_miktari: f64,
    pub tedarikci_tedarikci_id: String,
    pub personel_personel_id: String,
    pub durum: SiparisDurum,
    #[serde(default)]
    pub guncelleme_tarihi: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniSiparis {
    #[serde(default)]
    pub urun_kodu: Option<String>,
    #[serde(default)]
    pub urun_adi: Option<String>,
    #[serde(default)]
    pub urun_miktari: Option<f64>,
    #[serde(default)]
    pub tedarikci_tedarikci_id: Option<String>,
    #[serde(default)]
    pub personel_personel_id: Option<String>,
}

impl Siparis {
    /// New orders always start out pending.
    pub fn create(input: YeniSiparis) -> Result<Self, ModelError> {
        let mut req = RequiredFields::new();
        req.check("urun_kodu", input.urun_kodu.as_deref());
        req.check("urun_adi", input.urun_adi.as_deref());
        req.check_present("urun_miktari", input.urun_miktari);
        req.check(
            "tedarikci_tedarikci_id",
            input.tedarikci_tedarikci_id.as_deref(),
        );
        req.check(
            "personel_personel_id",
            input.personel_personel_id.as_deref(),
        );
        req.finish()?;

        let urun_miktari = input.urun_miktari.unwrap_or_default();
        if !is_positive_number(urun_miktari) {
            return Err(ModelError::Validation(
                "Ürün miktarı pozitif bir sayı olmalıdır".into(),
            ));
        }

        Ok(Self {
            siparis_id: Uuid::new_v4().to_string(),
            siparis_tarihi: Utc::now(),
            urun_kodu: input.urun_kodu.unwrap_or_default(),
            urun_adi: input.urun_adi.unwrap_or_default(),
            urun_miktari,
            tedarikci_tedarikci_id: input.tedarikci_tedarikci_id.unwrap_or_default(),
            personel_personel_id: input.personel_personel_id.unwrap_or_default(),
            durum: SiparisDurum::Beklemede,
            guncelleme_tarihi: None,
        })
    }

    pub fn set_durum(&mut self, durum: SiparisDurum) {
        self.durum = durum;
        self.guncelleme_tarihi = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> YeniSiparis {
        YeniSiparis {
            urun_kodu: Some("URN-1".into()),
            urun_adi: Some("Palet".into()),
            urun_miktari: Some(40.0),
            tedarikci_tedarikci_id: Some("ted-1".into()),
            personel_personel_id: Some("per-1".into()),
        }
    }

    #[test]
    fn create_starts_pending() {
        let siparis = Siparis::create(valid_input()).unwrap();
        assert_eq!(siparis.durum, SiparisDurum::Beklemede);
        assert!(siparis.guncelleme_tarihi.is_none());
    }

    #[test]
    fn create_rejects_non_positive_quantity() {
        let mut input = valid_input();
        input.urun_miktari = Some(0.0);
        let err = Siparis::create(input).unwrap_err();
        assert_eq!(err.to_string(), "Ürün miktarı pozitif bir sayı olmalıdır");
    }

    #[test]
    fn durum_parses_wire_strings() {
        assert_eq!(
            SiparisDurum::parse("teslim edildi").unwrap(),
            SiparisDurum::TeslimEdildi
        );
        assert!(SiparisDurum::parse("kargoda").is_err());
    }

    #[test]
    fn durum_serializes_to_wire_strings() {
        let json = serde_json::to_string(&SiparisDurum::Onaylandi).unwrap();
        assert_eq!(json, "\"onaylandı\"");
    }

    #[test]
    fn set_durum_stamps_update_time() {
        let mut siparis = Siparis::create(valid_input()).unwrap();
        siparis.set_durum(SiparisDurum::Onaylandi);
        assert_eq!(siparis.durum, SiparisDurum::Onaylandi);
        assert!(siparis.guncelleme_tarihi.is_some());
    }
}
