use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validators::{none_if_empty, RequiredFields};

pub const COLLECTION: &str = "urunler";

/// Product catalog document. Stock levels are not stored here; they are
/// derived from the movement ledger in the `stok` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urun {
    pub urun_id: String,
    pub urun_kodu: String,
    pub urun_adi: String,
    #[serde(default)]
    pub urun_barkod: Option<String>,
    #[serde(default)]
    pub depo_bilgisi: Option<String>,
    #[serde(default)]
    pub resim_url: Option<String>,
    pub olusturulma_tarihi: DateTime<Utc>,
    #[serde(default)]
    pub guncelleme_tarihi: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniUrun {
    #[serde(default)]
    pub urun_kodu: Option<String>,
    #[serde(default)]
    pub urun_adi: Option<String>,
    #[serde(default)]
    pub urun_barkod: Option<String>,
    #[serde(default)]
    pub depo_bilgisi: Option<String>,
    #[serde(default)]
    pub resim_url: Option<String>,
    /// Optional opening balance; creates an initial stock entry.
    #[serde(default)]
    pub baslangic_stok_miktari: Option<f64>,
}

impl Urun {
    pub fn create(input: &YeniUrun) -> Result<Self, ModelError> {
        let mut req = RequiredFields::new();
        req.check("urun_kodu", input.urun_kodu.as_deref());
        req.check("urun_adi", input.urun_adi.as_deref());
        req.finish()?;

        Ok(Self {
            urun_id: Uuid::new_v4().to_string(),
            urun_kodu: input.urun_kodu.clone().unwrap_or_default(),
            urun_adi: input.urun_adi.clone().unwrap_or_default(),
            urun_barkod: none_if_empty(input.urun_barkod.clone()),
            depo_bilgisi: none_if_empty(input.depo_bilgisi.clone()),
            resim_url: none_if_empty(input.resim_url.clone()),
            olusturulma_tarihi: Utc::now(),
            guncelleme_tarihi: None,
        })
    }

    pub fn set_resim_url(&mut self, resim_url: String) {
        self.resim_url = Some(resim_url);
        self.guncelleme_tarihi = Some(Utc::now());
    }
}
