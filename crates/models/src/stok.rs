use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COLLECTION: &str = "stok";

pub const GIRIS_ACIKLAMA_BASLANGIC: &str = "Başlangıç stoğu";
pub const CIKIS_ACIKLAMA_VARSAYILAN: &str = "Stok çıkışı";

/// A single stock movement. Entries carry a positive quantity and a
/// `stok_giris_tarihi`; exits carry a negative quantity and a
/// `stok_cikis_tarihi`. The current level of a product is the sum of its
/// movements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StokHareket {
    pub stok_id: String,
    #[serde(default)]
    pub stok_giris_tarihi: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stok_cikis_tarihi: Option<DateTime<Utc>>,
    pub stok_miktari: f64,
    #[serde(default)]
    pub siparis_siparis_id: Option<String>,
    pub urun_kodu: String,
    pub urun_adi: String,
    #[serde(default)]
    pub aciklama: Option<String>,
}

impl StokHareket {
    /// Entry movement. `miktar` must already be validated as positive.
    pub fn giris(
        urun_kodu: String,
        urun_adi: String,
        miktar: f64,
        siparis_id: Option<String>,
        aciklama: Option<String>,
    ) -> Self {
        Self {
            stok_id: Uuid::new_v4().to_string(),
            stok_giris_tarihi: Some(Utc::now()),
            stok_cikis_tarihi: None,
            stok_miktari: miktar,
            siparis_siparis_id: siparis_id,
            urun_kodu,
            urun_adi,
            aciklama,
        }
    }

    /// Exit movement, stored with a negated quantity.
    pub fn cikis(urun_kodu: String, urun_adi: String, miktar: f64, aciklama: Option<String>) -> Self {
        Self {
            stok_id: Uuid::new_v4().to_string(),
            stok_giris_tarihi: None,
            stok_cikis_tarihi: Some(Utc::now()),
            stok_miktari: -miktar,
            siparis_siparis_id: None,
            urun_kodu,
            urun_adi,
            aciklama: aciklama.or_else(|| Some(CIKIS_ACIKLAMA_VARSAYILAN.to_string())),
        }
    }

    pub fn is_giris(&self) -> bool {
        self.stok_miktari > 0.0
    }
}
