use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use models::siparis::{Siparis, SiparisDurum};
use serde::{Deserialize, Serialize};

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Order report filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiparisRaporFiltre {
    #[serde(default)]
    pub tedarikci_id: Option<String>,
    #[serde(default)]
    pub durum: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StokRaporSatiri {
    pub urun_kodu: String,
    pub urun_adi: String,
    pub total_in: f64,
    pub total_out: f64,
    pub current_stock: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StokRaporu {
    pub generated_at: String,
    pub products: Vec<StokRaporSatiri>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiparisRaporOzeti {
    pub siparis_id: String,
    pub urun_kodu: String,
    pub urun_adi: String,
    pub urun_miktari: f64,
    pub siparis_tarihi: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiparisRaporGrubu {
    pub count: usize,
    pub orders: Vec<SiparisRaporOzeti>,
}

/// The four order states, always present even when empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiparisDurumGruplari {
    pub beklemede: SiparisRaporGrubu,
    #[serde(rename = "onaylandı")]
    pub onaylandi: SiparisRaporGrubu,
    #[serde(rename = "teslim edildi")]
    pub teslim_edildi: SiparisRaporGrubu,
    pub iptal: SiparisRaporGrubu,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiparisRaporu {
    pub generated_at: String,
    pub total_orders: usize,
    pub by_status: SiparisDurumGruplari,
}

#[derive(Debug, Clone, Serialize)]
pub struct TedarikciRaporSatiri {
    pub tedarikci_id: String,
    pub tedarikci_ad: String,
    pub total_orders: usize,
    pub completed_orders: usize,
    pub completion_rate: f64,
    pub total_products: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TedarikciRaporu {
    pub generated_at: String,
    pub suppliers: Vec<TedarikciRaporSatiri>,
}

/// In/out/net totals per product, from the movement ledger alone.
pub async fn stock_status_report(
    store: &DepoStore,
    urun_kodu: Option<&str>,
) -> Result<StokRaporu, ServiceError> {
    let mut satirlar: BTreeMap<String, StokRaporSatiri> = BTreeMap::new();

    for hareket in store.hareketler.list().await? {
        if urun_kodu.map_or(false, |k| hareket.urun_kodu != k) {
            continue;
        }
        let satir = satirlar.entry(hareket.urun_kodu.clone()).or_insert_with(|| {
            StokRaporSatiri {
                urun_kodu: hareket.urun_kodu.clone(),
                urun_adi: hareket.urun_adi.clone(),
                total_in: 0.0,
                total_out: 0.0,
                current_stock: 0.0,
            }
        });
        if hareket.stok_miktari > 0.0 {
            satir.total_in += hareket.stok_miktari;
        } else {
            satir.total_out += hareket.stok_miktari.abs();
        }
        satir.current_stock += hareket.stok_miktari;
    }

    Ok(StokRaporu { generated_at: rapor_tarihi(), products: satirlar.into_values().collect() })
}

/// Orders grouped into the four states, with per-order summaries.
pub async fn order_status_report(
    store: &DepoStore,
    filtre: &SiparisRaporFiltre,
) -> Result<SiparisRaporu, ServiceError> {
    let mut siparisler: Vec<Siparis> = store
        .siparisler
        .list()
        .await?
        .into_iter()
        .filter(|s| {
            filtre
                .tedarikci_id
                .as_deref()
                .map_or(true, |id| s.tedarikci_tedarikci_id == id)
                && filtre.durum.as_deref().map_or(true, |d| s.durum.as_str() == d)
        })
        .collect();
    siparisler.sort_by(|a, b| b.siparis_tarihi.cmp(&a.siparis_tarihi));

    let total_orders = siparisler.len();
    let mut by_status = SiparisDurumGruplari::default();
    for siparis in siparisler {
        let grup = match siparis.durum {
            SiparisDurum::Beklemede => &mut by_status.beklemede,
            SiparisDurum::Onaylandi => &mut by_status.onaylandi,
            SiparisDurum::TeslimEdildi => &mut by_status.teslim_edildi,
            SiparisDurum::Iptal => &mut by_status.iptal,
        };
        grup.count += 1;
        grup.orders.push(SiparisRaporOzeti {
            siparis_id: siparis.siparis_id,
            urun_kodu: siparis.urun_kodu,
            urun_adi: siparis.urun_adi,
            urun_miktari: siparis.urun_miktari,
            siparis_tarihi: siparis.siparis_tarihi,
        });
    }

    Ok(SiparisRaporu { generated_at: rapor_tarihi(), total_orders, by_status })
}

/// Delivery performance per supplier. Only delivered orders count towards
/// product totals.
pub async fn supplier_report(store: &DepoStore) -> Result<TedarikciRaporu, ServiceError> {
    let mut satirlar: BTreeMap<String, TedarikciRaporSatiri> = BTreeMap::new();
    for tedarikci in store.tedarikciler.list().await? {
        satirlar.insert(
            tedarikci.tedarikci_id.clone(),
            TedarikciRaporSatiri {
                tedarikci_id: tedarikci.tedarikci_id,
                tedarikci_ad: tedarikci.tedarikci_ad,
                total_orders: 0,
                completed_orders: 0,
                completion_rate: 0.0,
                total_products: 0.0,
            },
        );
    }

    for siparis in store.siparisler.list().await? {
        if let Some(satir) = satirlar.get_mut(&siparis.tedarikci_tedarikci_id) {
            satir.total_orders += 1;
            if siparis.durum == SiparisDurum::TeslimEdildi {
                satir.completed_orders += 1;
                satir.total_products += siparis.urun_miktari;
            }
        }
    }

    let mut suppliers: Vec<TedarikciRaporSatiri> = satirlar
        .into_values()
        .map(|mut satir| {
            if satir.total_orders > 0 {
                satir.completion_rate =
                    (satir.completed_orders as f64 / satir.total_orders as f64) * 100.0;
            }
            satir
        })
        .collect();
    suppliers.sort_by(|a, b| a.tedarikci_ad.cmp(&b.tedarikci_ad));

    Ok(TedarikciRaporu { generated_at: rapor_tarihi(), suppliers })
}

fn rapor_tarihi() -> String {
    Utc::now().to_rfc3339()
}
