use models::siparis::{Siparis, SiparisDurum, YeniSiparis};
use models::stok::StokHareket;
use models::validators::is_positive_number;
use serde::Deserialize;
use tracing::info;

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Optional order list filters, taken straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiparisFiltre {
    #[serde(default)]
    pub tedarikci_id: Option<String>,
    #[serde(default)]
    pub personel_id: Option<String>,
    #[serde(default)]
    pub durum: Option<String>,
}

/// Create an order after checking that the referenced supplier and staff
/// member exist.
pub async fn create_siparis(store: &DepoStore, input: YeniSiparis) -> Result<Siparis, ServiceError> {
    let siparis = Siparis::create(input)?;

    if store.tedarikciler.get(&siparis.tedarikci_tedarikci_id).await?.is_none() {
        return Err(ServiceError::Validation("Belirtilen tedarikçi bulunamadı".into()));
    }
    if store.personeller.get(&siparis.personel_personel_id).await?.is_none() {
        return Err(ServiceError::Validation("Belirtilen personel bulunamadı".into()));
    }

    store.siparisler.insert(&siparis.siparis_id, &siparis).await?;
    Ok(siparis)
}

/// Get an order by id.
pub async fn get_siparis(store: &DepoStore, siparis_id: &str) -> Result<Siparis, ServiceError> {
    store
        .siparisler
        .get(siparis_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Sipariş bulunamadı".into()))
}

/// List orders, newest first, honoring the optional filters.
pub async fn list_siparisler(
    store: &DepoStore,
    filtre: &SiparisFiltre,
) -> Result<Vec<Siparis>, ServiceError> {
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
                && filtre
                    .personel_id
                    .as_deref()
                    .map_or(true, |id| s.personel_personel_id == id)
                && filtre.durum.as_deref().map_or(true, |d| s.durum.as_str() == d)
        })
        .collect();
    siparisler.sort_by(|a, b| b.siparis_tarihi.cmp(&a.siparis_tarihi));
    Ok(siparisler)
}

/// Update an order's status. The raw status string is validated before the
/// order is looked up.
pub async fn update_siparis_durum(
    store: &DepoStore,
    siparis_id: &str,
    durum_raw: Option<&str>,
) -> Result<Siparis, ServiceError> {
    let durum = SiparisDurum::parse(durum_raw.unwrap_or_default())?;
    let mut siparis = get_siparis(store, siparis_id).await?;
    siparis.set_durum(durum);
    store.siparisler.insert(&siparis.siparis_id, &siparis).await?;
    Ok(siparis)
}

/// Record the delivery of an order: writes an entry movement for the ordered
/// product and marks the order delivered.
pub async fn urun_girisi_yap(
    store: &DepoStore,
    siparis_id: &str,
    stok_miktari: Option<f64>,
) -> Result<StokHareket, ServiceError> {
    let miktar = match stok_miktari {
        Some(m) if is_positive_number(m) => m,
        _ => {
            return Err(ServiceError::Validation(
                "Geçerli bir stok miktarı belirtmelisiniz".into(),
            ))
        }
    };

    let mut siparis = get_siparis(store, siparis_id).await?;
    let hareket = StokHareket::giris(
        siparis.urun_kodu.clone(),
        siparis.urun_adi.clone(),
        miktar,
        Some(siparis.siparis_id.clone()),
        None,
    );
    store.hareketler.insert(&hareket.stok_id, &hareket).await?;

    siparis.set_durum(SiparisDurum::TeslimEdildi);
    store.siparisler.insert(&siparis.siparis_id, &siparis).await?;
    info!(siparis_id = %siparis.siparis_id, miktar, "urun_girisi");
    Ok(hareket)
}
