use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use models::stok::{StokHareket, GIRIS_ACIKLAMA_BASLANGIC};
use models::urun::{Urun, YeniUrun};
use models::validators::{is_positive_number, RequiredFields};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bildirim::{send_role_notification, RolBildirimGirdisi};
use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Role notified when a product drops below the critical level.
pub const KRITIK_STOK_ROLU: &str = "yonetici";

/// Stock movement list filters. Dates accept RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StokHareketFiltre {
    #[serde(default)]
    pub urun_kodu: Option<String>,
    #[serde(default)]
    pub baslangic_tarihi: Option<String>,
    #[serde(default)]
    pub bitis_tarihi: Option<String>,
}

/// Stock exit input as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StokCikisInput {
    #[serde(default)]
    pub urun_kodu: Option<String>,
    #[serde(default)]
    pub cikis_miktari: Option<f64>,
    #[serde(default)]
    pub aciklama: Option<String>,
}

/// Per-product net stock position.
#[derive(Debug, Clone, Serialize)]
pub struct CariStok {
    pub urun_id: String,
    pub urun_kodu: String,
    pub urun_adi: String,
    pub depo_bilgisi: Option<String>,
    pub stok_miktari: f64,
}

/// Register a product. A positive `baslangic_stok_miktari` also writes the
/// opening entry movement; a missing or non-positive one is ignored.
pub async fn urun_ekle(store: &DepoStore, input: &YeniUrun) -> Result<Urun, ServiceError> {
    let urun = Urun::create(input)?;

    if store.urunler.exists_eq("urun_kodu", &urun.urun_kodu).await? {
        return Err(ServiceError::Conflict(
            "Bu ürün kodu ile kayıtlı bir ürün zaten mevcut".into(),
        ));
    }
    store.urunler.insert(&urun.urun_id, &urun).await?;

    if let Some(miktar) = input.baslangic_stok_miktari {
        if is_positive_number(miktar) {
            let hareket = StokHareket::giris(
                urun.urun_kodu.clone(),
                urun.urun_adi.clone(),
                miktar,
                None,
                Some(GIRIS_ACIKLAMA_BASLANGIC.to_string()),
            );
            store.hareketler.insert(&hareket.stok_id, &hareket).await?;
        }
    }

    Ok(urun)
}

/// Attach an uploaded image URL to a product.
pub async fn urun_gorseli_yukle(
    store: &DepoStore,
    urun_id: &str,
    resim_url: String,
) -> Result<Urun, ServiceError> {
    if resim_url.is_empty() {
        return Err(ServiceError::Validation("Resim URL gereklidir".into()));
    }
    let mut urun = store
        .urunler
        .get(urun_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Ürün bulunamadı".into()))?;
    urun.set_resim_url(resim_url);
    store.urunler.insert(&urun.urun_id, &urun).await?;
    Ok(urun)
}

/// Record a stock exit. Availability is the net sum over every movement of
/// the product, so repeated exits cannot overdraw. Dropping below
/// `kritik_seviye` notifies the managing role; a failed notification only
/// logs, the exit itself stands.
pub async fn urun_cikisi_yap(
    store: &DepoStore,
    input: StokCikisInput,
    kritik_seviye: f64,
) -> Result<StokHareket, ServiceError> {
    let mut req = RequiredFields::new();
    req.check("urun_kodu", input.urun_kodu.as_deref());
    req.check_present("cikis_miktari", input.cikis_miktari);
    req.finish()?;

    let urun_kodu = input.urun_kodu.unwrap_or_default();
    let miktar = input.cikis_miktari.unwrap_or_default();
    if !is_positive_number(miktar) {
        return Err(ServiceError::Validation(
            "Geçerli bir çıkış miktarı belirtmelisiniz".into(),
        ));
    }

    let hareketler = store.hareketler.find_eq("urun_kodu", &urun_kodu).await?;
    if !hareketler.iter().any(StokHareket::is_giris) {
        return Err(ServiceError::Validation(
            "Bu ürün için stoğa giriş kaydı bulunamadı".into(),
        ));
    }

    let mevcut: f64 = hareketler.iter().map(|h| h.stok_miktari).sum();
    if mevcut < miktar {
        return Err(ServiceError::Validation(format!("Yeterli stok yok. Mevcut stok: {mevcut}")));
    }

    let urun_adi = store
        .urunler
        .find_first_eq("urun_kodu", &urun_kodu)
        .await?
        .map(|u| u.urun_adi)
        .unwrap_or_default();

    let hareket = StokHareket::cikis(urun_kodu.clone(), urun_adi.clone(), miktar, input.aciklama);
    store.hareketler.insert(&hareket.stok_id, &hareket).await?;
    info!(urun_kodu = %urun_kodu, miktar, "stok_cikisi");

    let kalan = mevcut - miktar;
    if kalan < kritik_seviye {
        let uyari = RolBildirimGirdisi {
            role: Some(KRITIK_STOK_ROLU.to_string()),
            title: Some("Düşük stok uyarısı".to_string()),
            message: Some(format!(
                "{urun_adi} ({urun_kodu}) stoğu kritik seviyenin altına düştü. Kalan: {kalan}"
            )),
            notification_type: Some(models::bildirim::TYPE_WARNING.to_string()),
        };
        if let Err(err) = send_role_notification(store, uyari).await {
            warn!(urun_kodu = %urun_kodu, error = %err, "kritik_stok_bildirimi_basarisiz");
        }
    }

    Ok(hareket)
}

/// List stock movements, newest first, honoring the optional filters.
/// Movements without any date are dropped once a date filter is active.
pub async fn stok_hareketleri(
    store: &DepoStore,
    filtre: &StokHareketFiltre,
) -> Result<Vec<StokHareket>, ServiceError> {
    let baslangic = filtre.baslangic_tarihi.as_deref().map(parse_tarih).transpose()?;
    let bitis = filtre.bitis_tarihi.as_deref().map(parse_tarih).transpose()?;

    let mut hareketler: Vec<StokHareket> = store
        .hareketler
        .list()
        .await?
        .into_iter()
        .filter(|h| filtre.urun_kodu.as_deref().map_or(true, |k| h.urun_kodu == k))
        .filter(|h| {
            if baslangic.is_none() && bitis.is_none() {
                return true;
            }
            let Some(tarih) = hareket_tarihi(h) else {
                return false;
            };
            baslangic.map_or(true, |b| tarih >= b) && bitis.map_or(true, |b| tarih <= b)
        })
        .collect();

    hareketler.sort_by(|a, b| hareket_tarihi(b).cmp(&hareket_tarihi(a)));
    Ok(hareketler)
}

/// Net stock per product, covering products without any movement.
pub async fn cari_stok_durumu(store: &DepoStore) -> Result<Vec<CariStok>, ServiceError> {
    let mut durum: BTreeMap<String, CariStok> = BTreeMap::new();
    for urun in store.urunler.list().await? {
        durum.insert(
            urun.urun_kodu.clone(),
            CariStok {
                urun_id: urun.urun_id,
                urun_kodu: urun.urun_kodu,
                urun_adi: urun.urun_adi,
                depo_bilgisi: urun.depo_bilgisi,
                stok_miktari: 0.0,
            },
        );
    }

    // movements referencing unknown products are ignored
    for hareket in store.hareketler.list().await? {
        if let Some(satir) = durum.get_mut(&hareket.urun_kodu) {
            satir.stok_miktari += hareket.stok_miktari;
        }
    }

    Ok(durum.into_values().collect())
}

/// List products alphabetically by name.
pub async fn urun_listesi(store: &DepoStore) -> Result<Vec<Urun>, ServiceError> {
    let mut urunler = store.urunler.list().await?;
    urunler.sort_by(|a, b| a.urun_adi.cmp(&b.urun_adi));
    Ok(urunler)
}

fn hareket_tarihi(hareket: &StokHareket) -> Option<DateTime<Utc>> {
    hareket.stok_giris_tarihi.or(hareket.stok_cikis_tarihi)
}

fn parse_tarih(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    if let Ok(tarih) = DateTime::parse_from_rfc3339(raw) {
        return Ok(tarih.with_timezone(&Utc));
    }
    if let Ok(gun) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&gun.and_time(NaiveTime::MIN)));
    }
    Err(ServiceError::Validation("Geçersiz tarih formatı".into()))
}
