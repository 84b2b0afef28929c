use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rand::Rng;
use serde_json::json;

use models::personel::Personel;
use models::urun::YeniUrun;
use service::stok::{self, StokCikisInput, StokHareketFiltre};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/api/stok/urunler", tag = "stok",
    request_body = crate::openapi::YeniUrunRequest,
    responses((status = 201, description = "Ürün başarıyla eklendi"), (status = 400, description = "Geçersiz girdi")))]
pub async fn urun_ekle(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(input): Json<YeniUrun>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["stok_ekleme"]).await?;
    let urun = stok::urun_ekle(&state.store, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Ürün başarıyla eklendi",
            "urun_id": urun.urun_id,
        })),
    ))
}

/// Product image upload, multipart field `image`. The file lands in the
/// uploads directory under a collision-free generated name and the product
/// record gets the public `/uploads/...` URL.
#[utoipa::path(post, path = "/api/stok/urunler/{urun_id}/gorsel", tag = "stok",
    params(("urun_id" = String, Path, description = "Ürün kimliği")),
    responses((status = 200, description = "Görsel yüklendi"), (status = 400, description = "Dosya eksik"), (status = 404, description = "Ürün bulunamadı")))]
pub async fn gorsel_yukle(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Path(urun_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Permission first, before any bytes hit the disk.
    state.yetki_kontrol(&personel, &["stok_ekleme"]).await?;

    let mut dosya = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() == Some("image") {
            let orijinal_ad = field.file_name().unwrap_or_default().to_string();
            let icerik = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
            dosya = Some((orijinal_ad, icerik));
            break;
        }
    }
    let (orijinal_ad, icerik) = dosya.ok_or_else(|| {
        ApiError::new(StatusCode::BAD_REQUEST, "Yüklenecek dosya bulunamadı")
    })?;

    let dosya_adi = gorsel_dosya_adi(&orijinal_ad);
    let hedef = std::path::Path::new(state.cfg.uploads.dir.as_str()).join(&dosya_adi);
    tokio::fs::write(&hedef, &icerik).await.map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Dosya kaydedilemedi: {e}"),
        )
    })?;

    let resim_url = format!("/uploads/{dosya_adi}");
    let urun = stok::urun_gorseli_yukle(&state.store, &urun_id, resim_url).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Ürün görseli başarıyla yüklendi",
        "resim_url": urun.resim_url,
    })))
}

#[utoipa::path(get, path = "/api/stok/urunler", tag = "stok",
    responses((status = 200, description = "Ürün listesi")))]
pub async fn urun_listesi(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let urunler = stok::urun_listesi(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": urunler })))
}

#[utoipa::path(post, path = "/api/stok/cikis", tag = "stok",
    request_body = crate::openapi::StokCikisRequest,
    responses((status = 201, description = "Çıkış kaydedildi"), (status = 400, description = "Yetersiz stok veya geçersiz girdi")))]
pub async fn cikis(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(input): Json<StokCikisInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["stok_cikisi"]).await?;
    let kritik_seviye = state.cfg.stok.kritik_seviye as f64;
    let hareket = stok::urun_cikisi_yap(&state.store, input, kritik_seviye).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Ürün çıkışı başarıyla kaydedildi",
            "stok_id": hareket.stok_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/stok/hareketler", tag = "stok",
    params(
        ("urun_kodu" = Option<String>, Query, description = "Ürün koduna göre süz"),
        ("baslangic_tarihi" = Option<String>, Query, description = "Bu tarihten itibaren"),
        ("bitis_tarihi" = Option<String>, Query, description = "Bu tarihe kadar")),
    responses((status = 200, description = "Hareket listesi"), (status = 400, description = "Geçersiz tarih formatı")))]
pub async fn hareketler(
    State(state): State<ServerState>,
    Query(filtre): Query<StokHareketFiltre>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hareketler = stok::stok_hareketleri(&state.store, &filtre).await?;
    Ok(Json(json!({ "success": true, "data": hareketler })))
}

#[utoipa::path(get, path = "/api/stok/durum", tag = "stok",
    responses((status = 200, description = "Cari stok durumu")))]
pub async fn durum(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let durum = stok::cari_stok_durumu(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": durum })))
}

/// `urun-<millis>-<rand>` plus the original extension, if any.
fn gorsel_dosya_adi(orijinal: &str) -> String {
    let uzanti = std::path::Path::new(orijinal)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let damga = Utc::now().timestamp_millis();
    let rastgele: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("urun-{damga}-{rastgele}{uzanti}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gorsel_dosya_adi_keeps_extension() {
        let ad = gorsel_dosya_adi("palet.PNG");
        assert!(ad.starts_with("urun-"));
        assert!(ad.ends_with(".PNG"));
    }

    #[test]
    fn gorsel_dosya_adi_without_extension() {
        let ad = gorsel_dosya_adi("palet");
        assert!(ad.starts_with("urun-"));
        assert!(!ad.contains('.'));
    }
}
