use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use models::personel::Personel;
use models::siparis::YeniSiparis;
use service::siparis::{self, SiparisFiltre};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct DurumGuncelleme {
    #[serde(default)]
    pub durum: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrunGirisiGirdisi {
    #[serde(default)]
    pub stok_miktari: Option<f64>,
}

#[utoipa::path(post, path = "/api/siparis", tag = "siparis",
    request_body = crate::openapi::YeniSiparisRequest,
    responses((status = 201, description = "Sipariş başarıyla oluşturuldu"), (status = 400, description = "Geçersiz girdi")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(input): Json<YeniSiparis>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["siparis_olusturma"]).await?;
    let yeni = siparis::create_siparis(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Sipariş başarıyla oluşturuldu",
            "siparis_id": yeni.siparis_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/siparis/{siparis_id}", tag = "siparis",
    params(("siparis_id" = String, Path, description = "Sipariş kimliği")),
    responses((status = 200, description = "Sipariş bilgileri"), (status = 404, description = "Sipariş bulunamadı")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(siparis_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let siparis = siparis::get_siparis(&state.store, &siparis_id).await?;
    Ok(Json(json!({ "success": true, "data": siparis })))
}

#[utoipa::path(get, path = "/api/siparis", tag = "siparis",
    params(
        ("tedarikci_id" = Option<String>, Query, description = "Tedarikçiye göre süz"),
        ("personel_id" = Option<String>, Query, description = "Personele göre süz"),
        ("durum" = Option<String>, Query, description = "Duruma göre süz")),
    responses((status = 200, description = "Sipariş listesi")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(filtre): Query<SiparisFiltre>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let siparisler = siparis::list_siparisler(&state.store, &filtre).await?;
    Ok(Json(json!({ "success": true, "data": siparisler })))
}

#[utoipa::path(put, path = "/api/siparis/{siparis_id}/durum", tag = "siparis",
    params(("siparis_id" = String, Path, description = "Sipariş kimliği")),
    responses((status = 200, description = "Durum güncellendi"), (status = 404, description = "Sipariş bulunamadı")))]
pub async fn update_durum(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Path(siparis_id): Path<String>,
    Json(girdi): Json<DurumGuncelleme>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.yetki_kontrol(&personel, &["siparis_guncelleme"]).await?;
    siparis::update_siparis_durum(&state.store, &siparis_id, girdi.durum.as_deref()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Sipariş durumu başarıyla güncellendi",
    })))
}

/// Delivery booking: writes the entry movement and flips the order to
/// "teslim edildi".
#[utoipa::path(post, path = "/api/siparis/{siparis_id}/urun-girisi", tag = "siparis",
    params(("siparis_id" = String, Path, description = "Sipariş kimliği")),
    responses((status = 201, description = "Ürün girişi yapıldı"), (status = 404, description = "Sipariş bulunamadı")))]
pub async fn urun_girisi(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Path(siparis_id): Path<String>,
    Json(girdi): Json<UrunGirisiGirdisi>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["stok_ekleme"]).await?;
    let hareket = siparis::urun_girisi_yap(&state.store, &siparis_id, girdi.stok_miktari).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Ürün girişi başarıyla yapıldı",
            "stok_id": hareket.stok_id,
        })),
    ))
}
