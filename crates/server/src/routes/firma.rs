use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;

use models::firma::{FirmaGuncelle, YeniFirma};
use models::personel::Personel;
use service::firma;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/api/firma", tag = "firma",
    request_body = crate::openapi::YeniFirmaRequest,
    responses((status = 201, description = "Firma başarıyla eklendi"), (status = 400, description = "Geçersiz girdi")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<YeniFirma>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let firma = firma::create_firma(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Firma başarıyla eklendi",
            "firma_id": firma.firma_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/firma/{firma_id}", tag = "firma",
    params(("firma_id" = String, Path, description = "Firma kimliği")),
    responses((status = 200, description = "Firma bilgileri"), (status = 404, description = "Firma bulunamadı")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(firma_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let firma = firma::get_firma(&state.store, &firma_id).await?;
    Ok(Json(json!({ "success": true, "data": firma })))
}

#[utoipa::path(put, path = "/api/firma/{firma_id}", tag = "firma",
    params(("firma_id" = String, Path, description = "Firma kimliği")),
    responses((status = 200, description = "Firma güncellendi"), (status = 404, description = "Firma bulunamadı")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Path(firma_id): Path<String>,
    Json(input): Json<FirmaGuncelle>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.yetki_kontrol(&personel, &["firma_yonetimi"]).await?;
    firma::update_firma(&state.store, &firma_id, input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Firma bilgileri başarıyla güncellendi",
    })))
}

#[utoipa::path(get, path = "/api/firma", tag = "firma",
    responses((status = 200, description = "Firma listesi")))]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let firmalar = firma::list_firmalar(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": firmalar })))
}
