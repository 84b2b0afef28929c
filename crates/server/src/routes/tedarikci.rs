use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;

use models::personel::Personel;
use models::tedarikci::YeniTedarikci;
use service::tedarikci;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/api/tedarikci", tag = "tedarikci",
    request_body = crate::openapi::YeniTedarikciRequest,
    responses((status = 201, description = "Tedarikçi başarıyla eklendi"), (status = 403, description = "Yetki yok")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(input): Json<YeniTedarikci>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["tedarikci_yonetimi"]).await?;
    let yeni = tedarikci::create_tedarikci(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Tedarikçi başarıyla eklendi",
            "tedarikci_id": yeni.tedarikci_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/tedarikci", tag = "tedarikci",
    responses((status = 200, description = "Tedarikçi listesi")))]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tedarikciler = tedarikci::list_tedarikciler(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": tedarikciler })))
}

#[utoipa::path(get, path = "/api/tedarikci/{tedarikci_id}", tag = "tedarikci",
    params(("tedarikci_id" = String, Path, description = "Tedarikçi kimliği")),
    responses((status = 200, description = "Tedarikçi bilgileri"), (status = 404, description = "Tedarikçi bulunamadı")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(tedarikci_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tedarikci = tedarikci::get_tedarikci(&state.store, &tedarikci_id).await?;
    Ok(Json(json!({ "success": true, "data": tedarikci })))
}
