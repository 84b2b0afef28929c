use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use models::personel::{Personel, YeniPersonel};
use models::rol::YeniRol;
use service::{personel, rol};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct PersonelListQuery {
    #[serde(default)]
    pub firma_id: Option<String>,
}

#[utoipa::path(post, path = "/api/personel", tag = "personel",
    request_body = crate::openapi::YeniPersonelRequest,
    responses((status = 201, description = "Personel başarıyla eklendi"), (status = 400, description = "Geçersiz girdi")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<YeniPersonel>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let yeni = personel::create_personel(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Personel başarıyla eklendi",
            "personel_id": yeni.personel_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/personel", tag = "personel",
    params(("firma_id" = Option<String>, Query, description = "Sadece bu firmanın personeli")),
    responses((status = 200, description = "Personel listesi")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PersonelListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let personeller =
        personel::list_personeller(&state.store, query.firma_id.as_deref()).await?;
    Ok(Json(json!({ "success": true, "data": personeller })))
}

#[utoipa::path(get, path = "/api/personel/{personel_id}/son-giris", tag = "personel",
    params(("personel_id" = String, Path, description = "Personel kimliği")),
    responses((status = 200, description = "Son giriş bilgisi"), (status = 404, description = "Personel bulunamadı")))]
pub async fn son_giris(
    State(state): State<ServerState>,
    Path(personel_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bilgi = personel::son_giris_bilgisi(&state.store, &personel_id).await?;
    Ok(Json(json!({ "success": true, "data": bilgi })))
}

#[utoipa::path(post, path = "/api/personel/roller", tag = "personel",
    request_body = crate::openapi::YeniRolRequest,
    responses((status = 201, description = "Rol başarıyla eklendi"), (status = 403, description = "Yetki yok")))]
pub async fn create_rol(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(input): Json<YeniRol>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["yonetici"]).await?;
    let yeni = rol::create_rol(&state.store, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Rol başarıyla eklendi",
            "rol_id": yeni.rol_id,
        })),
    ))
}

#[utoipa::path(get, path = "/api/personel/roller", tag = "personel",
    responses((status = 200, description = "Rol listesi")))]
pub async fn list_roller(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let roller = rol::list_roller(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": roller })))
}
