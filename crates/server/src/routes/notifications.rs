use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use models::personel::Personel;
use service::bildirim::{self, KullaniciBildirimGirdisi, RolBildirimGirdisi};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct BildirimListQuery {
    #[serde(default)]
    pub unread: Option<String>,
}

#[utoipa::path(get, path = "/api/notifications", tag = "notifications",
    params(("unread" = Option<String>, Query, description = "Sadece okunmamışlar için 'true'")),
    responses((status = 200, description = "Bildirim listesi")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Query(query): Query<BildirimListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let only_unread = query.unread.as_deref() == Some("true");
    let bildirimler =
        bildirim::list_user_notifications(&state.store, &personel.personel_id, only_unread)
            .await?;
    Ok(Json(json!({ "success": true, "data": bildirimler })))
}

#[utoipa::path(put, path = "/api/notifications/{notification_id}/read", tag = "notifications",
    params(("notification_id" = String, Path, description = "Bildirim kimliği")),
    responses((status = 200, description = "Okundu işaretlendi"), (status = 403, description = "Başkasının bildirimi"), (status = 404, description = "Bildirim bulunamadı")))]
pub async fn mark_read(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Path(notification_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bildirim =
        bildirim::mark_as_read(&state.store, &notification_id, &personel.personel_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Bildirim okundu olarak işaretlendi",
        "notification": bildirim,
    })))
}

#[utoipa::path(post, path = "/api/notifications/send/user", tag = "notifications",
    request_body = crate::openapi::KullaniciBildirimRequest,
    responses((status = 201, description = "Bildirim gönderildi"), (status = 403, description = "Yetki yok")))]
pub async fn send_user(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(girdi): Json<KullaniciBildirimGirdisi>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["bildirim_yonetimi"]).await?;
    let bildirim = bildirim::send_user_notification(&state.store, girdi).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Bildirim başarıyla gönderildi",
            "notification": bildirim,
        })),
    ))
}

#[utoipa::path(post, path = "/api/notifications/send/role", tag = "notifications",
    request_body = crate::openapi::RolBildirimRequest,
    responses((status = 201, description = "Bildirimler gönderildi"), (status = 403, description = "Yetki yok")))]
pub async fn send_role(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Json(girdi): Json<RolBildirimGirdisi>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.yetki_kontrol(&personel, &["bildirim_yonetimi"]).await?;
    let bildirimler = bildirim::send_role_notification(&state.store, girdi).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Bildirim {} kullanıcıya başarıyla gönderildi", bildirimler.len()),
            "count": bildirimler.len(),
        })),
    ))
}
