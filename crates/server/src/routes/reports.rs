use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use models::personel::Personel;
use service::report::{self, SiparisRaporFiltre};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct StokRaporQuery {
    #[serde(default)]
    pub urun_kodu: Option<String>,
}

#[utoipa::path(get, path = "/api/reports/stock-status", tag = "reports",
    params(("urun_kodu" = Option<String>, Query, description = "Tek ürüne indirge")),
    responses((status = 200, description = "Stok durum raporu"), (status = 403, description = "Yetki yok")))]
pub async fn stock_status(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Query(query): Query<StokRaporQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .yetki_kontrol(&personel, &["stok_goruntuleme", "rapor_goruntuleme"])
        .await?;
    let rapor = report::stock_status_report(&state.store, query.urun_kodu.as_deref()).await?;
    Ok(Json(json!({ "success": true, "data": rapor })))
}

#[utoipa::path(get, path = "/api/reports/order-status", tag = "reports",
    params(
        ("tedarikci_id" = Option<String>, Query, description = "Tedarikçiye göre süz"),
        ("durum" = Option<String>, Query, description = "Duruma göre süz")),
    responses((status = 200, description = "Sipariş durum raporu"), (status = 403, description = "Yetki yok")))]
pub async fn order_status(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
    Query(filtre): Query<SiparisRaporFiltre>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .yetki_kontrol(&personel, &["siparis_goruntuleme", "rapor_goruntuleme"])
        .await?;
    let rapor = report::order_status_report(&state.store, &filtre).await?;
    Ok(Json(json!({ "success": true, "data": rapor })))
}

#[utoipa::path(get, path = "/api/reports/supplier-performance", tag = "reports",
    responses((status = 200, description = "Tedarikçi performans raporu"), (status = 403, description = "Yetki yok")))]
pub async fn supplier_performance(
    State(state): State<ServerState>,
    Extension(personel): Extension<Personel>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.yetki_kontrol(&personel, &["rapor_goruntuleme"]).await?;
    let rapor = report::supplier_report(&state.store).await?;
    Ok(Json(json!({ "success": true, "data": rapor })))
}
