use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::observability;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod firma;
pub mod notifications;
pub mod personel;
pub mod reports;
pub mod siparis;
pub mod stok;
pub mod tedarikci;

use auth::ServerState;

#[utoipa::path(get, path = "/api/health", tag = "health",
    responses((status = 200, description = "Sağlık durumu")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

#[utoipa::path(get, path = "/api/status", tag = "health",
    responses((status = 200, description = "API ve depo durumu")))]
pub async fn status(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let store = match state.store.firmalar.list().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };
    Json(serde_json::json!({ "status": "API is running", "store": store }))
}

#[utoipa::path(post, path = "/api/setup-database", tag = "health",
    responses((status = 200, description = "Koleksiyonlar ve varsayılan roller hazır"), (status = 500, description = "Kurulum hatası")))]
pub async fn setup_database(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    service::seed::setup_database(&state.store)
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(serde_json::json!({ "message": "Database setup completed" })))
}

pub async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: public endpoints, the bearer-guarded
/// API subtree, static uploads, Swagger UI and metrics.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/status", get(status))
        .route("/api/setup-database", post(setup_database))
        .route("/api/firma", post(firma::create).get(firma::list))
        .route("/api/personel", post(personel::create))
        .route("/api/personel/giris", post(auth::giris))
        .route("/api/tedarikci", get(tedarikci::list))
        .route("/api/tedarikci/:tedarikci_id", get(tedarikci::get));

    // Everything below runs behind require_bearer; handlers do their own
    // permission checks on top of the resolved staff record.
    let protected = Router::new()
        .route("/api/firma/:firma_id", get(firma::get).put(firma::update))
        .route("/api/personel", get(personel::list))
        .route(
            "/api/personel/roller",
            post(personel::create_rol).get(personel::list_roller),
        )
        .route("/api/personel/:personel_id/son-giris", get(personel::son_giris))
        .route("/api/tedarikci", post(tedarikci::create))
        .route("/api/siparis", post(siparis::create).get(siparis::list))
        .route("/api/siparis/:siparis_id", get(siparis::get))
        .route("/api/siparis/:siparis_id/durum", put(siparis::update_durum))
        .route("/api/siparis/:siparis_id/urun-girisi", post(siparis::urun_girisi))
        .route("/api/stok/urunler", post(stok::urun_ekle).get(stok::urun_listesi))
        .route("/api/stok/urunler/:urun_id/gorsel", post(stok::gorsel_yukle))
        .route("/api/stok/cikis", post(stok::cikis))
        .route("/api/stok/hareketler", get(stok::hareketler))
        .route("/api/stok/durum", get(stok::durum))
        .route("/api/reports/stock-status", get(reports::stock_status))
        .route("/api/reports/order-status", get(reports::order_status))
        .route(
            "/api/reports/supplier-performance",
            get(reports::supplier_performance),
        )
        .route("/api/notifications", get(notifications::list))
        .route(
            "/api/notifications/:notification_id/read",
            put(notifications::mark_read),
        )
        .route("/api/notifications/send/user", post(notifications::send_user))
        .route("/api/notifications/send/role", post(notifications::send_role))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    public
        .merge(protected)
        .route("/metrics", get(metrics))
        .nest_service("/uploads", ServeDir::new(state.cfg.uploads.dir.clone()))
        .merge(docs)
        .with_state(state)
        .layer(middleware::from_fn(observability::track_metrics))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
