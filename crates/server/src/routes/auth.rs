use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use configs::AppConfig;
use models::personel::{Personel, PersonelSanitized};
use service::{
    auth::{
        domain::LoginInput,
        service::{AuthConfig, AuthService},
    },
    storage::depo::DepoStore,
};

use crate::errors::ApiError;

pub const AUTH_COOKIE: &str = "auth_token";

/// Shared state for every handler: the document store, the auth service
/// bound to it, and the loaded configuration.
#[derive(Clone)]
pub struct ServerState {
    pub store: DepoStore,
    pub auth: Arc<AuthService<DepoStore>>,
    pub cfg: Arc<AppConfig>,
}

impl ServerState {
    pub fn new(store: DepoStore, cfg: AppConfig) -> Self {
        let auth = AuthService::new(
            Arc::new(store.clone()),
            AuthConfig {
                jwt_secret: cfg.auth.jwt_secret.clone(),
                token_ttl_hours: cfg.auth.token_ttl_hours,
            },
        );
        Self { store, auth: Arc::new(auth), cfg: Arc::new(cfg) }
    }

    /// Permission gate used by handlers after `require_bearer` has resolved
    /// the caller.
    pub async fn yetki_kontrol(
        &self,
        personel: &Personel,
        required: &[&str],
    ) -> Result<(), ApiError> {
        Ok(self.auth.authorize(personel, required).await?)
    }
}

#[derive(Serialize)]
pub struct GirisKullanici {
    #[serde(flatten)]
    pub personel: PersonelSanitized,
    pub yetkiler: Vec<String>,
}

#[derive(Serialize)]
pub struct GirisCikti {
    pub success: bool,
    pub message: String,
    pub user: GirisKullanici,
    pub token: String,
}

/// Login. On success the token is returned in the body and also set as an
/// `auth_token` cookie so browser clients keep working without storing it.
#[utoipa::path(post, path = "/api/personel/giris", tag = "personel",
    request_body = crate::openapi::GirisRequest,
    responses((status = 200, description = "Giriş başarılı"), (status = 401, description = "Geçersiz kimlik")))]
pub async fn giris(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<GirisCikti>), ApiError> {
    let session = state.auth.login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = GirisCikti {
        success: true,
        message: "Giriş başarılı".into(),
        user: GirisKullanici {
            personel: session.personel.sanitized(),
            yetkiler: session.yetkiler,
        },
        token: session.token,
    };
    Ok((jar, Json(out)))
}

/// Middleware for the protected subtree: resolves the caller from the
/// `Authorization: Bearer` header (cookie fallback) and stores the staff
/// record in request extensions.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(&req) {
        Some(t) => t,
        None => {
            tracing::warn!(path = %req.uri().path(), "istek token tasimiyor");
            return Err(ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Yetkilendirme hatası: Token sağlanmadı",
            ));
        }
    };

    let personel = state.auth.identify(&token).await?;
    req.extensions_mut().insert(personel);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    let headers = req.headers();
    if let Some(h) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(rest) = h.strip_prefix("Bearer ") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }

    // Cookie fallback for browser clients
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    for part in cookie_header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}
