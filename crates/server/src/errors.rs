use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body every endpoint shares: `{"success": false, "error": msg}`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, err = %self.message, "request failed");
        }
        (
            self.status,
            Json(serde_json::json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) | ServiceError::Conflict(_) | ServiceError::Model(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (ServiceError::Validation("geçersiz".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("mevcut".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("bulunamadı".into()), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("yasak".into()), StatusCode::FORBIDDEN),
            (ServiceError::Store("io".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn display_shows_the_message() {
        let err = ApiError::new(StatusCode::BAD_REQUEST, "firma_ad alanı zorunludur");
        assert_eq!(err.to_string(), "firma_ad alanı zorunludur");
    }

    #[test]
    fn auth_errors_map_to_expected_statuses() {
        let unauthorized = AuthError::Unauthorized("Geçersiz e-posta veya şifre".into());
        assert_eq!(ApiError::from(unauthorized).status, StatusCode::UNAUTHORIZED);
        let forbidden = AuthError::Forbidden("yetki yok".into());
        assert_eq!(ApiError::from(forbidden).status, StatusCode::FORBIDDEN);
    }
}
