// Error handling and response types for the Copra API
// Every error returns a JSON body with a human-readable `detail` field.

use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;

use copra_consul_client::KvError;

/// API-level errors mapped to HTTP status codes
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

impl From<KvError> for ApiError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Unreachable { ref setup, .. } => {
                ApiError::NotFound(format!("Error: Setup '{}' is not accessible.", setup))
            }
            other => ApiError::Internal(format!("Error: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::ResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unreachable_maps_to_not_found() {
        let err = ApiError::from(KvError::Unreachable {
            setup: "prod".to_string(),
            reason: "connect refused".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound(ref m) if m.contains("prod")));
    }
}
