use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::credit::{InvalidInputError, PartnerCatalogError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Top-level error for the binary and for handlers that are not tied to a single service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("partner catalog error: {0}")]
    Partners(#[from] PartnerCatalogError),
    #[error("scoring error: {0}")]
    Scoring(#[from] InvalidInputError),
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl AppError {
    /// Short machine-readable tag returned alongside the message.
    pub const fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Telemetry(_) => "telemetry",
            AppError::Io(_) => "io",
            AppError::Partners(_) => "partner_catalog",
            AppError::Scoring(_) => "invalid_input",
            AppError::Payload(_) => "payload",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Partners(_) | AppError::Payload(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string(), "kind": self.kind() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_errors_map_to_unprocessable_entity() {
        let err = AppError::from(InvalidInputError::NegativeExperience(-3));
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn malformed_payloads_stay_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_errors_map_to_internal_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_keeps_the_underlying_cause() {
        let err = AppError::from(ConfigError::InvalidPort {
            value: "eighty".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "configuration error: APP_PORT must be a valid u16, got 'eighty'"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
