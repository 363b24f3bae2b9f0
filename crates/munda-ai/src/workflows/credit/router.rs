use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use serde_json::json;

use super::domain::{ApplicantProfile, FarmerId};
use super::repository::{CreditScoreRepository, FarmerRepository, RepositoryError};
use super::service::{CreditScoringService, CreditServiceError};

/// Router builder exposing profile registration and credit scoring endpoints.
pub fn credit_router<F, C>(service: Arc<CreditScoringService<F, C>>) -> Router
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/farmers/:farmer_id/profile",
            put(register_profile_handler::<F, C>),
        )
        .route(
            "/api/v1/farmers/:farmer_id/credit-score",
            post(calculate_handler::<F, C>).get(fetch_handler::<F, C>),
        )
        .with_state(service)
}

pub(crate) async fn register_profile_handler<F, C>(
    State(service): State<Arc<CreditScoringService<F, C>>>,
    Path(farmer_id): Path<String>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
{
    let id = FarmerId(farmer_id);
    match service.register_profile(&id, profile) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(&id, err, "farmer not found"),
    }
}

pub(crate) async fn calculate_handler<F, C>(
    State(service): State<Arc<CreditScoringService<F, C>>>,
    Path(farmer_id): Path<String>,
) -> Response
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
{
    let id = FarmerId(farmer_id);
    match service.calculate(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(&id, err, "farmer profile not registered"),
    }
}

pub(crate) async fn fetch_handler<F, C>(
    State(service): State<Arc<CreditScoringService<F, C>>>,
    Path(farmer_id): Path<String>,
) -> Response
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
{
    let id = FarmerId(farmer_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(&id, err, "credit score not found, calculate it first"),
    }
}

fn error_response(farmer_id: &FarmerId, err: CreditServiceError, not_found: &str) -> Response {
    match err {
        CreditServiceError::InvalidInput(error) => {
            let payload = json!({
                "farmer_id": farmer_id.0,
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        CreditServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "farmer_id": farmer_id.0,
                "error": not_found,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
