use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::alerts::AlertPublisher;
use super::predictor::SoilPredictor;
use super::repository::InsightRepository;
use super::sensors::{simulated_kit_readings, SensorReadings};
use super::service::{InsightService, InsightServiceError};
use crate::workflows::credit::{FarmerId, FarmerRepository};

/// Current readings reported for one kit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitSnapshot {
    #[serde(flatten)]
    pub readings: SensorReadings,
    pub timestamp: DateTime<Utc>,
}

/// Router builder exposing sensor uploads, insight history and kit lookups.
pub fn insight_router<P, F, I, A>(service: Arc<InsightService<P, F, I, A>>) -> Router
where
    P: SoilPredictor + 'static,
    F: FarmerRepository + 'static,
    I: InsightRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/farmers/:farmer_id/insights",
            post(process_handler::<P, F, I, A>).get(history_handler::<P, F, I, A>),
        )
        .route("/api/v1/kits/:serial", get(kit_handler))
        .with_state(service)
}

pub(crate) async fn process_handler<P, F, I, A>(
    State(service): State<Arc<InsightService<P, F, I, A>>>,
    Path(farmer_id): Path<String>,
    axum::Json(readings): axum::Json<SensorReadings>,
) -> Response
where
    P: SoilPredictor + 'static,
    F: FarmerRepository + 'static,
    I: InsightRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = FarmerId(farmer_id);
    match service.process(&id, readings) {
        Ok(insight) => (StatusCode::CREATED, axum::Json(insight)).into_response(),
        Err(InsightServiceError::Sensor(error)) => {
            let payload = json!({
                "farmer_id": id.0,
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(InsightServiceError::Prediction(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn history_handler<P, F, I, A>(
    State(service): State<Arc<InsightService<P, F, I, A>>>,
    Path(farmer_id): Path<String>,
) -> Response
where
    P: SoilPredictor + 'static,
    F: FarmerRepository + 'static,
    I: InsightRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = FarmerId(farmer_id);
    match service.history(&id) {
        Ok(insights) => {
            let payload = json!({
                "farmer_id": id.0,
                "count": insights.len(),
                "insights": insights,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn kit_handler(Path(serial): Path<String>) -> Response {
    let serial = serial.trim();
    if serial.is_empty() {
        let payload = json!({
            "error": "kit serial is required",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let snapshot = KitSnapshot {
        readings: simulated_kit_readings(serial),
        timestamp: Utc::now(),
    };
    (StatusCode::OK, axum::Json(snapshot)).into_response()
}

fn internal_error(error: InsightServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
