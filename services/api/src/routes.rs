use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use munda_ai::error::AppError;
use munda_ai::workflows::agronomy::{
    insight_router, AlertPublisher, InsightRepository, InsightService, SoilPredictor,
};
use munda_ai::workflows::credit::{
    credit_router, ApplicantProfile, CreditScoreRepository, CreditScoringService,
    FarmerRepository, ScoringResult, SoilObservation,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Ad-hoc scoring request that is evaluated without touching the stores.
#[derive(Debug, Deserialize)]
pub(crate) struct ScorePreviewRequest {
    pub(crate) profile: ApplicantProfile,
    #[serde(default)]
    pub(crate) soil_quality: Option<f64>,
}

pub(crate) fn with_service_routes<F, C, P, I, A>(
    credit: Arc<CreditScoringService<F, C>>,
    insights: Arc<InsightService<P, F, I, A>>,
) -> axum::Router
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
    P: SoilPredictor + 'static,
    I: InsightRepository + 'static,
    A: AlertPublisher + 'static,
{
    credit_router(credit)
        .merge(insight_router(insights))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/credit-score/preview",
            axum::routing::post(score_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScorePreviewRequest>,
) -> Result<Json<ScoringResult>, AppError> {
    let ScorePreviewRequest {
        profile,
        soil_quality,
    } = payload;

    let observation = soil_quality.map(|quality_score| SoilObservation { quality_score });
    let result = state.engine.evaluate(&profile, observation.as_ref())?;
    Ok(Json(result))
}
