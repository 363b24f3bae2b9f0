use crate::cli::ServeArgs;
use crate::infra::{
    scoring_config, AppState, InMemoryAlertPublisher, InMemoryCreditScoreRepository,
    InMemoryFarmerRepository, InMemoryInsightRepository,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use munda_ai::config::AppConfig;
use munda_ai::error::AppError;
use munda_ai::telemetry;
use munda_ai::workflows::agronomy::{HeuristicSoilPredictor, InsightService};
use munda_ai::workflows::credit::{CreditScoringService, RiskScoringEngine};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.apply_overrides(args.host, args.port);

    telemetry::init(&config.telemetry)?;

    let scoring = scoring_config(&config.scoring)?;
    let partner_count = scoring.partners().len();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(RiskScoringEngine::new(scoring.clone())),
    };

    let farmers = Arc::new(InMemoryFarmerRepository::default());
    let scores = Arc::new(InMemoryCreditScoreRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let credit_service = Arc::new(CreditScoringService::new(
        farmers.clone(),
        scores,
        scoring,
    ));
    let insight_service = Arc::new(InsightService::new(
        Arc::new(HeuristicSoilPredictor),
        farmers,
        Arc::new(InMemoryInsightRepository::default()),
        alerts,
    ));

    let app = with_service_routes(credit_service, insight_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.as_str(),
        %addr,
        partners = partner_count,
        "munda-ai credit scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
