use metrics_exporter_prometheus::PrometheusHandle;
use munda_ai::config::ScoringSettings;
use munda_ai::workflows::agronomy::{
    AlertError, AlertPublisher, FarmerAlert, FieldInsight, InsightRepository,
};
use munda_ai::workflows::credit::{
    ApplicantProfile, CreditScoreRecord, CreditScoreRepository, FarmerId, FarmerRepository,
    PartnerCatalogError, RepositoryError, RiskScoringEngine, ScoringConfig, SoilObservation,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<RiskScoringEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFarmerRepository {
    profiles: Arc<Mutex<HashMap<FarmerId, ApplicantProfile>>>,
    observations: Arc<Mutex<HashMap<FarmerId, SoilObservation>>>,
}

impl FarmerRepository for InMemoryFarmerRepository {
    fn upsert_profile(
        &self,
        farmer_id: &FarmerId,
        profile: ApplicantProfile,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        guard.insert(farmer_id.clone(), profile);
        Ok(())
    }

    fn fetch_profile(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Option<ApplicantProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(farmer_id).cloned())
    }

    fn record_observation(
        &self,
        farmer_id: &FarmerId,
        observation: SoilObservation,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.observations.lock().expect("repository mutex poisoned");
        guard.insert(farmer_id.clone(), observation);
        Ok(())
    }

    fn latest_observation(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Option<SoilObservation>, RepositoryError> {
        let guard = self.observations.lock().expect("repository mutex poisoned");
        Ok(guard.get(farmer_id).copied())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCreditScoreRepository {
    records: Arc<Mutex<HashMap<FarmerId, CreditScoreRecord>>>,
}

impl CreditScoreRepository for InMemoryCreditScoreRepository {
    fn upsert(&self, record: CreditScoreRecord) -> Result<CreditScoreRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.farmer_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, farmer_id: &FarmerId) -> Result<Option<CreditScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(farmer_id).cloned())
    }
}

/// Insights per farmer in recording order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInsightRepository {
    insights: Arc<Mutex<HashMap<FarmerId, Vec<FieldInsight>>>>,
}

impl InsightRepository for InMemoryInsightRepository {
    fn record(&self, insight: FieldInsight) -> Result<(), RepositoryError> {
        let mut guard = self.insights.lock().expect("repository mutex poisoned");
        guard
            .entry(insight.farmer_id.clone())
            .or_default()
            .push(insight);
        Ok(())
    }

    fn latest(
        &self,
        farmer_id: &FarmerId,
        limit: usize,
    ) -> Result<Vec<FieldInsight>, RepositoryError> {
        let guard = self.insights.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(farmer_id)
            .map(|list| list.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<FarmerAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: FarmerAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<FarmerAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

/// Partner catalog from `APP_PARTNERS_CSV` when set, otherwise the built-in banks.
pub(crate) fn scoring_config(
    settings: &ScoringSettings,
) -> Result<ScoringConfig, PartnerCatalogError> {
    match &settings.partners_csv {
        Some(path) => {
            let config = ScoringConfig::from_path(path)?;
            info!(
                path = %path.display(),
                partners = config.partners().len(),
                "loaded partner catalog"
            );
            Ok(config)
        }
        None => Ok(ScoringConfig::standard()),
    }
}
