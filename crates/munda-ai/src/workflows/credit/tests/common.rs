use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::credit::domain::{
    ApplicantProfile, EducationLevel, FarmerId, FinancialPartner, LoanRecord, LoanStatus,
    LossHistory, SoilObservation,
};
use crate::workflows::credit::repository::{
    CreditScoreRecord, CreditScoreRepository, FarmerRepository, RepositoryError,
};
use crate::workflows::credit::{CreditScoringService, ScoringConfig};

pub(super) fn established_profile() -> ApplicantProfile {
    ApplicantProfile {
        cooperative_member: true,
        education_level: EducationLevel::Tertiary,
        farming_experience_years: 12,
        asset_value: 120_000.0,
        loss_history: LossHistory::default(),
        loans: Vec::new(),
    }
}

pub(super) fn fragile_profile() -> ApplicantProfile {
    ApplicantProfile {
        cooperative_member: false,
        education_level: EducationLevel::None,
        farming_experience_years: 1,
        asset_value: 5_000.0,
        loss_history: LossHistory {
            drought: true,
            mudslide: true,
            ..LossHistory::default()
        },
        loans: vec![loan(LoanStatus::Defaulted)],
    }
}

/// Sits in the middle of every tier so individual rules can be toggled in isolation.
pub(super) fn neutral_profile() -> ApplicantProfile {
    ApplicantProfile {
        cooperative_member: true,
        education_level: EducationLevel::Primary,
        farming_experience_years: 3,
        asset_value: 20_000.0,
        loss_history: LossHistory::default(),
        loans: Vec::new(),
    }
}

pub(super) fn loan(status: LoanStatus) -> LoanRecord {
    LoanRecord {
        amount: 10_000.0,
        status,
        institution: Some("Equity Bank".to_string()),
    }
}

pub(super) fn soil(quality_score: f64) -> SoilObservation {
    SoilObservation { quality_score }
}

pub(super) fn partner(name: &str, rate: f64, distance_km: f64) -> FinancialPartner {
    FinancialPartner {
        name: name.to_string(),
        base_interest_rate_percent: rate,
        distance_km,
    }
}

pub(super) fn farmer(id: &str) -> FarmerId {
    FarmerId(id.to_string())
}

pub(super) fn build_service() -> (
    CreditScoringService<MemoryFarmers, MemoryScores>,
    Arc<MemoryFarmers>,
    Arc<MemoryScores>,
) {
    let farmers = Arc::new(MemoryFarmers::default());
    let scores = Arc::new(MemoryScores::default());
    let service =
        CreditScoringService::new(farmers.clone(), scores.clone(), ScoringConfig::standard());
    (service, farmers, scores)
}

#[derive(Default, Clone)]
pub(super) struct MemoryFarmers {
    profiles: Arc<Mutex<HashMap<FarmerId, ApplicantProfile>>>,
    observations: Arc<Mutex<HashMap<FarmerId, Vec<SoilObservation>>>>,
}

impl FarmerRepository for MemoryFarmers {
    fn upsert_profile(
        &self,
        farmer_id: &FarmerId,
        profile: ApplicantProfile,
    ) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(farmer_id.clone(), profile);
        Ok(())
    }

    fn fetch_profile(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Option<ApplicantProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(farmer_id).cloned())
    }

    fn record_observation(
        &self,
        farmer_id: &FarmerId,
        observation: SoilObservation,
    ) -> Result<(), RepositoryError> {
        self.observations
            .lock()
            .expect("observation mutex poisoned")
            .entry(farmer_id.clone())
            .or_default()
            .push(observation);
        Ok(())
    }

    fn latest_observation(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Option<SoilObservation>, RepositoryError> {
        let guard = self.observations.lock().expect("observation mutex poisoned");
        Ok(guard
            .get(farmer_id)
            .and_then(|history| history.last().copied()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryScores {
    records: Arc<Mutex<HashMap<FarmerId, CreditScoreRecord>>>,
}

impl CreditScoreRepository for MemoryScores {
    fn upsert(&self, record: CreditScoreRecord) -> Result<CreditScoreRecord, RepositoryError> {
        self.records
            .lock()
            .expect("score mutex poisoned")
            .insert(record.farmer_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, farmer_id: &FarmerId) -> Result<Option<CreditScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("score mutex poisoned");
        Ok(guard.get(farmer_id).cloned())
    }
}

pub(super) struct UnavailableScores;

impl CreditScoreRepository for UnavailableScores {
    fn upsert(&self, _record: CreditScoreRecord) -> Result<CreditScoreRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _farmer_id: &FarmerId) -> Result<Option<CreditScoreRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
