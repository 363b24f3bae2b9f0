use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, EducationLevel, FarmerId, LossHistory, SoilObservation};
use super::scoring::ScoringResult;

/// Latest persisted score for a farmer together with the inputs it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreRecord {
    pub farmer_id: FarmerId,
    pub result: ScoringResult,
    pub factors: ScoringFactors,
    pub calculated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditScoreRecord {
    /// Carry the original calculation timestamp forward when a score is recomputed.
    pub fn superseding(mut self, previous: Option<&CreditScoreRecord>) -> Self {
        if let Some(previous) = previous {
            self.calculated_at = previous.calculated_at;
        }
        self
    }
}

/// Snapshot of the profile fields and soil reading used for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactors {
    pub cooperative_member: bool,
    pub education_level: EducationLevel,
    pub farming_experience_years: i32,
    pub asset_value: f64,
    pub loss_history: LossHistory,
    pub active_loans: usize,
    pub soil_quality: f64,
}

impl ScoringFactors {
    pub fn capture(profile: &ApplicantProfile, soil_quality: f64) -> Self {
        Self {
            cooperative_member: profile.cooperative_member,
            education_level: profile.education_level,
            farming_experience_years: profile.farming_experience_years,
            asset_value: profile.asset_value,
            loss_history: profile.loss_history,
            active_loans: profile.active_loan_count(),
            soil_quality,
        }
    }
}

/// Storage for applicant profiles and the soil observations recorded against them.
pub trait FarmerRepository: Send + Sync {
    fn upsert_profile(
        &self,
        farmer_id: &FarmerId,
        profile: ApplicantProfile,
    ) -> Result<(), RepositoryError>;
    fn fetch_profile(&self, farmer_id: &FarmerId)
        -> Result<Option<ApplicantProfile>, RepositoryError>;
    fn record_observation(
        &self,
        farmer_id: &FarmerId,
        observation: SoilObservation,
    ) -> Result<(), RepositoryError>;
    fn latest_observation(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Option<SoilObservation>, RepositoryError>;
}

/// Storage for the latest credit score per farmer. `upsert` is last-writer-wins.
pub trait CreditScoreRepository: Send + Sync {
    fn upsert(&self, record: CreditScoreRecord) -> Result<CreditScoreRecord, RepositoryError>;
    fn fetch(&self, farmer_id: &FarmerId) -> Result<Option<CreditScoreRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
