use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{ApplicantProfile, FarmerId};
use super::repository::{
    CreditScoreRecord, CreditScoreRepository, FarmerRepository, RepositoryError, ScoringFactors,
};
use super::scoring::{
    validate_profile, InvalidInputError, RiskScoringEngine, ScoringConfig, NEUTRAL_SOIL_QUALITY,
};

/// Service composing the farmer store, the score store, and the scoring engine.
pub struct CreditScoringService<F, C> {
    farmers: Arc<F>,
    scores: Arc<C>,
    engine: Arc<RiskScoringEngine>,
}

impl<F, C> CreditScoringService<F, C>
where
    F: FarmerRepository + 'static,
    C: CreditScoreRepository + 'static,
{
    pub fn new(farmers: Arc<F>, scores: Arc<C>, config: ScoringConfig) -> Self {
        Self {
            farmers,
            scores,
            engine: Arc::new(RiskScoringEngine::new(config)),
        }
    }

    /// Store or replace the applicant profile after validating it.
    pub fn register_profile(
        &self,
        farmer_id: &FarmerId,
        profile: ApplicantProfile,
    ) -> Result<ApplicantProfile, CreditServiceError> {
        if let Err(err) = validate_profile(&profile) {
            warn!(farmer_id = %farmer_id.0, error = %err, "rejected applicant profile");
            return Err(err.into());
        }

        self.farmers.upsert_profile(farmer_id, profile.clone())?;
        Ok(profile)
    }

    /// Score the farmer from the stored profile and latest soil reading, then persist it.
    pub fn calculate(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<CreditScoreRecord, CreditServiceError> {
        let profile = self
            .farmers
            .fetch_profile(farmer_id)?
            .ok_or(RepositoryError::NotFound)?;
        let observation = self.farmers.latest_observation(farmer_id)?;

        let result = match self.engine.evaluate(&profile, observation.as_ref()) {
            Ok(result) => result,
            Err(err) => {
                warn!(farmer_id = %farmer_id.0, error = %err, "credit scoring rejected input");
                return Err(err.into());
            }
        };

        let soil_quality = observation
            .map(|observation| observation.quality_score)
            .unwrap_or(NEUTRAL_SOIL_QUALITY);
        let now = Utc::now();
        let previous = self.scores.fetch(farmer_id)?;
        let record = CreditScoreRecord {
            farmer_id: farmer_id.clone(),
            factors: ScoringFactors::capture(&profile, soil_quality),
            result,
            calculated_at: now,
            updated_at: now,
        }
        .superseding(previous.as_ref());

        let stored = self.scores.upsert(record)?;
        info!(
            farmer_id = %farmer_id.0,
            risk_score = stored.result.risk_score,
            risk_category = stored.result.risk_category.label(),
            loan_ceiling = stored.result.loan_ceiling,
            "credit score calculated"
        );
        Ok(stored)
    }

    /// Fetch the latest stored score.
    pub fn get(&self, farmer_id: &FarmerId) -> Result<CreditScoreRecord, CreditServiceError> {
        let record = self
            .scores
            .fetch(farmer_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn engine(&self) -> &RiskScoringEngine {
        &self.engine
    }
}

/// Error raised by the credit scoring service.
#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
