mod catalog;
mod config;
mod loan;
mod offers;
mod rationale;
mod rules;
mod validation;

pub use catalog::PartnerCatalogError;
pub use config::ScoringConfig;
pub use validation::InvalidInputError;

pub(crate) use validation::validate_profile;

use super::domain::{ApplicantProfile, FinancialPartner, SoilObservation};
use serde::{Deserialize, Serialize};

/// Soil quality assumed when a farm has no reading on record.
pub const NEUTRAL_SOIL_QUALITY: f64 = 50.0;

/// Stateless engine that applies the credit-risk rubric to a profile snapshot.
#[derive(Debug, Clone, Default)]
pub struct RiskScoringEngine {
    config: ScoringConfig,
}

impl RiskScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Validate the inputs and run every scoring step, producing a complete result.
    pub fn evaluate(
        &self,
        profile: &ApplicantProfile,
        soil: Option<&SoilObservation>,
    ) -> Result<ScoringResult, InvalidInputError> {
        validate_profile(profile)?;
        if let Some(observation) = soil {
            validation::validate_observation(observation)?;
        }

        let (adjustments, risk_score) = rules::score_profile(profile, soil);
        let risk_category = categorize(risk_score);
        let soil_quality = soil
            .map(|observation| observation.quality_score)
            .unwrap_or(NEUTRAL_SOIL_QUALITY);
        let loan_ceiling = loan::compute_loan_ceiling(
            risk_score,
            profile.asset_value,
            profile.farming_experience_years,
            soil_quality,
        );
        let rationale = rationale::generate_rationale(profile, risk_score, risk_category);
        let ranked_offers =
            offers::rank_offers(risk_category, loan_ceiling, self.config.partners());

        Ok(ScoringResult {
            risk_score,
            risk_category,
            loan_ceiling,
            rationale,
            ranked_offers,
            adjustments,
        })
    }
}

/// Bounded risk score in `0..=100`; lower is safer.
pub fn compute_risk_score(
    profile: &ApplicantProfile,
    soil: Option<&SoilObservation>,
) -> Result<u8, InvalidInputError> {
    validate_profile(profile)?;
    if let Some(observation) = soil {
        validation::validate_observation(observation)?;
    }
    Ok(rules::score_profile(profile, soil).1)
}

pub fn categorize(risk_score: u8) -> RiskCategory {
    rules::categorize(risk_score)
}

pub fn compute_loan_ceiling(
    risk_score: u8,
    asset_value: f64,
    experience_years: i32,
    soil_quality: f64,
) -> Result<u64, InvalidInputError> {
    if !asset_value.is_finite() || asset_value < 0.0 {
        return Err(InvalidInputError::NegativeAssetValue(asset_value));
    }
    if experience_years < 0 {
        return Err(InvalidInputError::NegativeExperience(experience_years));
    }
    validation::validate_soil_quality(soil_quality)?;

    Ok(loan::compute_loan_ceiling(
        risk_score,
        asset_value,
        experience_years,
        soil_quality,
    ))
}

pub fn generate_rationale(
    profile: &ApplicantProfile,
    risk_score: u8,
    risk_category: RiskCategory,
) -> String {
    rationale::generate_rationale(profile, risk_score, risk_category)
}

/// Phrases cited in the rationale, in presentation order.
pub fn rationale_factors(profile: &ApplicantProfile) -> Vec<String> {
    rationale::rationale_factors(profile)
}

pub fn rank_offers(
    risk_category: RiskCategory,
    loan_ceiling: u64,
    partners: &[FinancialPartner],
) -> Vec<RankedOffer> {
    offers::rank_offers(risk_category, loan_ceiling, partners)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }

    /// Interest-rate loading lenders apply to this category.
    pub const fn rate_multiplier(self) -> f64 {
        match self {
            RiskCategory::Low => 1.0,
            RiskCategory::Medium => 1.15,
            RiskCategory::High => 1.35,
        }
    }
}

/// Rubric dimension behind a score adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    CooperativeMembership,
    Education,
    Experience,
    AssetValue,
    LossHistory,
    ActiveLoans,
    DefaultedLoans,
    SoilQuality,
}

/// Discrete contribution to the risk score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub factor: RiskFactor,
    pub points: i32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOffer {
    pub partner_name: String,
    pub adjusted_rate_percent: f64,
    pub max_offer_amount: u64,
    pub distance_km: f64,
}

/// Everything the engine derives from one profile snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub risk_score: u8,
    pub risk_category: RiskCategory,
    pub loan_ceiling: u64,
    pub rationale: String,
    pub ranked_offers: Vec<RankedOffer>,
    pub adjustments: Vec<ScoreAdjustment>,
}
