use super::super::domain::{ApplicantProfile, SoilObservation};

/// Caller contract violations. Inputs are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("asset value must be a finite, non-negative amount (found {0})")]
    NegativeAssetValue(f64),
    #[error("farming experience must be zero or more years (found {0})")]
    NegativeExperience(i32),
    #[error("soil quality score must lie within 0..=100 (found {0})")]
    SoilQualityOutOfRange(f64),
}

pub(crate) fn validate_profile(profile: &ApplicantProfile) -> Result<(), InvalidInputError> {
    if !profile.asset_value.is_finite() || profile.asset_value < 0.0 {
        return Err(InvalidInputError::NegativeAssetValue(profile.asset_value));
    }

    if profile.farming_experience_years < 0 {
        return Err(InvalidInputError::NegativeExperience(
            profile.farming_experience_years,
        ));
    }

    Ok(())
}

pub(crate) fn validate_observation(observation: &SoilObservation) -> Result<(), InvalidInputError> {
    validate_soil_quality(observation.quality_score)
}

pub(crate) fn validate_soil_quality(score: f64) -> Result<(), InvalidInputError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(InvalidInputError::SoilQualityOutOfRange(score))
    }
}
