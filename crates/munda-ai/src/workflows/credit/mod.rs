//! Farmer credit-risk scoring: the deterministic rubric plus the service and routes around it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, EducationLevel, FarmerId, FinancialPartner, LoanRecord, LoanStatus,
    LossHistory, SoilObservation,
};
pub use repository::{
    CreditScoreRecord, CreditScoreRepository, FarmerRepository, RepositoryError, ScoringFactors,
};
pub use router::credit_router;
pub use scoring::{
    categorize, compute_loan_ceiling, compute_risk_score, generate_rationale, rank_offers,
    rationale_factors, InvalidInputError, PartnerCatalogError, RankedOffer, RiskCategory,
    RiskFactor, RiskScoringEngine, ScoreAdjustment, ScoringConfig, ScoringResult,
    NEUTRAL_SOIL_QUALITY,
};
pub use service::{CreditScoringService, CreditServiceError};
