use super::common::*;
use crate::workflows::credit::domain::LoanStatus;
use crate::workflows::credit::repository::{CreditScoreRepository, FarmerRepository, RepositoryError};
use crate::workflows::credit::{
    CreditScoringService, CreditServiceError, InvalidInputError, RiskCategory, ScoringConfig,
};
use std::sync::Arc;

#[test]
fn register_rejects_negative_assets_without_storing() {
    let (service, farmers, _) = build_service();
    let mut profile = neutral_profile();
    profile.asset_value = -10.0;

    match service.register_profile(&farmer("f-1"), profile) {
        Err(CreditServiceError::InvalidInput(InvalidInputError::NegativeAssetValue(value))) => {
            assert_eq!(value, -10.0)
        }
        other => panic!("expected invalid input, got {other:?}"),
    }
    assert!(farmers
        .fetch_profile(&farmer("f-1"))
        .expect("fetch succeeds")
        .is_none());
}

#[test]
fn calculate_requires_registered_profile() {
    let (service, _, _) = build_service();

    match service.calculate(&farmer("ghost")) {
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn calculate_uses_latest_soil_observation() {
    let (service, farmers, scores) = build_service();
    let id = farmer("f-2");
    service
        .register_profile(&id, established_profile())
        .expect("profile registers");
    farmers
        .record_observation(&id, soil(20.0))
        .expect("observation recorded");
    farmers
        .record_observation(&id, soil(85.0))
        .expect("observation recorded");

    let record = service.calculate(&id).expect("score calculated");

    assert_eq!(record.farmer_id, id);
    assert_eq!(record.result.risk_score, 0);
    assert_eq!(record.result.risk_category, RiskCategory::Low);
    assert_eq!(record.factors.soil_quality, 85.0);
    assert_eq!(record.factors.active_loans, 0);
    let stored = scores
        .fetch(&id)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(stored, record);
}

#[test]
fn calculate_defaults_soil_quality_when_no_reading() {
    let (service, _, _) = build_service();
    let id = farmer("f-3");
    let mut profile = neutral_profile();
    profile.loans = vec![loan(LoanStatus::Active), loan(LoanStatus::Active)];
    service.register_profile(&id, profile).expect("registers");

    let record = service.calculate(&id).expect("score calculated");

    assert_eq!(record.factors.soil_quality, 50.0);
    assert_eq!(record.factors.active_loans, 2);
    assert_eq!(record.result.risk_score, 40);
    assert_eq!(record.result.risk_category, RiskCategory::Medium);
}

#[test]
fn recalculation_replaces_result_but_keeps_first_calculation_time() {
    let (service, farmers, _) = build_service();
    let id = farmer("f-4");
    service
        .register_profile(&id, fragile_profile())
        .expect("registers");
    let first = service.calculate(&id).expect("first score");

    service
        .register_profile(&id, established_profile())
        .expect("re-registers");
    farmers
        .record_observation(&id, soil(90.0))
        .expect("observation recorded");
    let second = service.calculate(&id).expect("second score");

    assert_eq!(first.result.risk_category, RiskCategory::High);
    assert_eq!(second.result.risk_category, RiskCategory::Low);
    assert_eq!(second.calculated_at, first.calculated_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(service.get(&id).expect("stored").result, second.result);
}

#[test]
fn calculate_rejects_out_of_range_soil_observation() {
    let (service, farmers, _) = build_service();
    let id = farmer("f-5");
    service
        .register_profile(&id, neutral_profile())
        .expect("registers");
    farmers
        .record_observation(&id, soil(140.0))
        .expect("observation recorded");

    match service.calculate(&id) {
        Err(CreditServiceError::InvalidInput(InvalidInputError::SoilQualityOutOfRange(value))) => {
            assert_eq!(value, 140.0)
        }
        other => panic!("expected out of range soil, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&farmer("missing")) {
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn calculate_propagates_repository_outage() {
    let farmers = Arc::new(MemoryFarmers::default());
    let service = CreditScoringService::new(
        farmers.clone(),
        Arc::new(UnavailableScores),
        ScoringConfig::standard(),
    );
    let id = farmer("f-6");
    service
        .register_profile(&id, neutral_profile())
        .expect("registers");

    match service.calculate(&id) {
        Err(CreditServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline")
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

#[test]
fn custom_partner_catalog_flows_into_offers() {
    let farmers = Arc::new(MemoryFarmers::default());
    let scores = Arc::new(MemoryScores::default());
    let config = ScoringConfig::with_partners(vec![partner("Village Sacco", 9.0, 0.5)])
        .expect("sacco catalog is valid");
    let service = CreditScoringService::new(farmers, scores, config);
    let id = farmer("f-7");
    service
        .register_profile(&id, established_profile())
        .expect("registers");

    let record = service.calculate(&id).expect("score calculated");

    assert_eq!(record.result.ranked_offers.len(), 1);
    assert_eq!(record.result.ranked_offers[0].partner_name, "Village Sacco");
    assert_eq!(service.engine().config().partners().len(), 1);
}
