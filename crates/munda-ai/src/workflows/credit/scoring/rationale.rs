use super::super::domain::ApplicantProfile;
use super::RiskCategory;

pub(crate) fn rationale_factors(profile: &ApplicantProfile) -> Vec<String> {
    let mut factors = Vec::new();

    if profile.cooperative_member {
        factors.push("Cooperative membership provides additional security".to_string());
    } else {
        factors.push("No cooperative membership increases risk".to_string());
    }

    if profile.farming_experience_years >= 10 {
        factors.push("Extensive farming experience".to_string());
    } else if profile.farming_experience_years < 2 {
        factors.push("Limited farming experience".to_string());
    }

    if profile.asset_value >= 100_000.0 {
        factors.push("Strong asset base".to_string());
    } else if profile.asset_value < 10_000.0 {
        factors.push("Limited asset value".to_string());
    }

    let active = profile.active_loan_count();
    if active > 0 {
        factors.push(format!("{active} active loan(s)"));
    }

    let losses = profile.loss_history.reported_kinds();
    if losses > 0 {
        factors.push(format!("History of {losses} type(s) of crop losses"));
    }

    factors
}

pub(crate) fn generate_rationale(
    profile: &ApplicantProfile,
    risk_score: u8,
    risk_category: RiskCategory,
) -> String {
    format!(
        "Risk Score: {}/100 ({} risk). Factors: {}.",
        risk_score,
        risk_category.label(),
        rationale_factors(profile).join("; ")
    )
}
