/// Recommended loan ceiling, rounded once to the nearest 1000.
pub(crate) fn compute_loan_ceiling(
    risk_score: u8,
    asset_value: f64,
    experience_years: i32,
    soil_quality: f64,
) -> u64 {
    let mut base = asset_value * 0.5;

    let risk_multiplier = f64::from(100 - risk_score.min(100)) / 100.0;
    base *= risk_multiplier;

    if experience_years >= 10 {
        base *= 1.2;
    } else if experience_years >= 5 {
        base *= 1.1;
    }

    if soil_quality >= 70.0 {
        base *= 1.15;
    } else if soil_quality < 40.0 {
        base *= 0.8;
    }

    round_to_thousand(base)
}

fn round_to_thousand(amount: f64) -> u64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    ((amount / 1000.0).round() as u64).saturating_mul(1000)
}
