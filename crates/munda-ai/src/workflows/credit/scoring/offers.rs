use super::super::domain::FinancialPartner;
use super::{RankedOffer, RiskCategory};

/// Price each partner for the category and order the offers by proximity.
pub(crate) fn rank_offers(
    risk_category: RiskCategory,
    loan_ceiling: u64,
    partners: &[FinancialPartner],
) -> Vec<RankedOffer> {
    let multiplier = risk_category.rate_multiplier();
    let max_offer_amount = (loan_ceiling as f64 * 1.2).round() as u64;

    let mut offers: Vec<RankedOffer> = partners
        .iter()
        .map(|partner| RankedOffer {
            partner_name: partner.name.clone(),
            adjusted_rate_percent: round_cents(partner.base_interest_rate_percent * multiplier),
            max_offer_amount,
            distance_km: partner.distance_km,
        })
        .collect();

    // `sort_by` is stable, so equidistant partners keep catalog order.
    offers.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    offers
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
