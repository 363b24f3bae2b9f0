use super::super::domain::FinancialPartner;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum PartnerCatalogError {
    #[error("failed to read partner catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid partner catalog data: {0}")]
    Csv(#[from] csv::Error),
    #[error("partner '{name}' on line {line}: {reason}")]
    InvalidPartner {
        line: usize,
        name: String,
        reason: &'static str,
    },
    #[error("partner '{name}' at index {index}: {reason}")]
    InvalidEntry {
        index: usize,
        name: String,
        reason: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct PartnerRow {
    name: String,
    base_interest_rate_percent: f64,
    distance_km: f64,
}

pub(crate) fn parse_partners<R: Read>(
    reader: R,
) -> Result<Vec<FinancialPartner>, PartnerCatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut partners = Vec::new();

    for (index, record) in csv_reader.deserialize::<PartnerRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        let line = index + 2;

        let partner = FinancialPartner {
            name: row.name,
            base_interest_rate_percent: row.base_interest_rate_percent,
            distance_km: row.distance_km,
        };
        if let Err(reason) = check_partner(&partner) {
            return Err(PartnerCatalogError::InvalidPartner {
                line,
                name: partner.name,
                reason,
            });
        }
        partners.push(partner);
    }

    Ok(partners)
}

/// Checks every entry of an in-memory partner list.
pub(crate) fn validate_partners(partners: &[FinancialPartner]) -> Result<(), PartnerCatalogError> {
    for (index, partner) in partners.iter().enumerate() {
        check_partner(partner).map_err(|reason| PartnerCatalogError::InvalidEntry {
            index,
            name: partner.name.clone(),
            reason,
        })?;
    }
    Ok(())
}

fn check_partner(partner: &FinancialPartner) -> Result<(), &'static str> {
    if partner.name.trim().is_empty() {
        return Err("name must not be empty");
    }
    let rate = partner.base_interest_rate_percent;
    if !rate.is_finite() || rate <= 0.0 {
        return Err("base interest rate must be positive");
    }
    if !partner.distance_km.is_finite() || partner.distance_km < 0.0 {
        return Err("distance must be non-negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_trimmed_rows_in_order() {
        let csv = "name, base_interest_rate_percent, distance_km\n\
                   Equity Bank, 12.5, 5.2\n\
                   Sacco Plus, 9.75, 0\n";

        let partners = parse_partners(Cursor::new(csv)).expect("catalog parses");

        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].name, "Equity Bank");
        assert_eq!(partners[1].base_interest_rate_percent, 9.75);
        assert_eq!(partners[1].distance_km, 0.0);
    }

    #[test]
    fn rejects_negative_distance() {
        let csv = "name,base_interest_rate_percent,distance_km\nFar Bank,11.0,-3\n";

        match parse_partners(Cursor::new(csv)) {
            Err(PartnerCatalogError::InvalidPartner { line, name, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(name, "Far Bank");
            }
            other => panic!("expected invalid partner, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_interest_rate() {
        let csv = "name,base_interest_rate_percent,distance_km\nFree Money,0,1\n";

        assert!(matches!(
            parse_partners(Cursor::new(csv)),
            Err(PartnerCatalogError::InvalidPartner { .. })
        ));
    }

    #[test]
    fn surfaces_malformed_numbers_as_csv_errors() {
        let csv = "name,base_interest_rate_percent,distance_km\nBank,twelve,1\n";

        assert!(matches!(
            parse_partners(Cursor::new(csv)),
            Err(PartnerCatalogError::Csv(_))
        ));
    }
}
