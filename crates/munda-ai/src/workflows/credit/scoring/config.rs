use super::super::domain::FinancialPartner;
use super::catalog::{parse_partners, validate_partners, PartnerCatalogError};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Reference data handed to the engine at construction time.
///
/// Every constructor checks the partner list, so an engine never ranks a
/// partner with a blank name, a non-positive rate or a negative distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    partners: Vec<FinancialPartner>,
}

impl ScoringConfig {
    pub fn with_partners(partners: Vec<FinancialPartner>) -> Result<Self, PartnerCatalogError> {
        validate_partners(&partners)?;
        Ok(Self { partners })
    }

    /// The four reference banks offered to farmers around the pilot region.
    pub fn standard() -> Self {
        let bank = |name: &str, base_interest_rate_percent: f64, distance_km: f64| {
            FinancialPartner {
                name: name.to_string(),
                base_interest_rate_percent,
                distance_km,
            }
        };

        Self {
            partners: vec![
                bank("Equity Bank", 12.5, 5.2),
                bank("Cooperative Bank", 11.8, 8.1),
                bank("KCB Bank", 13.2, 12.5),
                bank("Family Bank", 12.0, 15.3),
            ],
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PartnerCatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PartnerCatalogError> {
        let partners = parse_partners(reader)?;
        Ok(Self { partners })
    }

    pub fn partners(&self) -> &[FinancialPartner] {
        &self.partners
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
