use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered farmers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FarmerId(pub String);

/// Applicant attributes the risk rubric is allowed to consider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub cooperative_member: bool,
    pub education_level: EducationLevel,
    pub farming_experience_years: i32,
    pub asset_value: f64,
    #[serde(default)]
    pub loss_history: LossHistory,
    #[serde(default)]
    pub loans: Vec<LoanRecord>,
}

impl ApplicantProfile {
    pub fn active_loan_count(&self) -> usize {
        self.loans_with_status(LoanStatus::Active)
    }

    pub fn defaulted_loan_count(&self) -> usize {
        self.loans_with_status(LoanStatus::Defaulted)
    }

    fn loans_with_status(&self, status: LoanStatus) -> usize {
        self.loans
            .iter()
            .filter(|loan| loan.status == status)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[serde(alias = "no education")]
    None,
    Primary,
    Secondary,
    #[serde(alias = "tertiary education")]
    Tertiary,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::None => "none",
            EducationLevel::Primary => "primary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::Tertiary => "tertiary",
        }
    }
}

/// Climate-related crop losses the farmer has reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossHistory {
    #[serde(alias = "rain_pattern")]
    pub rainfall_variability: bool,
    pub drought: bool,
    pub heatwave: bool,
    #[serde(alias = "storms")]
    pub storm: bool,
    #[serde(alias = "mudslides")]
    pub mudslide: bool,
}

impl LossHistory {
    /// Number of distinct loss types on record.
    pub fn reported_kinds(&self) -> usize {
        [
            self.rainfall_variability,
            self.drought,
            self.heatwave,
            self.storm,
            self.mudslide,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub amount: f64,
    pub status: LoanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Paid,
    Defaulted,
}

/// Most recent soil quality reading for a farm, on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilObservation {
    pub quality_score: f64,
}

/// Bank or lender that can extend credit to a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPartner {
    pub name: String,
    pub base_interest_rate_percent: f64,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_legacy_field_spellings() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "cooperative_member": false,
            "education_level": "tertiary education",
            "farming_experience_years": 3,
            "asset_value": 25000.0,
            "loss_history": { "rain_pattern": true, "storms": true },
        }))
        .expect("profile deserializes");

        assert_eq!(profile.education_level, EducationLevel::Tertiary);
        assert!(profile.loss_history.rainfall_variability);
        assert!(profile.loss_history.storm);
        assert!(!profile.loss_history.drought);
        assert!(profile.loans.is_empty());
    }

    #[test]
    fn counts_loans_by_status() {
        let loan = |status| LoanRecord {
            amount: 1000.0,
            status,
            institution: None,
        };
        let profile = ApplicantProfile {
            cooperative_member: true,
            education_level: EducationLevel::None,
            farming_experience_years: 0,
            asset_value: 0.0,
            loss_history: LossHistory::default(),
            loans: vec![
                loan(LoanStatus::Active),
                loan(LoanStatus::Paid),
                loan(LoanStatus::Defaulted),
                loan(LoanStatus::Active),
            ],
        };

        assert_eq!(profile.active_loan_count(), 2);
        assert_eq!(profile.defaulted_loan_count(), 1);
    }
}
