use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::credit::FarmerId;

/// Trait describing outbound farmer notifications (e.g., SMS gateways).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: FarmerAlert) -> Result<(), AlertError>;
}

/// Simple alert payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerAlert {
    pub template: String,
    pub farmer_id: FarmerId,
    pub details: BTreeMap<String, String>,
}

/// Longest summary text sent in one SMS report.
pub const SMS_SUMMARY_LIMIT: usize = 500;

/// Cut a summary down to [`SMS_SUMMARY_LIMIT`] characters, ending in `...` when shortened.
pub fn sms_summary(summary: &str) -> String {
    if summary.chars().count() <= SMS_SUMMARY_LIMIT {
        return summary.to_string();
    }
    let mut shortened: String = summary.chars().take(SMS_SUMMARY_LIMIT - 3).collect();
    shortened.push_str("...");
    shortened
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_at_the_limit_is_sent_whole() {
        let summary = "a".repeat(SMS_SUMMARY_LIMIT);
        assert_eq!(sms_summary(&summary), summary);
    }

    #[test]
    fn longer_summary_is_cut_with_ellipsis() {
        let summary = "b".repeat(SMS_SUMMARY_LIMIT + 1);
        let sent = sms_summary(&summary);

        assert_eq!(sent.chars().count(), SMS_SUMMARY_LIMIT);
        assert!(sent.starts_with(&"b".repeat(497)));
        assert!(sent.ends_with("..."));
    }

    #[test]
    fn cut_respects_multibyte_characters() {
        let summary = "Múnda ".repeat(100);
        let sent = sms_summary(&summary);

        assert_eq!(sent.chars().count(), SMS_SUMMARY_LIMIT);
        assert!(sent.ends_with("..."));
    }
}
