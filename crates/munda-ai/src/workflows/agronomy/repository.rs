use super::service::FieldInsight;
use crate::workflows::credit::{FarmerId, RepositoryError};

/// Number of insights returned by the history endpoint.
pub const INSIGHT_HISTORY_LIMIT: usize = 10;

/// Storage for processed uploads, read back as a farmer's insight history.
pub trait InsightRepository: Send + Sync {
    fn record(&self, insight: FieldInsight) -> Result<(), RepositoryError>;
    /// At most `limit` insights for the farmer, newest first.
    fn latest(
        &self,
        farmer_id: &FarmerId,
        limit: usize,
    ) -> Result<Vec<FieldInsight>, RepositoryError>;
}
