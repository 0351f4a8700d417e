use async_trait::async_trait;

use crate::report::application::domain::entities::OrgStats;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrgStatsError {
    #[error("Failed to read organisation stats: {0}")]
    Unreadable(String),

    #[error("Invalid organisation stats: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait OrgStatsSource: Send + Sync {
    async fn org_stats(&self) -> Result<OrgStats, OrgStatsError>;
}
