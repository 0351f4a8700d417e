use async_trait::async_trait;

use crate::report::application::domain::entities::ActivityRecord;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read access to the activity ledger.
#[async_trait]
pub trait VolunteerRecordQuery: Send + Sync {
    /// All records of one person, dated ascending with undated records last.
    /// `phone` is compared after [`normalize_phone`].
    ///
    /// [`normalize_phone`]: crate::report::application::domain::stats::normalize_phone
    async fn find_by_identity(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Vec<ActivityRecord>, RecordQueryError>;

    /// Every record, of anyone, whose activity name is in `activity_names`.
    async fn find_by_activity_names(
        &self,
        activity_names: &[String],
    ) -> Result<Vec<ActivityRecord>, RecordQueryError>;
}
