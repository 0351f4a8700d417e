mod org_stats_source;
mod volunteer_record_query;

pub use org_stats_source::{OrgStatsError, OrgStatsSource};
pub use volunteer_record_query::{RecordQueryError, VolunteerRecordQuery};
