mod org_stats_file;
pub mod sea_orm_entity;
mod volunteer_record_query_postgres;

pub use org_stats_file::OrgStatsFile;
pub use volunteer_record_query_postgres::VolunteerRecordQueryPostgres;
