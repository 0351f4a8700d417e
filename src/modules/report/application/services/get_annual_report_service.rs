use async_trait::async_trait;
use tracing::info;

use crate::report::application::{
    domain::{
        assembler::{activity_names, assemble},
        entities::AnnualReport,
    },
    ports::{
        incoming::use_cases::{
            GetAnnualReportCommand, GetAnnualReportError, GetAnnualReportUseCase,
        },
        outgoing::{OrgStatsSource, VolunteerRecordQuery},
    },
};

#[derive(Debug, Clone)]
pub struct GetAnnualReportService<Q, O>
where
    Q: VolunteerRecordQuery + Send + Sync,
    O: OrgStatsSource + Send + Sync,
{
    query: Q,
    org_stats: O,
}

impl<Q, O> GetAnnualReportService<Q, O>
where
    Q: VolunteerRecordQuery + Send + Sync,
    O: OrgStatsSource + Send + Sync,
{
    pub fn new(query: Q, org_stats: O) -> Self {
        Self { query, org_stats }
    }
}

#[async_trait]
impl<Q, O> GetAnnualReportUseCase for GetAnnualReportService<Q, O>
where
    Q: VolunteerRecordQuery + Send + Sync,
    O: OrgStatsSource + Send + Sync,
{
    async fn execute(
        &self,
        command: GetAnnualReportCommand,
    ) -> Result<AnnualReport, GetAnnualReportError> {
        let records = self
            .query
            .find_by_identity(command.name(), command.phone())
            .await
            .map_err(|e| GetAnnualReportError::QueryFailed(e.to_string()))?;

        let names = activity_names(&records);

        let related = async {
            if names.is_empty() {
                return Ok(Vec::new());
            }
            self.query
                .find_by_activity_names(&names)
                .await
                .map_err(|e| GetAnnualReportError::QueryFailed(e.to_string()))
        };
        let org = async {
            self.org_stats
                .org_stats()
                .await
                .map_err(|e| GetAnnualReportError::OrgStatsUnavailable(e.to_string()))
        };

        let (related, org) = futures::try_join!(related, org)?;

        info!(
            records = records.len(),
            related = related.len(),
            "Assembling annual report"
        );

        Ok(assemble(command.name(), &records, &related, org))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    use crate::report::application::{
        domain::entities::{ActivityRecord, OrgStats},
        ports::outgoing::{OrgStatsError, RecordQueryError},
    };

    mock! {
        pub RecordQuery {}
        #[async_trait]
        impl VolunteerRecordQuery for RecordQuery {
            async fn find_by_identity(
                &self,
                name: &str,
                phone: &str,
            ) -> Result<Vec<ActivityRecord>, RecordQueryError>;

            async fn find_by_activity_names(
                &self,
                activity_names: &[String],
            ) -> Result<Vec<ActivityRecord>, RecordQueryError>;
        }
    }

    mock! {
        pub OrgSource {}
        #[async_trait]
        impl OrgStatsSource for OrgSource {
            async fn org_stats(&self) -> Result<OrgStats, OrgStatsError>;
        }
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn row(name: &str, activity: &str, hours: f64) -> ActivityRecord {
        ActivityRecord {
            name: name.to_string(),
            phone: "2024001".to_string(),
            activity_name: activity.to_string(),
            activity_type: "关怀".to_string(),
            activity_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 20),
            hours,
            cover_img: None,
        }
    }

    fn command() -> GetAnnualReportCommand {
        GetAnnualReportCommand::new("林晓".to_string(), "2024001".to_string()).unwrap()
    }

    fn org_source_ok() -> MockOrgSource {
        let mut org = MockOrgSource::new();
        org.expect_org_stats()
            .returning(|| Ok(OrgStats::default()));
        org
    }

    // ============================================================
    // Tests
    // ============================================================

    #[tokio::test]
    async fn test_volunteer_report_includes_co_volunteers() {
        // Arrange
        let mut query = MockRecordQuery::new();
        query
            .expect_find_by_identity()
            .withf(|name, phone| name == "林晓" && phone == "2024001")
            .times(1)
            .returning(|_, _| Ok(vec![row("林晓", "社区探访", 3.0)]));
        query
            .expect_find_by_activity_names()
            .withf(|names| names == ["社区探访".to_string()])
            .times(1)
            .returning(|_| {
                Ok(vec![
                    row("林晓", "社区探访", 3.0),
                    row("周一", "社区探访", 3.0),
                ])
            });
        let service = GetAnnualReportService::new(query, org_source_ok());

        // Act
        let result = service.execute(command()).await;

        // Assert
        match result {
            Ok(AnnualReport::Volunteer(report)) => {
                assert_eq!(report.name, "林晓");
                assert_eq!(report.total_hours, 3.0);
                assert_eq!(report.co_volunteers, vec!["周一"]);
            }
            other => panic!("Expected volunteer report, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_identity_returns_guest_without_related_lookup() {
        // Arrange
        let mut query = MockRecordQuery::new();
        query
            .expect_find_by_identity()
            .returning(|_, _| Ok(vec![]));
        query.expect_find_by_activity_names().never();
        let service = GetAnnualReportService::new(query, org_source_ok());

        // Act
        let result = service.execute(command()).await;

        // Assert
        let report = result.unwrap();
        assert!(!report.is_volunteer());
    }

    #[tokio::test]
    async fn test_query_failure_is_reported() {
        // Arrange
        let mut query = MockRecordQuery::new();
        query
            .expect_find_by_identity()
            .returning(|_, _| Err(RecordQueryError::DatabaseError("db down".to_string())));
        let service = GetAnnualReportService::new(query, org_source_ok());

        // Act
        let result = service.execute(command()).await;

        // Assert
        match result {
            Err(GetAnnualReportError::QueryFailed(msg)) => assert!(msg.contains("db down")),
            other => panic!("Expected QueryFailed error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_org_stats_failure_is_reported() {
        // Arrange
        let mut query = MockRecordQuery::new();
        query
            .expect_find_by_identity()
            .returning(|_, _| Ok(vec![row("林晓", "巡河", 1.0)]));
        query
            .expect_find_by_activity_names()
            .returning(|_| Ok(vec![]));
        let mut org = MockOrgSource::new();
        org.expect_org_stats()
            .returning(|| Err(OrgStatsError::Invalid("expected value".to_string())));
        let service = GetAnnualReportService::new(query, org);

        // Act
        let result = service.execute(command()).await;

        // Assert
        assert!(matches!(
            result,
            Err(GetAnnualReportError::OrgStatsUnavailable(_))
        ));
    }
}
