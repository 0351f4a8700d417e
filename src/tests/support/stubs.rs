use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::report::application::domain::entities::{AnnualReport, GuestReport, OrgStats};
use crate::report::application::ports::incoming::use_cases::{
    GetAnnualReportCommand, GetAnnualReportError, GetAnnualReportUseCase,
};

/// Returns a fixed result and counts how often it was asked.
#[derive(Clone)]
pub struct StubGetAnnualReportUseCase {
    result: Result<AnnualReport, GetAnnualReportError>,
    calls: Arc<AtomicUsize>,
}

impl StubGetAnnualReportUseCase {
    pub fn success(report: AnnualReport) -> Self {
        Self {
            result: Ok(report),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failure(error: GetAnnualReportError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for StubGetAnnualReportUseCase {
    fn default() -> Self {
        Self::success(AnnualReport::Guest(GuestReport::new(OrgStats::default())))
    }
}

#[async_trait]
impl GetAnnualReportUseCase for StubGetAnnualReportUseCase {
    async fn execute(
        &self,
        _command: GetAnnualReportCommand,
    ) -> Result<AnnualReport, GetAnnualReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
