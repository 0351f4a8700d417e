use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;

use crate::report::application::ports::incoming::use_cases::GetAnnualReportUseCase;
use crate::tests::support::stubs::StubGetAnnualReportUseCase;
use crate::AppState;

pub struct TestAppStateBuilder {
    get_annual_report: Option<Arc<dyn GetAnnualReportUseCase + Send + Sync>>,
    photo_folder: PathBuf,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            get_annual_report: Some(Arc::new(StubGetAnnualReportUseCase::default())),
            photo_folder: PathBuf::from("photos"),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_get_annual_report(
        mut self,
        uc: impl GetAnnualReportUseCase + Send + Sync + 'static,
    ) -> Self {
        self.get_annual_report = Some(Arc::new(uc));
        self
    }

    pub fn with_photo_folder(mut self, folder: impl AsRef<Path>) -> Self {
        self.photo_folder = folder.as_ref().to_path_buf();
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            get_annual_report_use_case: self
                .get_annual_report
                .expect("get_annual_report use case not set"),
            photo_folder: self.photo_folder,
        })
    }
}
