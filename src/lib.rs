pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::presentation;
pub use modules::report;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;

use crate::report::application::ports::incoming::use_cases::GetAnnualReportUseCase;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub get_annual_report_use_case: Arc<dyn GetAnnualReportUseCase + Send + Sync>,
    /// Folder served under `/media/images/`.
    pub photo_folder: PathBuf,
}

#[cfg(not(tarpaulin_include))]
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Report
    cfg.service(crate::report::adapter::incoming::web::routes::get_annual_data_handler);
    cfg.service(crate::report::adapter::incoming::web::routes::annual_report_page_handler);
    cfg.service(crate::report::adapter::incoming::web::routes::annual_report_slides_handler);
    cfg.service(crate::report::adapter::incoming::web::routes::media_image_handler);
}
