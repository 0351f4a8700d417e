mod get_annual_report_service;

pub use get_annual_report_service::GetAnnualReportService;
