mod get_annual_report_use_case;

pub use get_annual_report_use_case::{
    GetAnnualReportCommand, GetAnnualReportCommandError, GetAnnualReportError,
    GetAnnualReportUseCase,
};
