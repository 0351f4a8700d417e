use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::OpenApi;

use crate::report::adapter::incoming::web::routes::AnnualDataRequest;
use crate::report::application::domain::entities::{
    ActivitySummary, AnnualReport, Figure, GuestReport, Milestone, MonthStat, OrgStats, Tag,
    VolunteerReport,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Volunteer Annual Report API",
        version = "1.0.0",
        description = "Personal annual volunteer reports and the organisation overview"
    ),
    paths(crate::report::adapter::incoming::web::routes::get_annual_data_handler),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<AnnualReport>,
            ErrorResponse,
            ErrorDetail,

            // Report DTOs
            AnnualDataRequest,
            AnnualReport,
            VolunteerReport,
            GuestReport,
            OrgStats,
            Figure,
            Tag,
            Milestone,
            ActivitySummary,
            MonthStat
        )
    ),
    tags(
        (name = "report", description = "Annual report lookup"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_the_report_endpoint() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/get_annual_data"));
        let schemas = &doc.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("AnnualDataRequest"));
        assert!(schemas.contains_key("VolunteerReport"));
    }
}
