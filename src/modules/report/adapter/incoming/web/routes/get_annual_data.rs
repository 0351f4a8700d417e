use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    api::schemas::ErrorResponse,
    report::application::ports::incoming::use_cases::{
        GetAnnualReportCommand, GetAnnualReportCommandError, GetAnnualReportError,
    },
    shared::api::ApiResponse,
    AppState,
};

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnnualDataRequest {
    /// Volunteer's name as registered
    #[serde(default)]
    #[schema(example = "林晓")]
    pub name: String,
    /// Phone number or student ID, separators are ignored
    #[serde(default)]
    #[schema(example = "2024001")]
    pub phone: String,
}

pub const MISSING_IDENTITY_MESSAGE: &str = "请输入姓名和学号";

//
// ──────────────────────────────────────────────────────────
// Route
// ──────────────────────────────────────────────────────────
//

#[utoipa::path(
    post,
    path = "/api/get_annual_data",
    tag = "report",
    request_body = AnnualDataRequest,
    responses(
        (
            status = 200,
            description = "Personal report, or the organisation overview for unknown visitors",
            example = json!({
                "success": true,
                "data": {
                    "is_volunteer": false,
                    "name": "未来的伙伴",
                    "org_data": {
                        "total_org_hours": "12580",
                        "total_events": "86",
                        "total_people": "1200+"
                    }
                }
            })
        ),
        (
            status = 400,
            description = "Name or phone missing",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "请输入姓名和学号" },
                "message": "请输入姓名和学号"
            })
        ),
        (status = 500, description = "Record lookup failed", body = ErrorResponse)
    )
)]
#[post("/api/get_annual_data")]
pub async fn get_annual_data_handler(
    data: web::Data<AppState>,
    payload: web::Json<AnnualDataRequest>,
) -> impl Responder {
    let payload = payload.into_inner();

    let command = match GetAnnualReportCommand::new(payload.name, payload.phone) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.get_annual_report_use_case.execute(command).await {
        Ok(report) => {
            info!("Annual report served");
            ApiResponse::success(report)
        }
        Err(err) => map_get_annual_report_error(err),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

pub(super) fn map_command_error(err: GetAnnualReportCommandError) -> HttpResponse {
    match err {
        GetAnnualReportCommandError::EmptyName | GetAnnualReportCommandError::EmptyPhone => {
            ApiResponse::bad_request("VALIDATION_ERROR", MISSING_IDENTITY_MESSAGE)
        }
    }
}

pub(super) fn map_get_annual_report_error(err: GetAnnualReportError) -> HttpResponse {
    error!(error = %err, "Annual report lookup failed");
    ApiResponse::internal_error()
}
