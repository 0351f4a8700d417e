use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::{error, info};

use super::get_annual_data::{map_command_error, map_get_annual_report_error, AnnualDataRequest};
use crate::{
    presentation::{
        markup::render_all,
        record::FetchedRecord,
        slides::{
            generator::generate,
            shell::{leading_slides, overlays, page, tail_slides},
        },
    },
    report::application::ports::incoming::use_cases::GetAnnualReportCommand,
    shared::api::ApiResponse,
    AppState,
};

const HTML: &str = "text/html; charset=utf-8";

/// Page shell with the static slides. The report slides are generated once
/// the visitor submits the gate form.
#[get("/annual_report")]
pub async fn annual_report_page_handler() -> impl Responder {
    let mut slides = leading_slides();
    slides.extend(tail_slides());

    HttpResponse::Ok()
        .content_type(HTML)
        .body(page(&slides, &overlays()))
}

/// Server-rendered dynamic slides for one identity, as an HTML fragment.
#[post("/annual_report/slides")]
pub async fn annual_report_slides_handler(
    data: web::Data<AppState>,
    payload: web::Json<AnnualDataRequest>,
) -> impl Responder {
    let payload = payload.into_inner();

    let command = match GetAnnualReportCommand::new(payload.name, payload.phone) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    let report = match data.get_annual_report_use_case.execute(command).await {
        Ok(report) => report,
        Err(err) => return map_get_annual_report_error(err),
    };

    let record = match serde_json::to_value(&report)
        .map_err(|e| e.to_string())
        .and_then(|value| FetchedRecord::from_data(&value).map_err(|e| e.to_string()))
    {
        Ok(record) => record,
        Err(e) => {
            error!(error = %e, "Annual report could not be re-read for rendering");
            return ApiResponse::internal_error();
        }
    };

    let generated = generate(&record, &mut rand::thread_rng());
    info!(slides = generated.slides.len(), "Annual report slides rendered");

    HttpResponse::Ok()
        .content_type(HTML)
        .body(render_all(&generated.slides))
}
