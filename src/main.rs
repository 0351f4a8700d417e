use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use annual_report::api::openapi::ApiDoc;
use annual_report::config::{self, AppConfig};
use annual_report::init_routes;
use annual_report::report::adapter::outgoing::{OrgStatsFile, VolunteerRecordQueryPostgres};
use annual_report::report::application::domain::entities::OrgStats;
use annual_report::report::application::services::GetAnnualReportService;
use annual_report::shared::api::custom_json_config;
use annual_report::AppState;

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    // Try .env.{environment} first, then fall back to .env
    let rust_env = config::rust_env();
    let env_file = config::load_dotenv(Path::new("."), &rust_env);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(rust_env = %rust_env, env_file = ?env_file, "Starting application...");

    let config = AppConfig::from_env().expect("Invalid configuration");
    let server_url = config.server_url();
    info!(server_url = %server_url, "Server run on");

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");
    let db_arc = Arc::new(conn);

    // Organisation stats are read once; a broken file falls back to the defaults
    let org_stats = match OrgStatsFile::load(&config.org_stats_path).await {
        Ok(source) => source,
        Err(e) => {
            warn!(error = %e, path = %config.org_stats_path.display(), "Using default organisation stats");
            OrgStatsFile::from_stats(OrgStats::default())
        }
    };

    let record_query = VolunteerRecordQueryPostgres::new(Arc::clone(&db_arc));
    let get_annual_report_use_case = GetAnnualReportService::new(record_query, org_stats);

    let state = AppState {
        get_annual_report_use_case: Arc::new(get_annual_report_use_case),
        photo_folder: config.photo_folder.clone(),
    };

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
