use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4399;
pub const DEFAULT_ORG_STATS_PATH: &str = "data/org_stats.json";
pub const DEFAULT_PHOTO_FOLDER: &str = "photos";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

pub const DEFAULT_RUST_ENV: &str = "development";

/// Loads `.env.{rust_env}` from `dir`, or `.env` when that file is missing.
/// Variables already set in the process win. Returns the file that was read.
///
/// Runs before the tracing subscriber is built so `RUST_LOG` from the file
/// applies.
pub fn load_dotenv(dir: &Path, rust_env: &str) -> Option<PathBuf> {
    [dir.join(format!(".env.{rust_env}")), dir.join(".env")]
        .into_iter()
        .find(|path| dotenvy::from_path(path).is_ok())
}

pub fn rust_env() -> String {
    env::var("RUST_ENV").unwrap_or_else(|_| DEFAULT_RUST_ENV.to_string())
}

/// Process settings read once at boot.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub org_stats_path: PathBuf,
    pub photo_folder: PathBuf,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL is not set")?;
        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {raw:?}"))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            org_stats_path: get("ORG_STATS_PATH")
                .unwrap_or_else(|| DEFAULT_ORG_STATS_PATH.to_string())
                .into(),
            photo_folder: get("PHOTO_FOLDER")
                .unwrap_or_else(|| DEFAULT_PHOTO_FOLDER.to_string())
                .into(),
            db_max_connections,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn defaults_apply_when_only_database_is_set() {
        let vars = hashmap! { "DATABASE_URL" => "postgres://localhost/report" };

        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server_url(), "127.0.0.1:4399");
        assert_eq!(config.org_stats_path, PathBuf::from("data/org_stats.json"));
        assert_eq!(config.photo_folder, PathBuf::from("photos"));
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let vars = hashmap! { "DATABASE_URL" => "   ", "PORT" => "8080" };

        let err = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();

        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_reported() {
        let vars = hashmap! { "DATABASE_URL" => "postgres://db", "PORT" => "http" };

        let err = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn environment_file_is_preferred_and_feeds_the_log_filter() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env.staging"),
            "ANNUAL_REPORT_STAGING_LOG=debug,actix_web=warn\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(".env"), "ANNUAL_REPORT_STAGING_LOG=error\n").unwrap();

        // Act
        let loaded = load_dotenv(dir.path(), "staging");

        // Assert
        assert_eq!(loaded, Some(dir.path().join(".env.staging")));
        assert_eq!(
            env::var("ANNUAL_REPORT_STAGING_LOG").as_deref(),
            Ok("debug,actix_web=warn")
        );
        assert!(EnvFilter::try_from_env("ANNUAL_REPORT_STAGING_LOG").is_ok());
    }

    #[test]
    fn plain_env_file_is_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "ANNUAL_REPORT_FALLBACK_PORT=5000\n").unwrap();

        let loaded = load_dotenv(dir.path(), "production");

        assert_eq!(loaded, Some(dir.path().join(".env")));
        assert_eq!(env::var("ANNUAL_REPORT_FALLBACK_PORT").as_deref(), Ok("5000"));
    }

    #[test]
    fn no_env_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(load_dotenv(dir.path(), "development"), None);
    }
}
