use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::report::application::domain::entities::OrgStats;
use crate::report::application::ports::outgoing::{OrgStatsError, OrgStatsSource};

/// Organisation statistics read once from a JSON file.
///
/// A missing file is not an error: the built-in defaults are served instead.
#[derive(Debug, Clone)]
pub struct OrgStatsFile {
    stats: Arc<OrgStats>,
}

impl OrgStatsFile {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, OrgStatsError> {
        let path = path.as_ref();

        let stats = match tokio::fs::read_to_string(path).await {
            Ok(text) => serde_json::from_str::<OrgStats>(&text).map_err(|e| {
                warn!(path = %path.display(), error = %e, "Invalid org stats file");
                OrgStatsError::Invalid(e.to_string())
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Org stats file not found, using defaults");
                OrgStats::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable org stats file");
                return Err(OrgStatsError::Unreadable(e.to_string()));
            }
        };

        Ok(Self {
            stats: Arc::new(stats),
        })
    }

    pub fn from_stats(stats: OrgStats) -> Self {
        Self {
            stats: Arc::new(stats),
        }
    }
}

#[async_trait]
impl OrgStatsSource for OrgStatsFile {
    async fn org_stats(&self) -> Result<OrgStats, OrgStatsError> {
        Ok(self.stats.as_ref().clone())
    }
}
