use async_trait::async_trait;

use crate::report::application::domain::entities::AnnualReport;

//
// ──────────────────────────────────────────────────────────
// Get Annual Report Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct GetAnnualReportCommand {
    name: String,
    phone: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetAnnualReportCommandError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Phone cannot be empty")]
    EmptyPhone,
}

impl GetAnnualReportCommand {
    pub fn new(name: String, phone: String) -> Result<Self, GetAnnualReportCommandError> {
        let name = name.trim();
        let phone = phone.trim();

        if name.is_empty() {
            return Err(GetAnnualReportCommandError::EmptyName);
        }

        if phone.is_empty() {
            return Err(GetAnnualReportCommandError::EmptyPhone);
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetAnnualReportError {
    #[error("Failed to query volunteer records: {0}")]
    QueryFailed(String),

    #[error("Organisation stats unavailable: {0}")]
    OrgStatsUnavailable(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait GetAnnualReportUseCase: Send + Sync {
    async fn execute(
        &self,
        command: GetAnnualReportCommand,
    ) -> Result<AnnualReport, GetAnnualReportError>;
}
