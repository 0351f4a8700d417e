use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::error;

use crate::report::application::domain::entities::ActivityRecord;
use crate::report::application::domain::stats::normalize_phone;
use crate::report::application::ports::outgoing::{RecordQueryError, VolunteerRecordQuery};

// SeaORM entity
use super::sea_orm_entity::{
    Column as RecordColumn, Entity as RecordEntity, Model as RecordModel,
};

#[derive(Debug, Clone)]
pub struct VolunteerRecordQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl VolunteerRecordQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VolunteerRecordQuery for VolunteerRecordQueryPostgres {
    async fn find_by_identity(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Vec<ActivityRecord>, RecordQueryError> {
        let phone = normalize_phone(phone);
        if name.is_empty() || phone.is_empty() {
            return Ok(Vec::new());
        }

        // ASC puts NULL dates last on Postgres
        let models: Vec<RecordModel> = RecordEntity::find()
            .filter(RecordColumn::Name.eq(name))
            .filter(RecordColumn::Phone.eq(phone))
            .order_by_asc(RecordColumn::ActivityDate)
            .order_by_asc(RecordColumn::Id)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load volunteer records");
                RecordQueryError::DatabaseError(e.to_string())
            })?;

        Ok(models.iter().map(RecordModel::to_activity_record).collect())
    }

    async fn find_by_activity_names(
        &self,
        activity_names: &[String],
    ) -> Result<Vec<ActivityRecord>, RecordQueryError> {
        if activity_names.is_empty() {
            return Ok(Vec::new());
        }

        let models: Vec<RecordModel> = RecordEntity::find()
            .filter(RecordColumn::ActivityName.is_in(activity_names.iter().cloned()))
            .order_by_asc(RecordColumn::Id)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load related activity records");
                RecordQueryError::DatabaseError(e.to_string())
            })?;

        Ok(models.iter().map(RecordModel::to_activity_record).collect())
    }
}
