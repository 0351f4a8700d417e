use crate::report::application::domain::entities::ActivityRecord;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "volunteer_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// Digits only.
    pub phone: String,

    pub activity_name: String,

    pub activity_type: String,

    pub activity_date: Option<Date>,

    #[sea_orm(column_type = "Double")]
    pub hours: f64,

    pub cover_img: Option<String>,
}

impl Model {
    pub fn to_activity_record(&self) -> ActivityRecord {
        ActivityRecord {
            name: self.name.clone(),
            phone: self.phone.clone(),
            activity_name: self.activity_name.trim().to_string(),
            activity_type: self.activity_type.trim().to_string(),
            activity_date: self.activity_date,
            hours: if self.hours.is_finite() { self.hours } else { 0.0 },
            cover_img: self.cover_img.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
