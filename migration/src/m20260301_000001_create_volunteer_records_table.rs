//! # Volunteer Records Table Migration
//!
//! One row per (volunteer, activity) participation, the flat ledger the annual
//! report is computed from.
//!
//! ## Key Columns
//! - `phone`: the identity number the visitor types on the gate slide, stored
//!   with every non-digit removed so lookups compare digits only.
//! - `activity_date`: nullable; undated rows still count towards hours and tags
//!   but never towards month statistics.
//! - `hours`: service hours credited for the activity, `0` when unknown.
//! - `cover_img`: file name inside the photo folder, served under `/media/images/`.
//!
//! ## Indexes
//! - `idx_volunteer_records_identity`: the per-visitor lookup `(name, phone)`
//! - `idx_volunteer_records_activity_name`: co-volunteer lookup by activity

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VolunteerRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VolunteerRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VolunteerRecords::Name).string_len(64).not_null())
                    .col(ColumnDef::new(VolunteerRecords::Phone).string_len(32).not_null())
                    .col(
                        ColumnDef::new(VolunteerRecords::ActivityName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VolunteerRecords::ActivityType)
                            .string_len(32)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(VolunteerRecords::ActivityDate).date())
                    .col(
                        ColumnDef::new(VolunteerRecords::Hours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(VolunteerRecords::CoverImg).string_len(255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_volunteer_records_identity")
                    .table(VolunteerRecords::Table)
                    .col(VolunteerRecords::Name)
                    .col(VolunteerRecords::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_volunteer_records_activity_name")
                    .table(VolunteerRecords::Table)
                    .col(VolunteerRecords::ActivityName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VolunteerRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VolunteerRecords {
    Table,
    Id,
    Name,
    Phone,
    ActivityName,
    ActivityType,
    ActivityDate,
    Hours,
    CoverImg,
}
