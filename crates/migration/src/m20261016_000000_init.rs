//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: login gate
//! - `donors`: people or organizations giving money
//! - `campaigns`: fundraising efforts
//! - `donations`: single contributions, owned by a donor and optionally
//!   attributed to a campaign
//!
//! `*_key` columns hold lowercased copies of searchable text.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
}

#[derive(Iden)]
enum Donors {
    Table,
    Id,
    Name,
    NameKey,
    Email,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    Title,
    TitleKey,
    Description,
    DescriptionKey,
}

#[derive(Iden)]
enum Donations {
    Table,
    Id,
    Amount,
    Timestamp,
    DonorId,
    CampaignId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Donors
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Donors::Name)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Donors::NameKey).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Donors::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Campaigns
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::Title)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Campaigns::TitleKey).string_len(120).not_null())
                    .col(ColumnDef::new(Campaigns::Description).text())
                    .col(ColumnDef::new(Campaigns::DescriptionKey).text())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Donations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Donations::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donations::DonorId).integer().not_null())
                    .col(ColumnDef::new(Donations::CampaignId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-donations-donor_id")
                            .from(Donations::Table, Donations::DonorId)
                            .to(Donors::Table, Donors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-donations-campaign_id")
                            .from(Donations::Table, Donations::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-donations-donor_id")
                    .table(Donations::Table)
                    .col(Donations::DonorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-donations-campaign_id")
                    .table(Donations::Table)
                    .col(Donations::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation so foreign keys never dangle
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
