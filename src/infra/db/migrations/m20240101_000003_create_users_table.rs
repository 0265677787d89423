//! Migration: Create users table.
//!
//! `password` holds either a PHC/modular-crypt hash or a legacy plaintext
//! value awaiting migration on its owner's next login.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_positions_table::Positions;
use super::m20240101_000002_create_units_table::Units;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                    .col(ColumnDef::new(Users::Document).string().not_null())
                    .col(ColumnDef::new(Users::IssuePlace).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::HireDate).date().null())
                    .col(ColumnDef::new(Users::PositionId).integer().null())
                    .col(ColumnDef::new(Users::UnitId).integer().null())
                    .col(ColumnDef::new(Users::Appointment).string().not_null())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_position_id")
                            .from(Users::Table, Users::PositionId)
                            .to(Positions::Table, Positions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_unit_id")
                            .from(Users::Table, Users::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Document,
    IssuePlace,
    FullName,
    HireDate,
    PositionId,
    UnitId,
    Appointment,
    Username,
    Password,
    Email,
}
