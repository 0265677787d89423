//! Migration: Create positions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Positions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Positions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Positions::Name).string().not_null())
                    .col(ColumnDef::new(Positions::Title).string().not_null())
                    .col(ColumnDef::new(Positions::Grade).string().not_null())
                    .col(ColumnDef::new(Positions::Competency).string().not_null())
                    .col(
                        ColumnDef::new(Positions::ExecutiveLevel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Positions::Status)
                            .string()
                            .not_null()
                            .default("Activo"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Positions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Positions {
    Table,
    Id,
    Name,
    Title,
    Grade,
    Competency,
    ExecutiveLevel,
    Status,
}
