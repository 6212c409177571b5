// ABOUTME: Creates the packages listing table
// ABOUTME: Listings are not yet tied to a host at this point in the history

use sea_orm_migration::prelude::*;

pub const DEPENDS_ON: &[&str] = &[];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Packages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Packages::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Packages::Address).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(Packages::Description).text().not_null())
                    .col(ColumnDef::new(Packages::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    Id,
    Name,
    Address,
    Description,
    CreatedAt,
}
