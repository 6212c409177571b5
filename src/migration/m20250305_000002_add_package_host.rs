// ABOUTME: Adds the optional host relation from packages to the identity model
// ABOUTME: Deleting a host user cascades to the packages they list

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

use super::m20250101_000001_create_users::Users;

pub const DEPENDS_ON: &[&str] = &["m20250102_000001_create_packages", super::IDENTITY_MODEL];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() == DbBackend::Sqlite {
            // SQLite cannot add a constraint to an existing table, only an
            // inline REFERENCES on the new column.
            return manager
                .alter_table(
                    Table::alter()
                        .table(Packages::Table)
                        .add_column(
                            ColumnDef::new(Packages::HostId)
                                .uuid()
                                .null()
                                .extra("REFERENCES \"users\" (\"id\") ON DELETE CASCADE"),
                        )
                        .to_owned(),
                )
                .await;
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Packages::Table)
                    .add_column(ColumnDef::new(Packages::HostId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_packages_host_id")
                    .from(Packages::Table, Packages::HostId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    HostId,
}
