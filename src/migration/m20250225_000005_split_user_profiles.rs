// ABOUTME: Replaces the generic user profile with role-specific customer and host profiles
// ABOUTME: Also narrows the role column to 15 characters with "guest" as the default

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

use super::m20250101_000001_create_users::Users;
use super::m20250101_000003_create_user_profiles::UserProfiles;

pub const DEPENDS_ON: &[&str] = &[
    "m20250101_000001_create_users",
    "m20250101_000002_create_user_profile_links",
    "m20250101_000003_create_user_profiles",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite columns carry no enforced type or default we could alter;
        // the entity always writes the role explicitly.
        if manager.get_database_backend() != DbBackend::Sqlite {
            manager
                .alter_table(
                    Table::alter()
                        .table(Users::Table)
                        .modify_column(
                            ColumnDef::new(Users::Role).string_len(15).not_null().default("guest"),
                        )
                        .to_owned(),
                )
                .await?;
        } else {
            tracing::debug!("Skipping users.role column alteration on SQLite");
        }

        manager
            .create_table(
                Table::create()
                    .table(CustomerProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CustomerProfiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CustomerProfiles::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(CustomerProfiles::DateOfBirth).date())
                    .col(ColumnDef::new(CustomerProfiles::PhoneNumber).string_len(15).not_null().default(""))
                    .col(ColumnDef::new(CustomerProfiles::Avatar).string_len(100).not_null().default(""))
                    .col(ColumnDef::new(CustomerProfiles::CreatedOn).big_integer().not_null())
                    .col(ColumnDef::new(CustomerProfiles::ModifiedOn).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_profiles_user_id")
                            .from(CustomerProfiles::Table, CustomerProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HostProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HostProfiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(HostProfiles::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(HostProfiles::CompanyName).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(HostProfiles::PhoneNumber).string_len(15).not_null().default(""))
                    .col(ColumnDef::new(HostProfiles::CompanyLogo).string_len(100).not_null().default(""))
                    .col(ColumnDef::new(HostProfiles::CreatedOn).big_integer().not_null())
                    .col(ColumnDef::new(HostProfiles::ModifiedOn).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_host_profiles_user_id")
                            .from(HostProfiles::Table, HostProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CustomerProfiles {
    Table,
    Id,
    UserId,
    DateOfBirth,
    PhoneNumber,
    Avatar,
    CreatedOn,
    ModifiedOn,
}

#[derive(DeriveIden)]
enum HostProfiles {
    Table,
    Id,
    UserId,
    CompanyName,
    PhoneNumber,
    CompanyLogo,
    CreatedOn,
    ModifiedOn,
}
