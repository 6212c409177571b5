// ABOUTME: Creates the first, role-agnostic user_profiles table
// ABOUTME: Superseded by the customer/host split and dropped by a later step

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

pub const DEPENDS_ON: &[&str] = &["m20250101_000001_create_users"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserProfiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserProfiles::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(UserProfiles::PhoneNumber).string_len(15).not_null().default(""))
                    .col(ColumnDef::new(UserProfiles::Avatar).string_len(100).not_null().default(""))
                    .col(ColumnDef::new(UserProfiles::CreatedOn).big_integer().not_null())
                    .col(ColumnDef::new(UserProfiles::ModifiedOn).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user_id")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum UserProfiles {
    Table,
    Id,
    UserId,
    PhoneNumber,
    Avatar,
    CreatedOn,
    ModifiedOn,
}
