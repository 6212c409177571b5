// ABOUTME: Creates the social links table attached one-to-one to users
// ABOUTME: Rows cascade away with their user

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
                    .table(UserProfileLinks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserProfileLinks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserProfileLinks::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(UserProfileLinks::Facebook).string_len(255))
                    .col(ColumnDef::new(UserProfileLinks::Twitter).string_len(255))
                    .col(ColumnDef::new(UserProfileLinks::Instagram).string_len(255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_links_user_id")
                            .from(UserProfileLinks::Table, UserProfileLinks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum UserProfileLinks {
    Table,
    Id,
    UserId,
    Facebook,
    Twitter,
    Instagram,
}
