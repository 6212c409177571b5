// ABOUTME: User entity with the marketplace role and its one-to-one profile relations
// ABOUTME: Owns customer/host profiles, social links and hosted packages (all cascade on delete)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Marketplace role. Decides which profile, if any, is created with the user.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "host")]
    Host,
    #[default]
    #[sea_orm(string_value = "guest")]
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
            UserRole::Host => "host",
            UserRole::Guest => "guest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "customer" => Some(UserRole::Customer),
            "host" => Some(UserRole::Host),
            "guest" => Some(UserRole::Guest),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String, // argon2 PHC string, or "!..." when unusable
    pub role: UserRole,
    pub date_joined: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::customer_profile::Entity")]
    CustomerProfile,
    #[sea_orm(has_one = "super::host_profile::Entity")]
    HostProfile,
    #[sea_orm(has_one = "super::user_profile_links::Entity")]
    ProfileLinks,
    #[sea_orm(has_many = "super::package::Entity")]
    Packages,
}

impl Related<super::customer_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerProfile.def()
    }
}

impl Related<super::host_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HostProfile.def()
    }
}

impl Related<super::user_profile_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileLinks.def()
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_role_parse_matches_stored_value() {
        for role in UserRole::iter() {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
            assert_eq!(role.to_value(), role.as_str());
        }
        assert_eq!(UserRole::parse("Host"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Customer).unwrap();
        assert_eq!(json, "\"customer\"");
        assert_eq!(UserRole::default(), UserRole::Guest);
    }
}
