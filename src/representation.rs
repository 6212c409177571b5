// ABOUTME: Read-path projections of stored records into their wire representations
// ABOUTME: Pure functions of stored state; nested users and social links are read-only

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{customer_profile, host_profile, package, user, user_profile_links};
use crate::entities::user::UserRole;
use crate::media::media_url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileLinksRepresentation {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

impl From<&user_profile_links::Model> for UserProfileLinksRepresentation {
    fn from(links: &user_profile_links::Model) -> Self {
        Self {
            facebook: links.facebook.clone(),
            twitter: links.twitter.clone(),
            instagram: links.instagram.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRepresentation {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub user_profile_links: Option<UserProfileLinksRepresentation>,
}

impl UserRepresentation {
    pub fn project(user: &user::Model, links: Option<&user_profile_links::Model>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role,
            user_profile_links: links.map(UserProfileLinksRepresentation::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostProfileRepresentation {
    pub id: Uuid,
    pub user: UserRepresentation,
    pub company_name: String,
    pub phone_number: String,
    pub company_logo: Option<String>,
    pub created_on: i64,
    pub modified_on: i64,
}

impl HostProfileRepresentation {
    pub fn project(profile: &host_profile::Model, user: UserRepresentation) -> Self {
        Self {
            id: profile.id,
            user,
            company_name: profile.company_name.clone(),
            phone_number: profile.phone_number.clone(),
            company_logo: media_url(&profile.company_logo),
            created_on: profile.created_on,
            modified_on: profile.modified_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfileRepresentation {
    pub user: UserRepresentation,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: String,
    pub avatar: Option<String>,
}

impl CustomerProfileRepresentation {
    pub fn project(profile: &customer_profile::Model, user: UserRepresentation) -> Self {
        Self {
            user,
            date_of_birth: profile.date_of_birth,
            phone_number: profile.phone_number.clone(),
            avatar: media_url(&profile.avatar),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRepresentation {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub description: String,
    pub host: Option<Uuid>,
    pub created_at: i64,
}

impl From<&package::Model> for PackageRepresentation {
    fn from(package: &package::Model) -> Self {
        Self {
            id: package.id,
            name: package.name.clone(),
            address: package.address.clone(),
            description: package.description.clone(),
            host: package.host_id,
            created_at: package.created_at,
        }
    }
}
