// ABOUTME: Request payloads and validated inputs for users, profiles, links and packages
// ABOUTME: Wire-facing input types deserialize leniently and are validated before reaching storage

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::validation::{self, ValidationErrors};

/// Raw attributes for a new user. Read-only attributes such as `id` or
/// `user_profile_links` are never read from the body.
#[derive(Debug, Default, Clone)]
pub struct UserInput {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// A user that passed validation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileLinksInput {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PackageInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub host_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub name: String,
    pub address: String,
    pub description: String,
    pub host_id: Option<Uuid>,
}

impl PackageInput {
    pub fn validate(self) -> Result<NewPackage, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if validation::present(&self.name).is_none() {
            errors.add("name", validation::required_message("name"));
        }

        errors.into_result(NewPackage {
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            host_id: self.host_id,
        })
    }
}

/// Partial update of a customer profile; `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct CustomerProfileChanges {
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub avatar: Option<String>,
}

/// Partial update of a host profile; `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct HostProfileChanges {
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub company_logo: Option<String>,
}
