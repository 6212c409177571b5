// ABOUTME: Field validation for incoming user, profile and package attributes
// ABOUTME: Collects every failing field into one map instead of stopping at the first

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::entities::user::UserRole;
use crate::types::{NewUser, UserInput};

pub const USER_REQUIRED_FIELDS: [&str; 4] = ["email", "first_name", "last_name", "role"];

/// Key for errors that concern the body as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const PHONE_NUMBER_MAX_LENGTH: usize = 15;
pub const COMPANY_NAME_MAX_LENGTH: usize = 255;

/// Field name to human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        // First message for a field wins
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest, so `first_name` becomes `First_Name`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

pub fn required_message(field: &str) -> String {
    format!("{} is required", title_case(field).replace('_', " "))
}

pub fn invalid_choice_message(value: &str) -> String {
    format!("\"{}\" is not a valid choice.", value)
}

pub fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

pub const NOT_A_STRING_MESSAGE: &str = "Not a valid string.";

pub fn invalid_data_message(body: &Value) -> String {
    let kind = match body {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    };
    format!("Invalid data. Expected a dictionary, but got {}.", kind)
}

pub const DATE_FORMAT_MESSAGE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// The value when it is present and non-empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn check_max_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, max_length_message(max));
    }
}

impl UserInput {
    /// Reads the writable attributes from a JSON body. A wrongly typed
    /// attribute is reported under its own name and left unset.
    pub fn from_json(body: &Value) -> (UserInput, ValidationErrors) {
        let mut errors = ValidationErrors::new();
        let Some(object) = body.as_object() else {
            errors.add(NON_FIELD_ERRORS, invalid_data_message(body));
            return (UserInput::default(), errors);
        };

        let mut read = |field: &str| match object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(_) => {
                errors.add(field, NOT_A_STRING_MESSAGE);
                None
            }
        };

        let input = UserInput {
            username: read("username"),
            first_name: read("first_name"),
            last_name: read("last_name"),
            email: read("email"),
            password: read("password"),
            role: read("role"),
        };
        (input, errors)
    }

    /// Checks the required fields and the role choice, reporting every
    /// problem at once.
    pub fn validate(self) -> Result<NewUser, ValidationErrors> {
        self.validate_with(ValidationErrors::new())
    }

    /// Like `validate`, adding to errors already found for this input. An
    /// earlier message for a field is kept.
    pub fn validate_with(self, mut errors: ValidationErrors) -> Result<NewUser, ValidationErrors> {

        let values = [&self.email, &self.first_name, &self.last_name, &self.role];
        for (field, value) in USER_REQUIRED_FIELDS.into_iter().zip(values) {
            if present(value).is_none() {
                errors.add(field, required_message(field));
            }
        }

        let role = match present(&self.role) {
            Some(value) => match UserRole::parse(value) {
                Some(role) => role,
                None => {
                    errors.add("role", invalid_choice_message(value));
                    UserRole::default()
                }
            },
            None => UserRole::default(),
        };

        if !errors.is_empty() {
            tracing::debug!(fields = %errors, "User input rejected");
            return Err(errors);
        }

        let email = self.email.unwrap_or_default();
        let username = match self.username {
            Some(username) if !username.is_empty() => username,
            _ => email.clone(),
        };

        Ok(NewUser {
            username,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email,
            password: self.password.filter(|p| !p.is_empty()),
            role,
        })
    }
}
