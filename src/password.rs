// ABOUTME: Password hashing for stored user credentials using Argon2
// ABOUTME: Produces PHC strings, or an unusable marker when no password was supplied

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Prefix of a stored password that can never match any input.
pub const UNUSABLE_PASSWORD_PREFIX: char = '!';

pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

pub fn unusable_password() -> String {
    format!("{}{}", UNUSABLE_PASSWORD_PREFIX, Uuid::new_v4().simple())
}

/// Value to store for an optional plaintext password.
pub fn make_password(plaintext: Option<&str>) -> Result<String> {
    match plaintext {
        Some(plaintext) => hash_password(plaintext),
        None => Ok(unusable_password()),
    }
}
