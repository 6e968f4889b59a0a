//! Password hashing and verification using bcrypt

use crate::core::error::{EduError, Result};

/// Hash a password using bcrypt with a fresh per-call salt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| EduError::Task(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored digest
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| EduError::Task(format!("Failed to verify password: {}", e)))
}
