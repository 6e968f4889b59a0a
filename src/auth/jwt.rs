//! JWT token generation and validation

use crate::core::error::{EduError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure
///
/// `sub` carries the user id and `role` the role stored on the user at the
/// moment of issuance; later role changes are not reflected in tokens that
/// are already out.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Generate a JWT token for a user
pub fn generate_token(user_id: &str, role: &str, secret: &str, ttl_hours: i64) -> Result<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| EduError::Unauthenticated("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| EduError::Unauthenticated(format!("Failed to generate token: {}", e)))
}

/// Validate a JWT token and extract claims
///
/// Checks the signature against the server secret and the expiry claim;
/// anything else about the token is trusted as issued.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| EduError::Unauthenticated(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}
