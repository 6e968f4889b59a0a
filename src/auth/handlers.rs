//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::auth::jwt::generate_token;
use crate::auth::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::core::error::{EduError, Result};
use crate::db::models::User;
use crate::db::repository::Repository;
use axum::{extract::State, response::IntoResponse, Json};
use uuid::Uuid;

/// Handler for POST /api/auth/register - User registration
///
/// Hashes the password and inserts the user. The store's unique constraint
/// on email is the only duplicate check; any store failure surfaces as a
/// generic server error without distinguishing its cause.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "User registration attempt");

    let password_hash = hash_password(&req.password)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email.clone(),
        password_hash,
        role: req.role,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.user_repo.create(&user).await.map_err(|e| {
        tracing::warn!(email = %req.email, error = %e, "Registration failed");
        e
    })?;

    tracing::info!(user_id = %user.id, email = %req.email, role = %user.role, "User registered");

    Ok(Json(MessageResponse {
        message: "User registered".to_string(),
    }))
}

/// Handler for POST /api/auth/login - User login
///
/// A missing user and a failed password check produce the same
/// InvalidCredentials failure, so the response does not reveal whether the
/// email exists.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "Login attempt");

    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or(EduError::InvalidCredentials)?;

    let is_valid = verify_password(&req.password, &user.password_hash)?;
    if !is_valid {
        tracing::warn!(email = %req.email, "Invalid password");
        return Err(EduError::InvalidCredentials);
    }

    let token = generate_token(
        &user.id,
        &user.role,
        &state.security.jwt_secret,
        state.security.token_ttl_hours,
    )?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse { token }))
}
