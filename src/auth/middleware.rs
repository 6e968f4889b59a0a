//! Authentication and authorization middleware

use crate::auth::jwt::validate_token;
use crate::core::error::{EduError, Result};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Authenticated identity attached to the request after token validation
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

/// Authentication middleware
///
/// Extracts the bearer token from the Authorization header and verifies its
/// signature and expiry against the server secret. Valid claims are attached
/// to the request extensions for downstream handlers. The credential store
/// is never consulted here; the token's claims are trusted as of issuance.
pub async fn authenticate(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty());

    let token = match token {
        Some(t) => t,
        None => {
            let error = EduError::Unauthenticated("Missing bearer token".to_string());
            return error.into_response();
        }
    };

    let claims = match validate_token(token, &state.security.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: claims.role,
    });

    next.run(request).await
}

/// Authorization middleware, parameterized by the permitted role set
///
/// Must run after `authenticate`; relies on the AuthUser it attached. A role
/// outside the permitted set fails the request with Forbidden before the
/// handler runs. Pure predicate, no store access.
pub async fn require_role(
    allowed: &'static [&'static str],
    request: Request,
    next: Next,
) -> Response {
    let user = match request.extensions().get::<AuthUser>() {
        Some(u) => u,
        None => {
            let error = EduError::Unauthenticated("Not authenticated".to_string());
            return error.into_response();
        }
    };

    if !allowed.contains(&user.role.as_str()) {
        tracing::warn!(user_id = %user.id, role = %user.role, "Role not permitted for route");
        let error = EduError::Forbidden(format!("role '{}' not permitted", user.role));
        return error.into_response();
    }

    next.run(request).await
}

// Implement FromRequestParts for AuthUser to enable extraction in handlers
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = EduError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| EduError::Unauthenticated("Not authenticated".to_string()))
    }
}
