//! Authentication module
//!
//! This module provides authentication functionality including:
//! - User registration and login
//! - JWT token generation and validation
//! - Password hashing and verification
//! - Authentication and role-authorization middleware

pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use handlers::{login, register};
pub use jwt::{generate_token, validate_token, Claims};
pub use middleware::{authenticate, require_role, AuthUser};
pub use password::{hash_password, verify_password};
