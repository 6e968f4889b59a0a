//! Database models
//!
//! Data structures representing database tables

use serde::{Deserialize, Serialize};

/// User record in the database
///
/// Owned by the credential store; handlers only hold transient copies
/// returned from queries. The password hash is an opaque digest, never the
/// plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

/// Enrollment record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: i64,
    pub created_at: String,
}

/// Grade entry record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeEntry {
    pub id: String,
    pub enrollment_id: String,
    pub grade: String,
    pub entered_by: String,
    pub created_at: String,
}
