//! API request models for the record-keeping endpoints

use serde::Deserialize;

/// Enroll request
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

/// Grade entry request
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub enrollment_id: String,
    pub grade: String,
}
