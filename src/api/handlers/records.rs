//! Handlers for the role-gated record-keeping endpoints
//!
//! Both handlers run behind authenticate + require_role; the authenticated
//! identity's id is the one written to the store, binding the acting
//! identity to the row it owns.

use crate::api::models::{EnrollRequest, GradeRequest};
use crate::auth::middleware::AuthUser;
use crate::auth::models::MessageResponse;
use crate::core::error::Result;
use crate::db::models::{Enrollment, GradeEntry};
use crate::notify::GradeNotification;
use axum::{extract::State, response::IntoResponse, Json};
use uuid::Uuid;

use super::AppState;

/// Handler for POST /api/students/enroll - Enroll the authenticated student
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<EnrollRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(student_id = %user.id, course_id = req.course_id, "Enrollment attempt");

    let enrollment = Enrollment {
        id: Uuid::new_v4().to_string(),
        student_id: user.id,
        course_id: req.course_id,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.enrollment_repo.create(&enrollment).await?;

    tracing::info!(enrollment_id = %enrollment.id, "Enrollment recorded");

    Ok(Json(MessageResponse {
        message: "Enrolled".to_string(),
    }))
}

/// Handler for POST /api/students/grade - Record a grade entry
///
/// The notification fires only after the insert succeeds, and its outcome
/// never affects the response.
pub async fn grade(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<GradeRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(
        entered_by = %user.id,
        enrollment_id = %req.enrollment_id,
        "Grade entry attempt"
    );

    let entry = GradeEntry {
        id: Uuid::new_v4().to_string(),
        enrollment_id: req.enrollment_id,
        grade: req.grade,
        entered_by: user.id,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.grade_repo.create(&entry).await?;

    tracing::info!(grade_id = %entry.id, "Grade recorded");

    state.notifier.dispatch(GradeNotification {
        enrollment_id: entry.enrollment_id,
        grade: entry.grade,
        entered_by: entry.entered_by,
    });

    Ok(Json(MessageResponse {
        message: "Grade entered".to_string(),
    }))
}
