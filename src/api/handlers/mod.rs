pub mod records;

pub use records::*;

use crate::core::config::SecurityConfig;
use crate::db::repository::{EnrollmentRepository, GradeRepository, UserRepository};
use crate::notify::GradeNotifier;
use std::sync::Arc;

/// Shared application state for handlers
///
/// Every collaborator is an explicit dependency; handlers never reach for
/// process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<UserRepository>,
    pub enrollment_repo: Arc<EnrollmentRepository>,
    pub grade_repo: Arc<GradeRepository>,
    pub security: Arc<SecurityConfig>,
    pub notifier: Arc<GradeNotifier>,
}
