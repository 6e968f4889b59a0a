//! Repository pattern implementation for data access layer
//!
//! This module provides the Repository pattern for abstracting database
//! operations. Repositories are injected as explicit dependencies through
//! the application state; there is no shared global store handle.

use crate::core::error::{EduError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::models::{Enrollment, GradeEntry, User};
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::sync::Arc;

/// Generic repository trait for entity lookup
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find an entity by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<()>;
}

/// Repository for User entities
pub struct UserRepository {
    db: Arc<DatabaseManager>,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find a user by exact email match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, name, email, password_hash, role, created_at \
                     FROM users WHERE email = ?",
                    [&email],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                            password_hash: row.get(3)?,
                            role: row.get(4)?,
                            created_at: row.get(5)?,
                        })
                    },
                )
                .optional()
                .map_err(EduError::Database)
            })
            .await
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
                    .map_err(EduError::Database)
            })
            .await
    }
}

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, name, email, password_hash, role, created_at \
                     FROM users WHERE id = ?",
                    [&id],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                            password_hash: row.get(3)?,
                            role: row.get(4)?,
                            created_at: row.get(5)?,
                        })
                    },
                )
                .optional()
                .map_err(EduError::Database)
            })
            .await
    }

    async fn create(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO users (id, name, email, password_hash, role) \
                     VALUES (?, ?, ?, ?, ?)",
                    rusqlite::params![
                        &user.id,
                        &user.name,
                        &user.email,
                        &user.password_hash,
                        &user.role,
                    ],
                )
                .map_err(EduError::Database)?;
                Ok(())
            })
            .await
    }
}

/// Repository for Enrollment entities
pub struct EnrollmentRepository {
    db: Arc<DatabaseManager>,
}

impl EnrollmentRepository {
    /// Create a new EnrollmentRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Insert a new enrollment keyed by the enrolling student
    pub async fn create(&self, enrollment: &Enrollment) -> Result<()> {
        let enrollment = enrollment.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO enrollments (id, student_id, course_id) VALUES (?, ?, ?)",
                    rusqlite::params![
                        &enrollment.id,
                        &enrollment.student_id,
                        enrollment.course_id,
                    ],
                )
                .map_err(EduError::Database)?;
                Ok(())
            })
            .await
    }

    /// Find enrollments for a student
    pub async fn find_by_student(&self, student_id: &str) -> Result<Vec<Enrollment>> {
        let student_id = student_id.to_string();
        self.db
            .execute(move |conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, student_id, course_id, created_at \
                         FROM enrollments WHERE student_id = ? ORDER BY created_at DESC",
                    )
                    .map_err(EduError::Database)?;

                let enrollments = stmt
                    .query_map([&student_id], |row| {
                        Ok(Enrollment {
                            id: row.get(0)?,
                            student_id: row.get(1)?,
                            course_id: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    })
                    .map_err(EduError::Database)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(EduError::Database)?;

                Ok(enrollments)
            })
            .await
    }
}

/// Repository for GradeEntry entities
pub struct GradeRepository {
    db: Arc<DatabaseManager>,
}

impl GradeRepository {
    /// Create a new GradeRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Insert a new grade entry recording who entered it
    pub async fn create(&self, entry: &GradeEntry) -> Result<()> {
        let entry = entry.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO grades (id, enrollment_id, grade, entered_by) \
                     VALUES (?, ?, ?, ?)",
                    rusqlite::params![
                        &entry.id,
                        &entry.enrollment_id,
                        &entry.grade,
                        &entry.entered_by,
                    ],
                )
                .map_err(EduError::Database)?;
                Ok(())
            })
            .await
    }

    /// Find grade entries for an enrollment
    pub async fn find_by_enrollment(&self, enrollment_id: &str) -> Result<Vec<GradeEntry>> {
        let enrollment_id = enrollment_id.to_string();
        self.db
            .execute(move |conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, enrollment_id, grade, entered_by, created_at \
                         FROM grades WHERE enrollment_id = ? ORDER BY created_at DESC",
                    )
                    .map_err(EduError::Database)?;

                let grades = stmt
                    .query_map([&enrollment_id], |row| {
                        Ok(GradeEntry {
                            id: row.get(0)?,
                            enrollment_id: row.get(1)?,
                            grade: row.get(2)?,
                            entered_by: row.get(3)?,
                            created_at: row.get(4)?,
                        })
                    })
                    .map_err(EduError::Database)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(EduError::Database)?;

                Ok(grades)
            })
            .await
    }
}
