//! API routes

use crate::api::handlers::{enroll, grade, AppState};
use crate::auth::handlers::{login, register};
use crate::auth::middleware::{authenticate, require_role};
use axum::{
    extract::Request,
    middleware,
    middleware::Next,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

/// Roles permitted to enroll
const STUDENT_ROLES: &[&str] = &["student"];

/// Roles permitted to enter grades
const FACULTY_ROLES: &[&str] = &["faculty"];

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/health", get(health_check));

    // Role-gated routes; each group carries its own permitted set
    let student_routes = Router::new()
        .route("/api/students/enroll", post(enroll))
        .layer(middleware::from_fn(|req: Request, next: Next| {
            require_role(STUDENT_ROLES, req, next)
        }));

    let faculty_routes = Router::new()
        .route("/api/students/grade", post(grade))
        .layer(middleware::from_fn(|req: Request, next: Next| {
            require_role(FACULTY_ROLES, req, next)
        }));

    // Authentication wraps every protected route and runs before the role gates
    let protected_routes = student_routes
        .merge(faculty_routes)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes.merge(protected_routes).with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::validate_token;
    use crate::core::config::{NotifierConfig, SecurityConfig};
    use crate::db::repository::{EnrollmentRepository, GradeRepository, UserRepository};
    use crate::db::DatabaseManager;
    use crate::notify::GradeNotifier;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    const TEST_SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        AppState {
            user_repo: Arc::new(UserRepository::new(db.clone())),
            enrollment_repo: Arc::new(EnrollmentRepository::new(db.clone())),
            grade_repo: Arc::new(GradeRepository::new(db)),
            security: Arc::new(SecurityConfig {
                jwt_secret: TEST_SECRET.to_string(),
                token_ttl_hours: 24,
                allowed_origins: vec!["*".to_string()],
            }),
            notifier: Arc::new(GradeNotifier::new(NotifierConfig {
                enabled: false,
                endpoint: String::new(),
                timeout: 5,
            })),
        }
    }

    fn post_json(uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router, email: &str, role: &str) -> String {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": "pw",
                    "role": role,
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({ "email": email, "password": "pw" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = build_api_routes(test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_then_login_claims_match_stored_user() {
        let state = test_state();
        let app = build_api_routes(state.clone());

        let token = register_and_login(&app, "a@x.com", "student").await;

        let stored = state.user_repo.find_by_email("a@x.com").await.unwrap().unwrap();
        let claims = validate_token(&token, TEST_SECRET).unwrap();

        assert_eq!(claims.sub, stored.id);
        assert_eq!(claims.role, stored.role);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = build_api_routes(test_state());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/register",
                serde_json::json!({
                    "name": "A",
                    "email": "a@x.com",
                    "password": "pw",
                    "role": "student",
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Known email, wrong password
        let wrong_password = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({ "email": "a@x.com", "password": "nope" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

        // Unknown email
        let unknown_email = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({ "email": "ghost@x.com", "password": "pw" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);

        // Same error shape either way; the body does not reveal which
        // condition failed
        let a = body_json(wrong_password).await;
        let b = body_json(unknown_email).await;
        assert_eq!(a["error"], "InvalidCredentials");
        assert_eq!(a["error"], b["error"]);
        assert_eq!(a["message"], b["message"]);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_store_failure() {
        let app = build_api_routes(test_state());

        let body = serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "password": "pw",
            "role": "student",
        });

        let first = app
            .clone()
            .oneshot(post_json("/api/auth/register", body.clone(), None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(post_json("/api/auth/register", body, None))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The store detail stays out of the response
        let error = body_json(second).await;
        assert_eq!(error["error"], "StoreError");
        assert_eq!(error["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_protected_routes_reject_missing_and_invalid_tokens() {
        let app = build_api_routes(test_state());

        for uri in ["/api/students/enroll", "/api/students/grade"] {
            // Missing token
            let response = app
                .clone()
                .oneshot(post_json(uri, serde_json::json!({}), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            // Empty token
            let response = app
                .clone()
                .oneshot(post_json(uri, serde_json::json!({}), Some("")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            // Malformed token
            let response = app
                .clone()
                .oneshot(post_json(uri, serde_json::json!({}), Some("garbage")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            // Signature from a different secret
            let forged =
                crate::auth::jwt::generate_token("u1", "student", "other-secret", 24).unwrap();
            let response = app
                .clone()
                .oneshot(post_json(uri, serde_json::json!({}), Some(&forged)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_enroll_scenario_and_role_gating() {
        let state = test_state();
        let app = build_api_routes(state.clone());

        let token = register_and_login(&app, "a@x.com", "student").await;

        // Enroll with the student token
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/students/enroll",
                serde_json::json!({ "course_id": 7 }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Enrolled");

        // The enrollment row is owned by the authenticated identity
        let student = state.user_repo.find_by_email("a@x.com").await.unwrap().unwrap();
        let enrollments = state.enrollment_repo.find_by_student(&student.id).await.unwrap();
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].course_id, 7);

        // Grade entry with the same (student) token is forbidden
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/students/grade",
                serde_json::json!({ "enrollment_id": enrollments[0].id, "grade": "A" }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "Forbidden");
    }

    #[tokio::test]
    async fn test_faculty_can_grade_but_not_enroll() {
        let state = test_state();
        let app = build_api_routes(state.clone());

        let token = register_and_login(&app, "prof@x.com", "faculty").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/students/grade",
                serde_json::json!({ "enrollment_id": "e1", "grade": "B+" }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Grade entered");

        // The entry records who entered it
        let faculty = state.user_repo.find_by_email("prof@x.com").await.unwrap().unwrap();
        let grades = state.grade_repo.find_by_enrollment("e1").await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].entered_by, faculty.id);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/students/enroll",
                serde_json::json!({ "course_id": 7 }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_role_is_forbidden_everywhere() {
        let app = build_api_routes(test_state());

        // Registration accepts any role value; the gates still reject it
        let token = register_and_login(&app, "x@x.com", "registrar").await;

        for (uri, body) in [
            ("/api/students/enroll", serde_json::json!({ "course_id": 1 })),
            (
                "/api/students/grade",
                serde_json::json!({ "enrollment_id": "e1", "grade": "A" }),
            ),
        ] {
            let response = app
                .clone()
                .oneshot(post_json(uri, body, Some(&token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
    }
}
