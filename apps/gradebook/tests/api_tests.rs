//! Integration tests for the gradebook HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use gradebook::api::{
    AppState, ErrorResponse, GradeDto, HealthResponse, StudentDto, create_router,
};
use gradebook::config::ServerConfig;
use gradebook_core::{Discipline, Gradebook, StudentId};
use serde_json::{Value, json};
use std::collections::BTreeMap;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Server config with rate limiting off.
fn test_config() -> ServerConfig {
    ServerConfig {
        rate_limit: 0,
        ..ServerConfig::default()
    }
}

/// Create a test server with a fresh in-memory gradebook.
fn create_test_server() -> TestServer {
    TestServer::new(create_router(AppState::new(Gradebook::new()), &test_config())).unwrap()
}

/// Create a test server with one student (id 1) holding five grades.
fn create_populated_test_server() -> TestServer {
    let mut gradebook = Gradebook::new();
    let id = gradebook
        .add_student("John", "White", "G11")
        .unwrap()
        .id()
        .unwrap();
    for (value, discipline) in [
        (9.0, Discipline::Geometry),
        (10.0, Discipline::Geometry),
        (9.5, Discipline::Algebra),
        (2.0, Discipline::ArtificialIntelligence),
        (5.0, Discipline::ArtificialIntelligence),
    ] {
        gradebook.add_grade(id, value, discipline).unwrap();
    }
    assert_eq!(id, StudentId(1));

    TestServer::new(create_router(AppState::new(gradebook), &test_config())).unwrap()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// STUDENT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_list_students_empty() {
    let server = create_test_server();

    let response = server.get("/api/students").await;

    response.assert_status_ok();
    let students: Vec<StudentDto> = response.json();
    assert!(students.is_empty());
}

#[tokio::test]
async fn test_list_students_json_shape() {
    let server = create_populated_test_server();

    let response = server.get("/api/students").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["firstName"], "John");
    assert_eq!(body[0]["lastName"], "White");
    assert_eq!(body[0]["group"], "G11");
    assert_eq!(body[0]["grades"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_add_student_created() {
    let server = create_test_server();

    let response = server
        .post("/api/students")
        .json(&json!({
            "firstName": "John",
            "lastName": "White",
            "group": "G11"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let student: StudentDto = response.json();
    assert_eq!(student.id, Some(1));
    assert_eq!(student.first_name, "John");
    assert_eq!(student.last_name, "White");
    assert_eq!(student.group, "G11");
    assert!(student.grades.is_empty());

    let listed: Vec<StudentDto> = server.get("/api/students").await.json();
    assert_eq!(listed, vec![student]);
}

#[tokio::test]
async fn test_add_student_blank_name_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/students")
        .json(&json!({"firstName": " ", "lastName": "White", "group": "G11"}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("firstName"));

    let listed: Vec<StudentDto> = server.get("/api/students").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_add_student_missing_field_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/students")
        .json(&json!({"firstName": "John"}))
        .await;

    assert!(response.status_code().is_client_error());
}

// =============================================================================
// GRADE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_list_grades() {
    let server = create_populated_test_server();

    let response = server.get("/api/students/1/grades").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["value"], 9.0);
    assert_eq!(body[0]["discipline"], "GEOMETRY");
}

#[tokio::test]
async fn test_add_grade_created_and_listed() {
    let server = create_populated_test_server();

    let response = server
        .post("/api/students/1/grades")
        .json(&json!({"value": 9.0, "discipline": "WEB_DEVELOPMENT"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let grade: GradeDto = response.json();
    assert_eq!(grade.id, Some(6));
    assert_eq!(grade.value, 9.0);
    assert_eq!(grade.discipline, Discipline::WebDevelopment);

    let grades: Vec<GradeDto> = server.get("/api/students/1/grades").await.json();
    assert_eq!(grades.len(), 6);
    assert!(grades.contains(&grade));

    let promotion: BTreeMap<Discipline, bool> =
        server.get("/api/students/1/promotion").await.json();
    assert!(promotion[&Discipline::WebDevelopment]);
}

#[tokio::test]
async fn test_add_grade_only_affects_target_student() {
    let server = create_populated_test_server();
    server
        .post("/api/students")
        .json(&json!({"firstName": "Jane", "lastName": "Black", "group": "G12"}))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/students/2/grades")
        .json(&json!({"value": 3.0, "discipline": "ALGEBRA"}))
        .await
        .assert_status(StatusCode::CREATED);

    let johns: Vec<GradeDto> = server.get("/api/students/1/grades").await.json();
    let janes: Vec<GradeDto> = server.get("/api/students/2/grades").await.json();
    assert_eq!(johns.len(), 5);
    assert_eq!(janes.len(), 1);

    let average: BTreeMap<Discipline, f64> = server.get("/api/students/1/average").await.json();
    assert_eq!(average[&Discipline::Algebra], 9.5);
}

#[tokio::test]
async fn test_add_grade_unknown_discipline_rejected() {
    let server = create_populated_test_server();

    let response = server
        .post("/api/students/1/grades")
        .json(&json!({"value": 9.0, "discipline": "CHEMISTRY"}))
        .await;

    assert!(response.status_code().is_client_error());
    let grades: Vec<GradeDto> = server.get("/api/students/1/grades").await.json();
    assert_eq!(grades.len(), 5);
}

#[tokio::test]
async fn test_remove_grade() {
    let server = create_populated_test_server();

    let response = server.delete("/api/students/1/grades/5").await;

    response.assert_status_ok();
    let removed: GradeDto = response.json();
    assert_eq!(removed.id, Some(5));
    assert_eq!(removed.discipline, Discipline::ArtificialIntelligence);

    let average: BTreeMap<Discipline, f64> = server.get("/api/students/1/average").await.json();
    assert_eq!(average[&Discipline::ArtificialIntelligence], 2.0);

    server
        .delete("/api/students/1/grades/5")
        .await
        .assert_status_not_found();
}

// =============================================================================
// AGGREGATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_average_per_discipline() {
    let server = create_populated_test_server();

    let response = server.get("/api/students/1/average").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_object().unwrap().len(), 3);
    assert_eq!(body["GEOMETRY"], 9.5);
    assert_eq!(body["ALGEBRA"], 9.5);
    assert_eq!(body["ARTIFICIAL_INTELLIGENCE"], 3.5);
}

#[tokio::test]
async fn test_max_per_discipline() {
    let server = create_populated_test_server();

    let response = server.get("/api/students/1/max").await;

    response.assert_status_ok();
    let max: BTreeMap<Discipline, f64> = response.json();
    assert_eq!(max.len(), 3);
    assert_eq!(max[&Discipline::Geometry], 10.0);
    assert_eq!(max[&Discipline::Algebra], 9.5);
    assert_eq!(max[&Discipline::ArtificialIntelligence], 5.0);
}

#[tokio::test]
async fn test_promotion_per_discipline() {
    let server = create_populated_test_server();

    let response = server.get("/api/students/1/promotion").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "ALGEBRA": true,
            "GEOMETRY": true,
            "ARTIFICIAL_INTELLIGENCE": false,
            "PROGRAMMING_FUNDAMENTALS": false,
            "WEB_DEVELOPMENT": false
        })
    );
}

#[tokio::test]
async fn test_aggregates_for_student_without_grades() {
    let server = create_test_server();
    server
        .post("/api/students")
        .json(&json!({"firstName": "Jane", "lastName": "Black", "group": "G12"}))
        .await
        .assert_status(StatusCode::CREATED);

    let average: BTreeMap<Discipline, f64> = server.get("/api/students/1/average").await.json();
    let max: BTreeMap<Discipline, f64> = server.get("/api/students/1/max").await.json();
    let promotion: BTreeMap<Discipline, bool> =
        server.get("/api/students/1/promotion").await.json();

    assert!(average.is_empty());
    assert!(max.is_empty());
    assert_eq!(promotion.len(), Discipline::ALL.len());
    assert!(promotion.values().all(|p| !p));
}

// =============================================================================
// NOT FOUND TESTS
// =============================================================================

#[tokio::test]
async fn test_unknown_student_is_not_found() {
    let server = create_populated_test_server();

    for path in [
        "/api/students/42/grades",
        "/api/students/42/average",
        "/api/students/42/max",
        "/api/students/42/promotion",
    ] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "Student not found: 42", "path {}", path);
    }
}

#[tokio::test]
async fn test_add_grade_unknown_student_is_not_found() {
    let server = create_populated_test_server();

    let response = server
        .post("/api/students/42/grades")
        .json(&json!({"value": 9.0, "discipline": "ALGEBRA"}))
        .await;

    response.assert_status_not_found();
    let students: Vec<StudentDto> = server.get("/api/students").await.json();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].grades.len(), 5);
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let server = create_test_server();

    let response = server.get("/api/students/abc/grades").await;

    response.assert_status_bad_request();
}

// =============================================================================
// MIDDLEWARE TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let config = ServerConfig {
        rate_limit: 1,
        ..ServerConfig::default()
    };
    let server = TestServer::new(create_router(AppState::new(Gradebook::new()), &config)).unwrap();

    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_redb_backed_server() {
    let temp = tempfile::tempdir().unwrap();
    let gradebook = Gradebook::with_redb(temp.path().join("api.redb")).unwrap();
    let server = TestServer::new(create_router(AppState::new(gradebook), &test_config())).unwrap();

    server
        .post("/api/students")
        .json(&json!({"firstName": "John", "lastName": "White", "group": "G11"}))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/students/1/grades")
        .json(&json!({"value": 4.5, "discipline": "GEOMETRY"}))
        .await
        .assert_status(StatusCode::CREATED);

    let promotion: BTreeMap<Discipline, bool> =
        server.get("/api/students/1/promotion").await.json();
    assert!(!promotion[&Discipline::Geometry]);
}
