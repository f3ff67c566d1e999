//! Wire-format tests for the API request and response types.

#![allow(clippy::unwrap_used, clippy::panic)]

use gradebook::api::{ErrorResponse, GradeDto, GradeRequest, HealthResponse, StudentDto, StudentRequest};
use gradebook_core::Discipline;
use serde_json::{Value, json};
use std::collections::BTreeMap;

// =============================================================================
// REQUESTS
// =============================================================================

#[test]
fn test_student_request_uses_camel_case() {
    let request: StudentRequest = serde_json::from_value(json!({
        "firstName": "John",
        "lastName": "White",
        "group": "G11"
    }))
    .unwrap();

    assert_eq!(request.first_name, "John");
    assert_eq!(request.last_name, "White");
    assert_eq!(request.group, "G11");
}

#[test]
fn test_student_request_rejects_snake_case() {
    let result: Result<StudentRequest, _> = serde_json::from_value(json!({
        "first_name": "John",
        "last_name": "White",
        "group": "G11"
    }));
    assert!(result.is_err());
}

#[test]
fn test_grade_request_discipline_names() {
    for discipline in Discipline::ALL {
        let request: GradeRequest =
            serde_json::from_value(json!({"value": 7.5, "discipline": discipline.name()}))
                .unwrap();
        assert_eq!(request.discipline, discipline);
        assert_eq!(request.value, 7.5);
    }
}

#[test]
fn test_grade_request_rejects_unknown_discipline() {
    let result: Result<GradeRequest, _> =
        serde_json::from_value(json!({"value": 7.5, "discipline": "algebra"}));
    assert!(result.is_err());
}

// =============================================================================
// RESPONSES
// =============================================================================

#[test]
fn test_student_dto_serialization() {
    let dto = StudentDto {
        id: Some(3),
        first_name: "Jane".to_string(),
        last_name: "Black".to_string(),
        group: "G12".to_string(),
        grades: vec![GradeDto {
            id: Some(8),
            value: 4.0,
            discipline: Discipline::ProgrammingFundamentals,
        }],
    };

    let value = serde_json::to_value(&dto).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 3,
            "firstName": "Jane",
            "lastName": "Black",
            "group": "G12",
            "grades": [
                {"id": 8, "value": 4.0, "discipline": "PROGRAMMING_FUNDAMENTALS"}
            ]
        })
    );
}

#[test]
fn test_discipline_map_keys() {
    let map: BTreeMap<Discipline, f64> = [
        (Discipline::WebDevelopment, 6.0),
        (Discipline::Algebra, 9.5),
    ]
    .into_iter()
    .collect();

    let value: Value = serde_json::to_value(&map).unwrap();

    assert_eq!(value, json!({"ALGEBRA": 9.5, "WEB_DEVELOPMENT": 6.0}));
}

#[test]
fn test_error_response_shape() {
    let value = serde_json::to_value(ErrorResponse::new("Student not found: 9")).unwrap();
    assert_eq!(value, json!({"error": "Student not found: 9"}));
}

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}
