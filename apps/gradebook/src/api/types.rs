//! # API Request/Response Types
//!
//! JSON structures for the HTTP API, and the mapping from domain records to
//! their client-facing representation.

use gradebook_core::{Discipline, Grade, Student};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every non-2xx response produced by a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub group: String,
}

/// Body of `POST /api/students/{id}/grades`. The student comes from the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRequest {
    pub value: f64,
    pub discipline: Discipline,
}

// =============================================================================
// TRANSFER REPRESENTATIONS
// =============================================================================

/// Client-facing grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDto {
    pub id: Option<u64>,
    pub value: f64,
    pub discipline: Discipline,
}

impl From<&Grade> for GradeDto {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id().map(|id| id.0),
            value: grade.value(),
            discipline: grade.discipline(),
        }
    }
}

/// Client-facing student, grades included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub group: String,
    pub grades: Vec<GradeDto>,
}

impl From<&Student> for StudentDto {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().map(|id| id.0),
            first_name: student.first_name().to_string(),
            last_name: student.last_name().to_string(),
            group: student.group().to_string(),
            grades: map_list(student.grades()),
        }
    }
}

/// Convert every record of a slice.
pub fn map_list<'a, T: 'a, D: From<&'a T>>(items: &'a [T]) -> Vec<D> {
    items.iter().map(D::from).collect()
}
