//! # API Endpoint Handlers
//!
//! Each handler takes the gradebook lock it needs, calls one service
//! operation and maps the outcome to a status code and JSON body.

use super::{
    AppState,
    types::{
        ErrorResponse, GradeDto, GradeRequest, HealthResponse, StudentDto, StudentRequest,
        map_list,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use gradebook_core::{Discipline, GradeId, GradebookError, StudentId};
use std::collections::BTreeMap;

/// Successful response or an error status with an `{error}` body.
pub type ApiResult<T> = Result<(StatusCode, Json<T>), (StatusCode, Json<ErrorResponse>)>;

/// Translate a service error into its HTTP form, logging it on the way.
fn error_response(err: GradebookError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        GradebookError::StudentNotFound(_) | GradebookError::GradeNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        GradebookError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::warn!(error = %err, status = status.as_u16(), "Request rejected");
    }

    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STUDENT HANDLERS
// =============================================================================

/// `GET /api/students`
pub async fn list_students_handler(State(state): State<AppState>) -> ApiResult<Vec<StudentDto>> {
    let gradebook = state.gradebook.read().await;
    match gradebook.list_students() {
        Ok(students) => Ok((StatusCode::OK, Json(map_list(&students)))),
        Err(e) => Err(error_response(e)),
    }
}

/// `POST /api/students`
pub async fn add_student_handler(
    State(state): State<AppState>,
    Json(request): Json<StudentRequest>,
) -> ApiResult<StudentDto> {
    let mut gradebook = state.gradebook.write().await;
    match gradebook.add_student(&request.first_name, &request.last_name, &request.group) {
        Ok(student) => {
            tracing::info!(student_id = ?student.id(), "Student created");
            Ok((StatusCode::CREATED, Json(StudentDto::from(&student))))
        }
        Err(e) => Err(error_response(e)),
    }
}

// =============================================================================
// GRADE HANDLERS
// =============================================================================

/// `GET /api/students/{id}/grades`
pub async fn list_grades_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Vec<GradeDto>> {
    let gradebook = state.gradebook.read().await;
    match gradebook.grades_for_student(StudentId(id)) {
        Ok(grades) => Ok((StatusCode::OK, Json(map_list(&grades)))),
        Err(e) => Err(error_response(e)),
    }
}

/// `POST /api/students/{id}/grades`
pub async fn add_grade_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<GradeRequest>,
) -> ApiResult<GradeDto> {
    let mut gradebook = state.gradebook.write().await;
    match gradebook.add_grade(StudentId(id), request.value, request.discipline) {
        Ok(grade) => {
            tracing::info!(
                student_id = id,
                grade_id = ?grade.id(),
                discipline = %grade.discipline(),
                "Grade added"
            );
            Ok((StatusCode::CREATED, Json(GradeDto::from(&grade))))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// `DELETE /api/students/{id}/grades/{grade_id}`
pub async fn remove_grade_handler(
    State(state): State<AppState>,
    Path((id, grade_id)): Path<(u64, u64)>,
) -> ApiResult<GradeDto> {
    let mut gradebook = state.gradebook.write().await;
    match gradebook.remove_grade(StudentId(id), GradeId(grade_id)) {
        Ok(grade) => {
            tracing::info!(student_id = id, grade_id, "Grade removed");
            Ok((StatusCode::OK, Json(GradeDto::from(&grade))))
        }
        Err(e) => Err(error_response(e)),
    }
}

// =============================================================================
// AGGREGATE HANDLERS
// =============================================================================

/// `GET /api/students/{id}/average`
pub async fn average_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<BTreeMap<Discipline, f64>> {
    let gradebook = state.gradebook.read().await;
    gradebook
        .average_per_discipline(StudentId(id))
        .map(|average| (StatusCode::OK, Json(average)))
        .map_err(error_response)
}

/// `GET /api/students/{id}/max`
pub async fn max_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<BTreeMap<Discipline, f64>> {
    let gradebook = state.gradebook.read().await;
    gradebook
        .max_per_discipline(StudentId(id))
        .map(|max| (StatusCode::OK, Json(max)))
        .map_err(error_response)
}

/// `GET /api/students/{id}/promotion`
pub async fn promotion_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<BTreeMap<Discipline, bool>> {
    let gradebook = state.gradebook.read().await;
    gradebook
        .promotion_per_discipline(StudentId(id))
        .map(|promoted| (StatusCode::OK, Json(promoted)))
        .map_err(error_response)
}
