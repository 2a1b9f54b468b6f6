//! Student CRUD and summary handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DeleteStudentResponse, StudentSummaryResponse};
use crate::app_state::AppState;
use crate::domain::{Student, StudentId, StudentProfile};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /students` — Create a student.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on a malformed body, or
/// [`GatewayError::PersistenceError`] if the snapshot write fails.
#[utoipa::path(
    post,
    path = "/students",
    tag = "Students",
    summary = "Create a student",
    description = "Stores a new student and returns it with its server-assigned ID. Any `id` in the body is ignored.",
    request_body = StudentProfile,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Snapshot write failed", body = ErrorResponse),
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<StudentProfile>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(profile) = body?;
    let student = state.student_service.create_student(profile).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// `GET /students` — List all students.
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    summary = "List students",
    description = "Returns every stored student. Clients must not rely on the order.",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
    )
)]
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.student_service.list_students().await)
}

/// `GET /students/{id}` — Get one student.
///
/// # Errors
///
/// Returns [`GatewayError::StudentNotFound`] if the student does not exist.
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "Students",
    summary = "Get a student",
    params(
        ("id" = u64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    path: Result<Path<StudentId>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = path?;
    let student = state.student_service.get_student(id).await?;
    Ok(Json(student))
}

/// `PUT /students/{id}` — Replace a student's fields.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`], [`GatewayError::StudentNotFound`]
/// or [`GatewayError::PersistenceError`].
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "Students",
    summary = "Update a student",
    description = "Replaces name, age and email wholesale. The ID always comes from the path.",
    params(
        ("id" = u64, Path, description = "Student ID"),
    ),
    request_body = StudentProfile,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Snapshot write failed", body = ErrorResponse),
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    path: Result<Path<StudentId>, PathRejection>,
    body: Result<Json<StudentProfile>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = path?;
    let Json(profile) = body?;
    let student = state.student_service.update_student(id, profile).await?;
    Ok(Json(student))
}

/// `DELETE /students/{id}` — Remove a student.
///
/// # Errors
///
/// Returns [`GatewayError::StudentNotFound`] or
/// [`GatewayError::PersistenceError`].
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "Students",
    summary = "Delete a student",
    description = "Removes the student. Its ID is never reassigned.",
    params(
        ("id" = u64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Student deleted", body = DeleteStudentResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Snapshot write failed", body = ErrorResponse),
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<StudentId>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = path?;
    state.student_service.delete_student(id).await?;
    Ok(Json(DeleteStudentResponse {
        message: "Student deleted successfully".to_string(),
    }))
}

/// `GET /students/{id}/summary` — Generate a free-text summary.
///
/// # Errors
///
/// Returns [`GatewayError::StudentNotFound`] or
/// [`GatewayError::SummaryUnavailable`].
#[utoipa::path(
    get,
    path = "/students/{id}/summary",
    tag = "Students",
    summary = "Summarize a student",
    description = "Forwards a prompt built from the student's profile to the text-generation API and relays its answer.",
    params(
        ("id" = u64, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Generated summary", body = StudentSummaryResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 502, description = "Summarizer failed", body = ErrorResponse),
    )
)]
pub async fn student_summary(
    State(state): State<AppState>,
    path: Result<Path<StudentId>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(id) = path?;
    let summary = state.student_service.summarize_student(id).await?;
    Ok(Json(StudentSummaryResponse { id, summary }))
}

/// Student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/summary", get(student_summary))
}
