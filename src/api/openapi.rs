//! OpenAPI document assembled from the handler annotations.

use axum::Json;
use utoipa::OpenApi;

use crate::api::dto::{DeleteStudentResponse, StudentSummaryResponse};
use crate::api::handlers::{student, system};
use crate::domain::{Student, StudentId, StudentProfile};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "student-gateway",
        description = "CRUD over student records plus LLM-generated summaries."
    ),
    paths(
        student::create_student,
        student::list_students,
        student::get_student,
        student::update_student,
        student::delete_student,
        student::student_summary,
        system::health_handler,
    ),
    components(schemas(
        Student,
        StudentId,
        StudentProfile,
        DeleteStudentResponse,
        StudentSummaryResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Students", description = "Student records and summaries"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json` — Raw OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_student_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/students"));
        assert!(doc.paths.paths.contains_key("/students/{id}"));
        assert!(doc.paths.paths.contains_key("/students/{id}/summary"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
