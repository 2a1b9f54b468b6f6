//! Student-related DTOs that are not plain domain records.
//!
//! Create and update bodies decode straight into
//! [`crate::domain::StudentProfile`] and responses reuse
//! [`crate::domain::Student`]; only the envelopes below are API-specific.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::StudentId;

/// Response body for `DELETE /students/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteStudentResponse {
    /// Confirmation message.
    pub message: String,
}

/// Response body for `GET /students/{id}/summary`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentSummaryResponse {
    /// Student the summary describes.
    pub id: StudentId,
    /// Free-text summary produced by the summarizer.
    pub summary: String,
}
