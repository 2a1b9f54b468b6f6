//! Student service: orchestrates store operations and summaries.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Student, StudentId, StudentProfile, StudentStore};
use crate::error::GatewayError;
use crate::summarizer::{Summarizer, SummarizerError};

/// Orchestration layer for all student operations.
///
/// Owns references to the [`StudentStore`] for state and a
/// [`Summarizer`] for the summary endpoint. The store returns errors
/// without logging; this layer logs successful mutations and leaves error
/// reporting to the HTTP layer.
#[derive(Debug, Clone)]
pub struct StudentService {
    store: Arc<StudentStore>,
    summarizer: Arc<dyn Summarizer>,
    summary_timeout: Duration,
}

impl StudentService {
    /// Creates a new `StudentService`.
    ///
    /// `summary_timeout` bounds each summarizer call.
    #[must_use]
    pub fn new(
        store: Arc<StudentStore>,
        summarizer: Arc<dyn Summarizer>,
        summary_timeout: Duration,
    ) -> Self {
        Self {
            store,
            summarizer,
            summary_timeout,
        }
    }

    /// Returns a reference to the inner [`StudentStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<StudentStore> {
        &self.store
    }

    /// Creates a student from the given profile.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the snapshot could not
    /// be written; the student is not created in that case.
    pub async fn create_student(&self, profile: StudentProfile) -> Result<Student, GatewayError> {
        let student = self.store.create(profile).await?;
        tracing::info!(student_id = %student.id, "student created");
        Ok(student)
    }

    /// Returns every student.
    pub async fn list_students(&self) -> Vec<Student> {
        self.store.list().await
    }

    /// Returns a single student.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if the student does not exist.
    pub async fn get_student(&self, id: StudentId) -> Result<Student, GatewayError> {
        self.store.get(id).await
    }

    /// Replaces a student's fields, keeping its ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] or
    /// [`GatewayError::PersistenceError`].
    pub async fn update_student(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, GatewayError> {
        let student = self.store.update(id, profile).await?;
        tracing::info!(student_id = %id, "student updated");
        Ok(student)
    }

    /// Deletes a student.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] or
    /// [`GatewayError::PersistenceError`].
    pub async fn delete_student(&self, id: StudentId) -> Result<(), GatewayError> {
        self.store.delete(id).await?;
        tracing::info!(student_id = %id, "student deleted");
        Ok(())
    }

    /// Asks the summarizer for a free-text summary of a student.
    ///
    /// The store lock is released before the summarizer is called.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if the student does not
    /// exist, or [`GatewayError::SummaryUnavailable`] if the summarizer
    /// fails or exceeds the configured timeout.
    pub async fn summarize_student(&self, id: StudentId) -> Result<String, GatewayError> {
        let student = self.store.get(id).await?;
        let prompt = summary_prompt(&student);

        let summary = tokio::time::timeout(self.summary_timeout, self.summarizer.summarize(&prompt))
            .await
            .map_err(|_| SummarizerError::TimedOut(self.summary_timeout))??;

        tracing::debug!(student_id = %id, chars = summary.len(), "summary generated");
        Ok(summary)
    }
}

/// Builds the prompt sent to the summarizer for `student`.
#[must_use]
pub fn summary_prompt(student: &Student) -> String {
    format!(
        "Provide a summary for a student named {}, aged {}, email: {}.",
        student.name, student.age, student.email
    )
}
