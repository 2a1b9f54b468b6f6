//! Service layer: business logic orchestration.
//!
//! [`StudentService`] coordinates store operations for the HTTP handlers
//! and bounds calls to the [`crate::summarizer::Summarizer`].

pub mod student_service;

pub use student_service::StudentService;
