//! Domain layer: student records, identifiers, and the concurrent store.
//!
//! This module contains the server-side domain model: the
//! [`StudentId`] newtype, the [`Student`] record with its caller-supplied
//! [`StudentProfile`], and the [`StudentStore`] that assigns IDs and keeps
//! the optional snapshot in step with memory.

pub mod student;
pub mod student_id;
pub mod student_store;

pub use student::{Student, StudentProfile};
pub use student_id::StudentId;
pub use student_store::StudentStore;
