//! # student-gateway
//!
//! REST API for student records with an optional JSON snapshot file and
//! LLM-generated summaries.
//!
//! The core is [`domain::StudentStore`]: a single-lock map that assigns
//! monotonic IDs and rewrites the snapshot before any mutation reports
//! success. Summaries are delegated to a [`summarizer::Summarizer`].
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── StudentService (service/) ──── Summarizer (summarizer/)
//!     │                                      │
//!     ├── StudentStore (domain/)             └── text-generation API
//!     │
//!     └── JSON snapshot (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod summarizer;
