//! Persistence layer: JSON snapshot of the student store.
//!
//! The store rewrites the whole snapshot after every successful mutation
//! and reads it once at startup. There is no event log and no schema
//! versioning.

pub mod snapshot;

pub use snapshot::SnapshotFile;
