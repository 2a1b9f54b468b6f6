//! Type-safe student identifier.
//!
//! [`StudentId`] is a newtype wrapper around `u64` so that student
//! identifiers cannot be confused with ages or other integers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a student record.
///
/// Assigned by [`super::StudentStore`] at creation time from a monotonic
/// counter starting at 1, and immutable thereafter. Never reused after
/// the record is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u64, example = 1)]
pub struct StudentId(u64);

impl StudentId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Creates a `StudentId` from a raw integer.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// integer range is exhausted.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
