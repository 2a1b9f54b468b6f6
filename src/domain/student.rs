//! Student record and the caller-supplied profile it is built from.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StudentId;

/// Caller-supplied student fields.
///
/// Used as the input of create and update. The store performs no field
/// validation; missing fields decode to their zero value and an `id`
/// key in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentProfile {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Age in years. Not range-checked.
    #[serde(default)]
    pub age: i64,
    /// Contact email. Not format-checked.
    #[serde(default)]
    pub email: String,
}

/// A stored student record.
///
/// Serialized with the field names `id`, `name`, `age`, `email` both on
/// the wire and in the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Store-assigned identifier (immutable after creation).
    pub id: StudentId,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Contact email.
    pub email: String,
}

impl Student {
    /// Builds a record from a profile and an identifier chosen by the store.
    #[must_use]
    pub fn from_profile(id: StudentId, profile: StudentProfile) -> Self {
        Self {
            id,
            name: profile.name,
            age: profile.age,
            email: profile.email,
        }
    }
}
