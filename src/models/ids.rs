//! Short expense identifiers
//!
//! Ids are the first eight hex characters of a random v4 UUID. That is short
//! enough to type at a prompt and collision-improbable for a personal ledger.
//! Uniqueness is not enforced; imported files may carry any string.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of a generated id
pub const ID_LENGTH: usize = 8;

/// Identifier of an expense record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(uuid[..ID_LENGTH].to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ExpenseId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
