//! Access levels and the operations each one unlocks.
//!
//! Levels are ordered `Read < Create < Update < Delete`, and every level's
//! operation set is a strict superset of the one below it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared tier controlling which operations an API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Create,
    Update,
    Delete,
}

/// A single operation offered by the API tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetById,
    GetAllByIds,
    Create,
    Update,
    DeleteById,
    DeleteObject,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::GetById,
        Operation::GetAllByIds,
        Operation::Create,
        Operation::Update,
        Operation::DeleteById,
        Operation::DeleteObject,
    ];

    /// The lowest access level that includes this operation.
    pub fn required_level(self) -> AccessLevel {
        match self {
            Operation::GetById | Operation::GetAllByIds => AccessLevel::Read,
            Operation::Create => AccessLevel::Create,
            Operation::Update => AccessLevel::Update,
            Operation::DeleteById | Operation::DeleteObject => AccessLevel::Delete,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetById => "get-by-id",
            Operation::GetAllByIds => "get-all-by-ids",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::DeleteById => "delete-by-id",
            Operation::DeleteObject => "delete-object",
        };
        f.write_str(name)
    }
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Read,
        AccessLevel::Create,
        AccessLevel::Update,
        AccessLevel::Delete,
    ];

    /// Whether `operation` is callable at this level.
    pub fn allows(self, operation: Operation) -> bool {
        operation.required_level() <= self
    }

    /// The exact operation set exposed at this level.
    pub fn operations(self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.allows(*op))
            .collect()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessLevel::Read => "read",
            AccessLevel::Create => "create",
            AccessLevel::Update => "update",
            AccessLevel::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Error returned when a string does not name an access level.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown access level: {0}")]
pub struct ParseAccessLevelError(String);

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(AccessLevel::Read),
            "create" => Ok(AccessLevel::Create),
            "update" => Ok(AccessLevel::Update),
            "delete" => Ok(AccessLevel::Delete),
            _ => Err(ParseAccessLevelError(s.to_string())),
        }
    }
}
