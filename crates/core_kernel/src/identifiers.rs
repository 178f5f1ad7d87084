//! Strongly-typed identifiers
//!
//! Claims keep the free-text references supplied upstream; only values the
//! core mints itself get a UUID newtype.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one portfolio validation run
///
/// Time-ordered (UUID v7), so runs sort by start time. Displays as
/// `RUN-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    const PREFIX: &'static str = "RUN";

    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new_v7()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_display() {
        let id = RunId::new_v7();
        assert!(id.to_string().starts_with("RUN-"));
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = RunId::new_v7();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.as_uuid().to_string()));
    }

    #[test]
    fn test_run_ids_are_time_ordered() {
        let first = RunId::new_v7();
        let second = RunId::new_v7();
        assert!(first <= second);
    }
}
