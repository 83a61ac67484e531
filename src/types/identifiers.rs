//! Unique identifier types for the festival simulator
//!
//! This module contains the UUID-based attendee identifier used throughout
//! the simulation and in persisted records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an attendee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttendeeId(pub Uuid);

impl AttendeeId {
    /// Create a new random attendee ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttendeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ATT_{}", self.0.simple())
    }
}

impl Serialize for AttendeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("ATT_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for AttendeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("ATT_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(AttendeeId(uuid))
        } else {
            // Fallback: accept a raw UUID as well
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(AttendeeId(uuid))
        }
    }
}
