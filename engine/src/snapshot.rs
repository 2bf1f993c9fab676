//! Snapshot types for handing board state to and from storage.
//!
//! A snapshot is the flat shape a storage collaborator lists and writes:
//! every event plus the user's templates.

use crate::error::{Error, Result};
use crate::{Event, Template};
use serde::{Deserialize, Serialize};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time copy of a user's board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// All events, day by day in rank order
    #[serde(default)]
    pub events: Vec<Event>,
    /// Message templates
    #[serde(default)]
    pub templates: Vec<Template>,
}

impl BoardSnapshot {
    pub fn new(events: Vec<Event>, templates: Vec<Template>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            events,
            templates,
        }
    }

    /// Create a snapshot with no events and no templates.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;

        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}
