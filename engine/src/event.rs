//! Event types and their identifiers.

use crate::error::{Error, Result};
use crate::palette::{resolve_color, EventKind, TitleColor};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of a day key, as produced by the date picker and stored remotely.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier of an event.
///
/// Empty until the storage collaborator assigns one on first write.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for events that were never persisted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Calendar day key (`YYYY-MM-DD`), the bucket an event belongs to.
///
/// The key is compared as an opaque string. Malformed keys still group
/// events; only [`DayKey::to_date`] interprets the contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key as a calendar date.
    pub fn to_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DAY_KEY_FORMAT)
            .map_err(|_| Error::InvalidDate(self.clone()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(DAY_KEY_FORMAT).to_string())
    }
}

impl From<&str> for DayKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A dated entry on the board.
///
/// Events are values: moving one produces a replacement record through
/// [`Event::placed`] rather than mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier (empty before first persistence)
    #[serde(default)]
    pub id: EventId,
    /// Day bucket this event belongs to
    pub date: DayKey,
    /// Category of the event
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Short label shown on the calendar flag
    #[serde(default)]
    pub title: String,
    /// Template the content was copied from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Message text, copied from a template or edited
    #[serde(rename = "customContent", default)]
    pub content: String,
    /// Color picked by the user; falls back to the kind's color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<TitleColor>,
    /// Position within the day, zero-based
    #[serde(rename = "order", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    /// Done marker; completed events stay on the board
    #[serde(rename = "isCompleted", default)]
    pub completed: bool,
}

impl Event {
    /// Create an unranked event.
    pub fn new(
        id: impl Into<EventId>,
        date: impl Into<DayKey>,
        kind: EventKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            kind,
            title: title.into(),
            template_id: None,
            content: String::new(),
            title_color: None,
            rank: None,
            completed: false,
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_color(mut self, color: TitleColor) -> Self {
        self.title_color = Some(color);
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Rank used for ordering; a missing rank sorts as 0.
    pub fn effective_rank(&self) -> i64 {
        self.rank.unwrap_or(0)
    }

    /// Check if the event is still pending (not completed).
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// Check if the storage collaborator has assigned an id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Color to display, honoring the legacy per-kind fallback.
    pub fn color(&self) -> TitleColor {
        resolve_color(self.kind, self.title_color)
    }

    /// Replacement record at `date` with `rank`, payload untouched.
    pub fn placed(&self, date: &DayKey, rank: usize) -> Self {
        Self {
            date: date.clone(),
            rank: Some(rank as i64),
            ..self.clone()
        }
    }

    /// True if date and rank are identical, i.e. no write is needed.
    pub fn same_placement(&self, other: &Event) -> bool {
        self.date == other.date && self.rank == other.rank
    }
}
