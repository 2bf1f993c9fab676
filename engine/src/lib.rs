//! # Cronos Engine
//!
//! Day-bucketed ordering for a personal scheduling board.
//!
//! Events (invoice closings, due dates, push reminders) live in day buckets.
//! Inside a bucket each event has a rank, and users reorder events within a
//! day or drag them to another day. This crate keeps those ranks consistent.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never talks to storage; it returns new values and
//!   the list of records a caller must write
//! - **Deterministic**: the same collection always yields the same order
//! - **Dense ranks**: after every operation each day holds ranks `0..k-1`
//!
//! ## Core Concepts
//!
//! ### Day Order
//!
//! [`compare_in_day`] orders events by rank (missing rank = 0), then by
//! title collation. All other components sort through it.
//!
//! ### Normalization
//!
//! [`normalize`] re-derives dense ranks for every day, repairing records
//! with missing, duplicated or sparse ranks.
//!
//! ### Move Planning
//!
//! [`plan_move`] moves one event to a position in any day and returns a
//! [`MovePlan`]: the updated collection and the events whose date or rank
//! changed, which is exactly what must be persisted.
//!
//! ## Quick Start
//!
//! ```rust
//! use cronos_engine::{normalize, plan_move, Event, EventKind, MoveRequest};
//!
//! let events = normalize(vec![
//!     Event::new("a", "2024-05-01", EventKind::Due, "Card A"),
//!     Event::new("b", "2024-05-01", EventKind::Closing, "Card B"),
//!     Event::new("c", "2024-05-01", EventKind::Push, "Card C"),
//! ]);
//!
//! let plan = plan_move(&events, &MoveRequest::new("b", "2024-05-02", 0));
//!
//! assert_eq!(plan.updated.len(), 3);
//! // B moved, C closed the gap; A kept its rank
//! assert_eq!(plan.changed.len(), 2);
//! ```
//!
//! ## State
//!
//! [`Board`] keeps an indexed, always-normalized copy of the events for
//! applications that hold state between moves. [`BoardSnapshot`] is the
//! serializable form exchanged with storage.

pub mod board;
pub mod calendar;
pub mod error;
pub mod event;
pub mod normalize;
pub mod order;
pub mod palette;
pub mod reorder;
pub mod snapshot;
pub mod template;

// Re-export main types at crate root
pub use board::Board;
pub use calendar::{day_summary, month_grid, month_view, CalendarDay, DayCell, DaySummary};
pub use error::Error;
pub use event::{DayKey, Event, EventId};
pub use normalize::{is_normalized, normalize};
pub use order::{collate, compare_in_day, sort_day};
pub use palette::{default_color, resolve_color, EventKind, TitleColor};
pub use reorder::{plan_move, MovePlan, MoveRequest};
pub use snapshot::{BoardSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use template::Template;
