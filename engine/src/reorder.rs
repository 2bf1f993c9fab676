//! Move planning for drag-and-drop reordering.
//!
//! Given the full event collection and a move request, this module computes
//! the collection after the move and the minimal set of events whose date or
//! rank must be rewritten.
//!
//! # Algorithm
//!
//! 1. Locate the moving event and its current day (the source)
//! 2. Clamp the target index into `[0, n]`, where `n` counts the target
//!    day's events without the moving one
//! 3. Same day: splice the event among its sorted siblings, re-rank `0..n`
//! 4. Other day: re-rank the source siblings to close the gap, splice the
//!    event into the sorted target day, re-rank it
//! 5. Return untouched days, then the re-ranked source, then the target
//!
//! Ranks stay dense after every move, so normalization remains a no-op on
//! any collection produced here.

use crate::order::sort_day;
use crate::{DayKey, Event, EventId};
use serde::{Deserialize, Serialize};

/// Request to move one event to a position in a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Event being dragged
    pub event_id: EventId,
    /// Day it is dropped on
    pub target_date: DayKey,
    /// Desired index in the target day after the move; clamped
    pub target_index: i64,
}

impl MoveRequest {
    pub fn new(
        event_id: impl Into<EventId>,
        target_date: impl Into<DayKey>,
        target_index: i64,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            target_date: target_date.into(),
            target_index,
        }
    }
}

/// Result of planning a move.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    /// Full collection with the move applied
    pub updated: Vec<Event>,
    /// Events whose date or rank differs from the input; the write set
    pub changed: Vec<Event>,
}

impl MovePlan {
    fn unchanged(events: &[Event]) -> Self {
        Self {
            updated: events.to_vec(),
            changed: Vec::new(),
        }
    }

    /// True if nothing needs to be persisted.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Plan moving `request.event_id` to `request.target_index` of
/// `request.target_date`.
///
/// An unknown event id is not an error: the input comes back unchanged with
/// an empty change set. The same holds for an empty id, which names no
/// single event.
pub fn plan_move(events: &[Event], request: &MoveRequest) -> MovePlan {
    let found = if request.event_id.is_empty() {
        None
    } else {
        events.iter().position(|e| e.id == request.event_id)
    };
    let Some(position) = found else {
        tracing::debug!(event = %request.event_id, "move target not found, nothing to do");
        return MovePlan::unchanged(events);
    };
    let moving = &events[position];

    let source = moving.date.clone();
    let target = &request.target_date;

    let siblings = |day: &DayKey| -> Vec<Event> {
        let mut list: Vec<Event> = events
            .iter()
            .enumerate()
            .filter(|(i, e)| &e.date == day && *i != position)
            .map(|(_, e)| e.clone())
            .collect();
        sort_day(&mut list);
        list
    };

    let mut target_day = siblings(target);
    let index = clamp_index(request.target_index, target_day.len());
    target_day.insert(index, moving.clone());

    let source_day = if &source == target {
        Vec::new()
    } else {
        rerank(siblings(&source), &source)
    };
    let target_day = rerank(target_day, target);

    let mut updated: Vec<Event> = events
        .iter()
        .filter(|e| e.date != source && &e.date != target)
        .cloned()
        .collect();
    let mut changed = Vec::new();

    for (event, is_changed) in source_day.into_iter().chain(target_day) {
        if is_changed {
            changed.push(event.clone());
        }
        updated.push(event);
    }

    tracing::debug!(
        event = %request.event_id,
        from = %source,
        to = %target,
        index,
        changed = changed.len(),
        "planned move"
    );

    MovePlan { updated, changed }
}

/// Clamp a requested index into `[0, len]`.
pub fn clamp_index(requested: i64, len: usize) -> usize {
    if requested <= 0 {
        return 0;
    }
    usize::try_from(requested).unwrap_or(usize::MAX).min(len)
}

/// Assign ranks `0..n` in list order, flagging entries whose placement moved.
fn rerank(day: Vec<Event>, date: &DayKey) -> Vec<(Event, bool)> {
    day.into_iter()
        .enumerate()
        .map(|(rank, before)| {
            let after = before.placed(date, rank);
            let is_changed = !after.same_placement(&before);
            (after, is_changed)
        })
        .collect()
}
