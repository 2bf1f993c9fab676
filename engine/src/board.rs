//! Board - the in-memory state container.
//!
//! The Board keeps events in explicit day buckets, each bucket in rank order
//! with dense ranks. Every mutation goes through the normalizer or the
//! reorder planner, so the bucket invariant holds after any call.
//!
//! The board is one value. Callers sharing it between tasks must serialize
//! access (the server keeps it behind a mutex); planning a move on a stale
//! copy and committing it would silently drop a concurrent move.

use crate::error::{Error, Result};
use crate::order::sort_day;
use crate::reorder::{plan_move, MovePlan, MoveRequest};
use crate::snapshot::BoardSnapshot;
use crate::template::Template;
use crate::{normalize, DayKey, Event, EventId};
use std::collections::{BTreeMap, HashMap};

/// Events grouped by day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    /// Day buckets, each sorted with ranks `0..k-1`
    days: BTreeMap<DayKey, Vec<Event>>,
    /// Day of every persisted event
    locations: HashMap<EventId, DayKey>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from raw events, repairing their ranks.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut board = Self::new();
        board.load(normalize(events));
        board
    }

    /// Build a board from a snapshot's events.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self::from_events(snapshot.events.clone())
    }

    /// Export the board together with the given templates.
    pub fn export_snapshot(&self, templates: Vec<Template>) -> BoardSnapshot {
        BoardSnapshot::new(self.events(), templates)
    }

    /// Number of events on the board.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Check if the board has no events.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterate over all events, day by day in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.days.values().flatten()
    }

    /// All events as a flat list, day by day in rank order.
    pub fn events(&self) -> Vec<Event> {
        self.iter().cloned().collect()
    }

    /// Events of one day in display order.
    pub fn day(&self, date: &DayKey) -> &[Event] {
        self.days.get(date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Non-empty days in key order.
    pub fn days(&self) -> impl Iterator<Item = (&DayKey, &[Event])> {
        self.days.iter().map(|(date, day)| (date, day.as_slice()))
    }

    /// Get an event by ID.
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        let date = self.locations.get(id)?;
        self.day(date).iter().find(|e| &e.id == id)
    }

    /// Move an event and commit the result.
    ///
    /// Returns the plan so the caller can persist `changed`.
    pub fn move_event(&mut self, request: &MoveRequest) -> MovePlan {
        let plan = plan_move(&self.events(), request);
        if !plan.is_noop() {
            self.days.clear();
            self.locations.clear();
            self.load(plan.updated.clone());
        }
        plan
    }

    /// Append an event at the end of its day.
    ///
    /// Returns the event as stored, with its rank assigned.
    pub fn add_event(&mut self, event: Event) -> Event {
        let date = event.date.clone();
        let rank = self.day(&date).len();
        let placed = event.placed(&date, rank);

        if placed.is_persisted() {
            self.locations.insert(placed.id.clone(), date.clone());
        }
        self.days.entry(date).or_default().push(placed.clone());

        tracing::debug!(event = %placed.id, date = %placed.date, rank, "added event");
        placed
    }

    /// Unsaved event built from a template, ranked after the day's events.
    pub fn draft_from_template(&self, template: &Template, date: DayKey) -> Event {
        let day_len = self.day(&date).len();
        template.instantiate(date, day_len)
    }

    /// Mark an event done or pending.
    pub fn set_completed(&mut self, id: &EventId, completed: bool) -> Result<Event> {
        let event = self.get_mut(id)?;
        event.completed = completed;
        Ok(event.clone())
    }

    /// Remove an event, closing the gap in its day.
    ///
    /// Returns the removed event and the siblings whose rank changed.
    pub fn remove_event(&mut self, id: &EventId) -> Result<(Event, Vec<Event>)> {
        let date = self
            .locations
            .remove(id)
            .ok_or_else(|| Error::EventNotFound(id.clone()))?;
        let day = self
            .days
            .get_mut(&date)
            .ok_or_else(|| Error::EventNotFound(id.clone()))?;
        let position = day
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| Error::EventNotFound(id.clone()))?;

        let removed = day.remove(position);
        let mut changed = Vec::new();
        for (rank, event) in day.iter_mut().enumerate().skip(position) {
            event.rank = Some(rank as i64);
            changed.push(event.clone());
        }
        if day.is_empty() {
            self.days.remove(&date);
        }

        tracing::debug!(event = %id, date = %date, closed = changed.len(), "removed event");
        Ok((removed, changed))
    }

    fn get_mut(&mut self, id: &EventId) -> Result<&mut Event> {
        self.locations
            .get(id)
            .and_then(|date| self.days.get_mut(date))
            .and_then(|day| day.iter_mut().find(|e| &e.id == id))
            .ok_or_else(|| Error::EventNotFound(id.clone()))
    }

    /// Insert already-normalized events.
    fn load(&mut self, events: Vec<Event>) {
        for event in events {
            if event.is_persisted() {
                self.locations.insert(event.id.clone(), event.date.clone());
            }
            self.days.entry(event.date.clone()).or_default().push(event);
        }
        for day in self.days.values_mut() {
            sort_day(day);
        }
    }
}
