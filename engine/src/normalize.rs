//! Rank normalization.
//!
//! Records loaded from storage may carry no rank (they predate rank
//! tracking), duplicated ranks or gaps. Normalization re-derives dense
//! ranks `0..k-1` for every day from the relative day order.

use crate::order::{compare_in_day, sort_day};
use crate::{DayKey, Event};
use std::collections::HashMap;

/// Assign dense, deterministic ranks within every day bucket.
///
/// The output has the same events as the input. Buckets appear in the order
/// their day key was first seen, each bucket in rank order. Existing rank
/// values are only used for their relative order.
pub fn normalize(events: Vec<Event>) -> Vec<Event> {
    let total = events.len();
    let buckets = group_by_day(events);
    let days = buckets.len();

    let normalized: Vec<Event> = buckets
        .into_iter()
        .flat_map(|(_, mut day)| {
            sort_day(&mut day);
            day.into_iter().enumerate().map(|(rank, mut event)| {
                event.rank = Some(rank as i64);
                event
            })
        })
        .collect();

    tracing::debug!(events = total, days, "normalized event ranks");
    normalized
}

/// Check whether every bucket already holds ranks `0..k-1`.
pub fn is_normalized(events: &[Event]) -> bool {
    let mut buckets: HashMap<&DayKey, Vec<&Event>> = HashMap::new();
    for event in events {
        buckets.entry(&event.date).or_default().push(event);
    }

    buckets.into_values().all(|mut day| {
        day.sort_by(|a, b| compare_in_day(a, b));
        day.iter()
            .enumerate()
            .all(|(index, event)| event.rank == Some(index as i64))
    })
}

/// Split events into day buckets, keeping first-seen day order.
pub(crate) fn group_by_day(events: impl IntoIterator<Item = Event>) -> Vec<(DayKey, Vec<Event>)> {
    let mut index: HashMap<DayKey, usize> = HashMap::new();
    let mut buckets: Vec<(DayKey, Vec<Event>)> = Vec::new();

    for event in events {
        match index.get(&event.date) {
            Some(&slot) => buckets[slot].1.push(event),
            None => {
                index.insert(event.date.clone(), buckets.len());
                buckets.push((event.date.clone(), vec![event]));
            }
        }
    }

    buckets
}
