//! The day ordering rule.
//!
//! Every place that interprets ranks goes through [`compare_in_day`]:
//! the normalizer, the reorder planner and the board's day queries.
//!
//! Ordering rules:
//! 1. Lower rank first (a missing rank counts as 0)
//! 2. Title by collation: letters ignoring case and accents, then accents,
//!    then case with lowercase first
//! 3. Raw title, then id, so that no two distinct events compare equal

use crate::Event;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two events of the same day.
pub fn compare_in_day(a: &Event, b: &Event) -> Ordering {
    a.effective_rank()
        .cmp(&b.effective_rank())
        .then_with(|| collate(&a.title, &b.title))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort a day bucket in display order.
pub fn sort_day(events: &mut [Event]) {
    events.sort_by(compare_in_day);
}

/// Locale-style title comparison.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

// Uppercase sorts after lowercase.
fn case_pattern(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}
