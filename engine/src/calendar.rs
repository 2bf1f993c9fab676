//! Month grid construction.
//!
//! A month is shown as six full weeks starting on Sunday: trailing days of
//! the previous month, the month itself, then leading days of the next
//! month. The grid height never changes between months.

use crate::error::{Error, Result};
use crate::palette::TitleColor;
use crate::{Board, DayKey};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of cells in a month grid (six weeks).
pub const GRID_CELLS: usize = 42;

/// One day of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: DayKey,
    /// False for padding days of the neighbouring months
    pub in_current_month: bool,
}

/// Event counts and highlight for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub total: usize,
    /// Events not yet completed
    pub active: usize,
    /// Color of the first active event, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<TitleColor>,
}

/// A grid cell with its day summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[serde(flatten)]
    pub cell: DayCell,
    #[serde(flatten)]
    pub summary: DaySummary,
}

/// Build the 42-cell grid for `month` (1-12) of `year`.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<DayCell>> {
    let invalid = || Error::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let padding = u64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(padding))
        .ok_or_else(invalid)?;

    let cells: Vec<DayCell> = start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            in_current_month: date.year() == year && date.month() == month,
            date: DayKey::from(date),
        })
        .collect();

    if cells.len() < GRID_CELLS {
        return Err(invalid());
    }
    Ok(cells)
}

/// Summarize one day of the board.
pub fn day_summary(board: &Board, date: &DayKey) -> DaySummary {
    let day = board.day(date);
    let mut active = day.iter().filter(|e| e.is_active());

    let highlight = active.next().map(|e| e.color());
    let active = usize::from(highlight.is_some()) + active.count();

    DaySummary {
        total: day.len(),
        active,
        highlight,
    }
}

/// Month grid with a summary for every cell.
pub fn month_view(board: &Board, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
    Ok(month_grid(year, month)?
        .into_iter()
        .map(|cell| {
            let summary = day_summary(board, &cell.date);
            CalendarDay { cell, summary }
        })
        .collect())
}
