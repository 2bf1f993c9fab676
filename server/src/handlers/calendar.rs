//! Calendar handlers - month grids with per-day summaries.

use crate::error::Result;
use crate::AppState;
use chrono::{Datelike, Local};
use cronos_engine::{month_view, CalendarDay};
use serde::Serialize;

/// A month grid, six weeks starting on Sunday.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Month grid for the given month.
pub async fn handle_month(state: &AppState, year: i32, month: u32) -> Result<MonthResponse> {
    let board = state.board.lock().await;
    let days = month_view(&board, year, month)?;
    Ok(MonthResponse { year, month, days })
}

/// Month grid for the server's current month.
pub async fn handle_current_month(state: &AppState) -> Result<MonthResponse> {
    let today = Local::now().date_naive();
    handle_month(state, today.year(), today.month()).await
}
