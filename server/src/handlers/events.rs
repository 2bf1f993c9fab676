//! Event handlers - board queries, edits and drag-and-drop moves.
//!
//! Every mutation holds the board lock until its writes are issued, so
//! the change sets of two moves never interleave in storage.

use crate::error::{AppError, Result};
use crate::storage::persist_events;
use crate::AppState;
use cronos_engine::{
    resolve_color, DayKey, Error as EngineError, Event, EventId, EventKind, MovePlan, MoveRequest,
    TitleColor,
};
use serde::{Deserialize, Serialize};

/// Request body for creating an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Day to add the event to
    pub date: DayKey,
    /// Copy title, text and color from this template
    pub template_id: Option<String>,
    /// Explicit fields, used when no template is given
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EventKind>,
    pub content: Option<String>,
    pub title_color: Option<TitleColor>,
}

/// Request body for a drag-and-drop move.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEventRequest {
    pub target_date: DayKey,
    pub target_index: i64,
}

/// Request body for marking an event done.
#[derive(Debug, Deserialize)]
pub struct CompletedRequest {
    pub completed: bool,
}

/// Events of one day in display order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub date: DayKey,
    pub events: Vec<Event>,
}

/// Response for a move.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    #[serde(flatten)]
    pub plan: MovePlan,
    /// Changed events that could not be written
    pub failed: Vec<EventId>,
}

/// Response for a delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub removed: Event,
    /// Siblings re-ranked to close the gap
    pub changed: Vec<Event>,
    pub failed: Vec<EventId>,
}

/// All events, day by day in rank order.
pub async fn handle_list_events(state: &AppState) -> Vec<Event> {
    state.board.lock().await.events()
}

/// One day in display order.
pub async fn handle_get_day(state: &AppState, date: DayKey) -> DayResponse {
    let events = state.board.lock().await.day(&date).to_vec();
    DayResponse { date, events }
}

/// Create an event at the end of its day.
pub async fn handle_create_event(state: &AppState, request: CreateEventRequest) -> Result<Event> {
    let mut board = state.board.lock().await;

    let draft = match &request.template_id {
        Some(template_id) => {
            let template = state
                .store
                .get_template(template_id)
                .await?
                .ok_or_else(|| EngineError::TemplateNotFound(template_id.clone()))?;
            board.draft_from_template(&template, request.date.clone())
        }
        None => {
            let title = request
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .ok_or_else(|| AppError::BadRequest("title or templateId is required".into()))?;
            let kind = request.kind.unwrap_or_default();
            Event::new(EventId::default(), request.date.clone(), kind, title)
                .with_content(request.content.clone().unwrap_or_default())
                .with_color(resolve_color(kind, request.title_color))
                .with_rank(board.day(&request.date).len() as i64)
        }
    };

    let saved = state.store.upsert_event(draft).await?;
    let placed = board.add_event(saved.clone());
    if !placed.same_placement(&saved) {
        state.store.upsert_event(placed.clone()).await?;
    }
    state.store.flush().await?;

    tracing::info!(event = %placed.id, date = %placed.date, "Created event");
    Ok(placed)
}

/// Move an event and persist the change set.
pub async fn handle_move_event(
    state: &AppState,
    event_id: EventId,
    request: MoveEventRequest,
) -> MoveResponse {
    let mut board = state.board.lock().await;

    let plan = board.move_event(&MoveRequest {
        event_id,
        target_date: request.target_date,
        target_index: request.target_index,
    });
    let failed = if plan.is_noop() {
        Vec::new()
    } else {
        persist_events(&state.store, &plan.changed).await
    };

    MoveResponse { plan, failed }
}

/// Mark an event done or pending.
pub async fn handle_set_completed(
    state: &AppState,
    event_id: EventId,
    request: CompletedRequest,
) -> Result<Event> {
    let mut board = state.board.lock().await;

    let event = board.set_completed(&event_id, request.completed)?;
    state.store.upsert_event(event.clone()).await?;
    state.store.flush().await?;
    Ok(event)
}

/// Delete an event and close the gap in its day.
pub async fn handle_delete_event(state: &AppState, event_id: EventId) -> Result<DeleteResponse> {
    let mut board = state.board.lock().await;

    let (removed, changed) = board.remove_event(&event_id)?;
    state.store.delete_event(&event_id).await?;
    let failed = persist_events(&state.store, &changed).await;

    tracing::info!(event = %event_id, closed = changed.len(), "Deleted event");
    Ok(DeleteResponse {
        removed,
        changed,
        failed,
    })
}
