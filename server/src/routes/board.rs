//! Board endpoint routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use cronos_engine::{BoardSnapshot, DayKey, Event, EventId, Template};

use crate::error::Result;
use crate::handlers::{
    handle_create_event, handle_create_template, handle_current_month, handle_delete_event,
    handle_delete_template, handle_get_day, handle_list_events, handle_list_templates,
    handle_month, handle_move_event, handle_set_completed, handle_snapshot,
    handle_update_template, CompletedRequest, CreateEventRequest, DayResponse, DeleteResponse,
    MonthResponse, MoveEventRequest, MoveResponse, TemplateRequest,
};
use crate::AppState;

/// Create board routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", delete(delete_event))
        .route("/events/{id}/move", post(move_event))
        .route("/events/{id}/completed", put(set_completed))
        .route("/days/{date}", get(get_day))
        .route("/calendar", get(current_month))
        .route("/calendar/{year}/{month}", get(month))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/{id}", put(update_template).delete(delete_template))
        .route("/snapshot", get(snapshot))
}

/// GET /events - All events in display order.
async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(handle_list_events(&state).await)
}

/// POST /events - Add an event at the end of its day.
async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = handle_create_event(&state, request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// DELETE /events/{id} - Remove an event.
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<DeleteResponse>> {
    let response = handle_delete_event(&state, id).await?;
    Ok(Json(response))
}

/// POST /events/{id}/move - Drag an event to a day and position.
async fn move_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    Json(request): Json<MoveEventRequest>,
) -> Json<MoveResponse> {
    Json(handle_move_event(&state, id, request).await)
}

/// PUT /events/{id}/completed - Mark an event done or pending.
async fn set_completed(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    Json(request): Json<CompletedRequest>,
) -> Result<Json<Event>> {
    let event = handle_set_completed(&state, id, request).await?;
    Ok(Json(event))
}

/// GET /days/{date} - One day in display order.
async fn get_day(State(state): State<AppState>, Path(date): Path<DayKey>) -> Json<DayResponse> {
    Json(handle_get_day(&state, date).await)
}

/// GET /calendar - The current month.
async fn current_month(State(state): State<AppState>) -> Result<Json<MonthResponse>> {
    let response = handle_current_month(&state).await?;
    Ok(Json(response))
}

/// GET /calendar/{year}/{month} - A given month.
async fn month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthResponse>> {
    let response = handle_month(&state, year, month).await?;
    Ok(Json(response))
}

/// GET /templates - Saved message templates.
async fn list_templates(State(state): State<AppState>) -> Result<Json<Vec<Template>>> {
    let templates = handle_list_templates(&state).await?;
    Ok(Json(templates))
}

/// POST /templates - Save a message template.
async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<TemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    let template = handle_create_template(&state, request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /templates/{id} - Edit a message template.
async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<Template>> {
    let template = handle_update_template(&state, id, request).await?;
    Ok(Json(template))
}

/// DELETE /templates/{id} - Remove a message template.
async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    handle_delete_template(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /snapshot - Export everything.
async fn snapshot(State(state): State<AppState>) -> Result<Json<BoardSnapshot>> {
    let snapshot = handle_snapshot(&state).await?;
    Ok(Json(snapshot))
}
