//! Template handlers and board export.

use crate::error::Result;
use crate::AppState;
use cronos_engine::{
    resolve_color, BoardSnapshot, Error as EngineError, EventKind, Template, TitleColor,
};
use serde::Deserialize;

/// Request body for creating or editing a template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub title_color: Option<TitleColor>,
}

impl TemplateRequest {
    fn into_template(self, id: String) -> Template {
        Template::new(id, self.kind, self.title.trim(), self.content)
            .with_color(resolve_color(self.kind, self.title_color))
    }
}

/// All templates, ordered by title.
pub async fn handle_list_templates(state: &AppState) -> Result<Vec<Template>> {
    Ok(state.store.list_templates().await?)
}

/// Validate and save a new template.
pub async fn handle_create_template(
    state: &AppState,
    request: TemplateRequest,
) -> Result<Template> {
    let template = request.into_template(String::new());
    template.validate()?;

    let saved = state.store.save_template(template).await?;
    state.store.flush().await?;

    tracing::info!(template = %saved.id, "Created template");
    Ok(saved)
}

/// Replace a template's fields, keeping its id.
///
/// Events created from it earlier keep the text they were given.
pub async fn handle_update_template(
    state: &AppState,
    id: String,
    request: TemplateRequest,
) -> Result<Template> {
    if state.store.get_template(&id).await?.is_none() {
        return Err(EngineError::TemplateNotFound(id).into());
    }

    let template = request.into_template(id);
    template.validate()?;

    let saved = state.store.save_template(template).await?;
    state.store.flush().await?;

    tracing::info!(template = %saved.id, "Updated template");
    Ok(saved)
}

/// Delete a template.
pub async fn handle_delete_template(state: &AppState, id: String) -> Result<()> {
    if !state.store.delete_template(&id).await? {
        return Err(EngineError::TemplateNotFound(id).into());
    }
    state.store.flush().await?;

    tracing::info!(template = %id, "Deleted template");
    Ok(())
}

/// Full export of the board and templates.
pub async fn handle_snapshot(state: &AppState) -> Result<BoardSnapshot> {
    let board = state.board.lock().await;
    let templates = state.store.list_templates().await?;
    Ok(board.export_snapshot(templates))
}
