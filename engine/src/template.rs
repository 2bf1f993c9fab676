//! Message templates.
//!
//! A template holds reusable notification text. Adding a template to a day
//! copies its text into a new event, so later template edits never touch
//! existing events.

use crate::error::{Error, Result};
use crate::palette::{resolve_color, EventKind, TitleColor};
use crate::{DayKey, Event, EventId};
use serde::{Deserialize, Serialize};

/// A reusable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier (empty before first persistence)
    #[serde(default)]
    pub id: String,
    /// Category of the events created from it
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<TitleColor>,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            content: content.into(),
            title_color: None,
        }
    }

    pub fn with_color(mut self, color: TitleColor) -> Self {
        self.title_color = Some(color);
        self
    }

    /// Templates created for a user who has none yet.
    pub fn default_seeds() -> Vec<Template> {
        vec![
            Template::new(
                "",
                EventKind::Closing,
                "Fechamento Padrão",
                "Sua fatura fecha hoje, organize seu limite.",
            ),
            Template::new(
                "",
                EventKind::Due,
                "Vencimento Urgente",
                "Sua fatura vence hoje! Evite juros.",
            ),
            Template::new(
                "",
                EventKind::Push,
                "Novidade",
                "Prepare-se! Temos uma novidade chegando em breve.",
            ),
        ]
    }

    /// Check the template can be stored.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::BlankTitle);
        }
        Ok(())
    }

    /// Build a new, unpersisted event from this template.
    ///
    /// `day_len` is the current size of the target day; the event is
    /// appended after the existing ones.
    pub fn instantiate(&self, date: DayKey, day_len: usize) -> Event {
        Event {
            id: EventId::default(),
            date,
            kind: self.kind,
            title: self.title.clone(),
            template_id: (!self.id.is_empty()).then(|| self.id.clone()),
            content: self.content.clone(),
            title_color: Some(resolve_color(self.kind, self.title_color)),
            rank: Some(day_len as i64),
            completed: false,
        }
    }
}
