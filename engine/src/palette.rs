//! Event categories and the title color palette.
//!
//! Older records carry no color. For those the category decides the color,
//! so legacy boards keep their look after colors became user-selectable.

use serde::{Deserialize, Serialize};

/// Category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Invoice closing date
    Closing,
    /// Invoice due date
    Due,
    /// Push notification reminder
    #[default]
    Push,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Closing, EventKind::Due, EventKind::Push];

    /// Legacy category label.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Due => "Vencimento da Fatura",
            EventKind::Closing => "Fechamento da Fatura",
            EventKind::Push => "Notificação Push",
        }
    }
}

/// Color a user can pick for an event title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleColor {
    Yellow,
    Green,
    Red,
    Blue,
}

impl TitleColor {
    pub const ALL: [TitleColor; 4] = [
        TitleColor::Yellow,
        TitleColor::Green,
        TitleColor::Red,
        TitleColor::Blue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TitleColor::Yellow => "Amarelo",
            TitleColor::Green => "Verde",
            TitleColor::Red => "Vermelho",
            TitleColor::Blue => "Azul",
        }
    }
}

/// Color used when an event or template has none of its own.
pub fn default_color(kind: EventKind) -> TitleColor {
    match kind {
        EventKind::Due => TitleColor::Red,
        EventKind::Closing => TitleColor::Yellow,
        EventKind::Push => TitleColor::Blue,
    }
}

/// Custom color wins over the category default.
pub fn resolve_color(kind: EventKind, custom: Option<TitleColor>) -> TitleColor {
    custom.unwrap_or_else(|| default_color(kind))
}
