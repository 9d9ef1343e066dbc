//! Journal notes and focus timer sessions.

use super::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Markdown journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    /// Plain-text summary derived from `content`.
    pub preview_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// One finished focus timer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: EntityId,
    pub label: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl FocusSession {
    pub fn started_on(&self, day: NaiveDate) -> bool {
        self.started_at.date_naive() == day
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFocusSession {
    pub label: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: u32,
}
