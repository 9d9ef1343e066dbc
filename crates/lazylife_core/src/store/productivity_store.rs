//! Productivity store: journal notes and focus timer sessions.
//!
//! # Invariants
//! - `Note::preview_text` always reflects the current `content`.
//! - `Note::updated_at` moves forward on every successful update.

use super::{Collection, DomainStore, Draft, Patch, Record};
use crate::model::productivity::{FocusSession, NewFocusSession, NewNote, Note, NotePatch};
use crate::model::EntityId;
use crate::preview::note_preview;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductivityStore {
    notes: Collection<Note>,
    focus_sessions: Collection<FocusSession>,
    initialized: bool,
}

impl ProductivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn note(&self, id: EntityId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn focus_sessions(&self) -> &[FocusSession] {
        self.focus_sessions.as_slice()
    }

    pub fn add_note(&mut self, note: NewNote) -> EntityId {
        self.notes.add(note)
    }

    /// Applies `patch` and refreshes preview and `updated_at`.
    pub fn update_note(&mut self, id: EntityId, patch: NotePatch) -> bool {
        self.notes.update(id, patch)
    }

    pub fn delete_note(&mut self, id: EntityId) -> bool {
        self.notes.remove(id).is_some()
    }

    /// Records one finished focus timer run.
    pub fn log_focus_session(&mut self, session: NewFocusSession) -> EntityId {
        self.focus_sessions.add(session)
    }

    pub fn delete_focus_session(&mut self, id: EntityId) -> bool {
        self.focus_sessions.remove(id).is_some()
    }
}

impl DomainStore for ProductivityStore {
    const SLOT_KEY: &'static str = "productivity-store";

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

impl Record for Note {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewNote {
    type Record = Note;

    fn into_record(self, id: EntityId) -> Note {
        let now = Utc::now();
        Note {
            id,
            title: self.title,
            preview_text: note_preview(&self.content),
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patch<Note> for NotePatch {
    fn apply_to(self, target: &mut Note) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(content) = self.content {
            target.preview_text = note_preview(&content);
            target.content = content;
        }
        target.updated_at = Utc::now().max(target.updated_at);
    }
}

impl Record for FocusSession {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewFocusSession {
    type Record = FocusSession;

    fn into_record(self, id: EntityId) -> FocusSession {
        FocusSession {
            id,
            label: self.label,
            started_at: self.started_at,
            duration_minutes: self.duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProductivityStore;
    use crate::model::productivity::{NewNote, NotePatch};

    #[test]
    fn content_update_refreshes_preview() {
        let mut store = ProductivityStore::new();
        let id = store.add_note(NewNote {
            title: "Monday".to_string(),
            content: "# Wins\n- shipped **beta**".to_string(),
        });
        let created = store.note(id).expect("note").clone();
        assert_eq!(created.preview_text.as_deref(), Some("Wins shipped beta"));

        assert!(store.update_note(
            id,
            NotePatch {
                content: Some("Rest day".to_string()),
                ..NotePatch::default()
            }
        ));
        let updated = store.note(id).expect("note");
        assert_eq!(updated.title, "Monday");
        assert_eq!(updated.preview_text.as_deref(), Some("Rest day"));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }
}
