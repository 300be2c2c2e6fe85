//! Note board domain model.
//!
//! # Responsibility
//! - Define the freely positioned note record and its board position.
//!
//! # Invariants
//! - `id` is stable for the note's lifetime and never reused.
//! - Notes carry no ordering; the board positions them independently.
//! - `edited_at >= created_at` for every persisted note.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Pixel offset of a note on the board, relative to the board origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePosition {
    pub x: f64,
    pub y: f64,
}

/// One sticky note on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used for editing, dragging and deletion.
    pub id: NoteId,
    /// Free-form note body. Blank notes are allowed and persisted.
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// Last content edit time, epoch milliseconds.
    pub edited_at: i64,
    /// Board position of the note's top-left corner.
    #[serde(default)]
    pub position: NotePosition,
}

impl Note {
    /// Creates a blank note at the board origin.
    pub fn new(created_at: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: String::new(),
            created_at,
            edited_at: created_at,
            position: NotePosition::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NotePosition};

    #[test]
    fn new_note_is_blank_at_origin() {
        let note = Note::new(1_700_000_000_000);
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.edited_at);
        assert_eq!(note.position, NotePosition::default());
    }

    #[test]
    fn decode_tolerates_missing_position() {
        let json = format!(
            r#"{{"id":"{}","content":"pick up parcel","created_at":1,"edited_at":2}}"#,
            Note::new(1).id
        );
        let decoded: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.position, NotePosition::default());
    }
}
