//! Note board service: freely positioned notes with write-through records.
//!
//! # Responsibility
//! - Own the note collection, board positions and stacking order.
//! - Round-trip the `notes` and `positions` records, defensively on load.
//!
//! # Invariants
//! - Notes carry no list ordering; position and stacking level are the only
//!   spatial state.
//! - The `positions` record is derived from the note collection whenever a
//!   note moves; on load it overlays the note records.
//! - Stacking levels are in-memory only and reset to zero on load.

use crate::model::note::{Note, NoteId, NotePosition};
use crate::repo::state_repo::StateStore;
use crate::service::ServiceResult;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Record key holding the note collection.
pub const NOTES_KEY: &str = "notes";
/// Record key holding the id-to-position map.
pub const NOTE_POSITIONS_KEY: &str = "positions";

/// Unordered, positioned note collection behind the board widget.
pub struct NoteService<S: StateStore> {
    store: S,
    notes: Vec<Note>,
    stacking: HashMap<NoteId, u32>,
}

impl<S: StateStore> NoteService<S> {
    /// Loads the note and position records from the store.
    ///
    /// Absent or malformed records degrade to an empty board. Stored
    /// positions overlay the note records; notes without one stay at the
    /// board origin.
    pub fn open(store: S) -> ServiceResult<Self> {
        let mut notes = decode_notes(store.read_record(NOTES_KEY)?);
        let positions = decode_positions(store.read_record(NOTE_POSITIONS_KEY)?);

        for note in &mut notes {
            if let Some(position) = positions.get(&note.id) {
                note.position = *position;
            }
        }
        let stacking = notes.iter().map(|note| (note.id, 0)).collect();

        info!("event=state_load module=notes status=ok notes={}", notes.len());

        Ok(Self {
            store,
            notes,
            stacking,
        })
    }

    /// Creates a blank note at the board origin and returns its id.
    ///
    /// Unlike tasks, blank notes persist; the board renders them as empty
    /// slips prompting for input.
    pub fn add_note(&mut self) -> ServiceResult<NoteId> {
        let note = Note::new(now_epoch_ms());
        let id = note.id;
        self.notes.push(note);
        self.stacking.insert(id, 0);
        self.persist_notes()?;

        info!("event=note_add module=notes status=ok id={id}");
        Ok(id)
    }

    /// Removes the note and its stacking entry. Unknown ids are a silent
    /// no-op.
    pub fn delete_note(&mut self, id: NoteId) -> ServiceResult<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=notes status=noop reason=unknown_id id={id}");
            return Ok(());
        }

        self.stacking.remove(&id);
        self.persist_notes()?;
        self.persist_positions()?;

        info!("event=note_delete module=notes status=ok id={id}");
        Ok(())
    }

    /// Replaces the note body and refreshes its edit timestamp. Blank
    /// content is allowed. Unknown ids are a silent no-op.
    pub fn edit_note(&mut self, id: NoteId, content: &str) -> ServiceResult<()> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_edit module=notes status=noop reason=unknown_id id={id}");
            return Ok(());
        };

        note.content = content.to_string();
        note.edited_at = now_epoch_ms();
        self.persist_notes()?;

        info!("event=note_edit module=notes status=ok id={id}");
        Ok(())
    }

    /// Stores the note's drop position and rewrites both records.
    pub fn move_note(&mut self, id: NoteId, position: NotePosition) -> ServiceResult<()> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_move module=notes status=noop reason=unknown_id id={id}");
            return Ok(());
        };

        note.position = position;
        self.persist_notes()?;
        self.persist_positions()?;

        info!(
            "event=note_move module=notes status=ok id={id} x={} y={}",
            position.x, position.y
        );
        Ok(())
    }

    /// Raises the note above every other one and returns its new stacking
    /// level. Unknown ids return `None`. Stacking is not persisted.
    pub fn bring_to_front(&mut self, id: NoteId) -> Option<u32> {
        if !self.notes.iter().any(|note| note.id == id) {
            return None;
        }

        let top = self.stacking.values().copied().max().unwrap_or(0);
        let level = top + 1;
        self.stacking.insert(id, level);
        Some(level)
    }

    /// Current stacking level of a note; zero for unknown or unraised ids.
    pub fn stack_level(&self, id: NoteId) -> u32 {
        self.stacking.get(&id).copied().unwrap_or(0)
    }

    /// Read-only snapshot of the board.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks a note up by id.
    pub fn find_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    fn persist_notes(&mut self) -> ServiceResult<()> {
        let encoded = serde_json::to_string(&self.notes)?;
        self.store.write_record(NOTES_KEY, &encoded)?;
        Ok(())
    }

    fn persist_positions(&mut self) -> ServiceResult<()> {
        let positions: HashMap<NoteId, NotePosition> = self
            .notes
            .iter()
            .map(|note| (note.id, note.position))
            .collect();
        let encoded = serde_json::to_string(&positions)?;
        self.store.write_record(NOTE_POSITIONS_KEY, &encoded)?;
        Ok(())
    }
}

fn decode_notes(raw: Option<String>) -> Vec<Note> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!("event=state_decode module=notes status=recovered key={NOTES_KEY} error={err}");
        Vec::new()
    })
}

fn decode_positions(raw: Option<String>) -> HashMap<NoteId, NotePosition> {
    let Some(raw) = raw else {
        return HashMap::new();
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(
            "event=state_decode module=notes status=recovered key={NOTE_POSITIONS_KEY} error={err}"
        );
        HashMap::new()
    })
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
