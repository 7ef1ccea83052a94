use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::Validator;

/// Background colors a new note can get.
pub const NOTE_COLORS: [&str; 5] = ["#fef3c7", "#d1fae5", "#dbeafe", "#fce7f3", "#f3e8ff"];

/// New notes are dropped somewhere in this square of the board.
pub const DROP_AREA: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A sticky note placed freely on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostIt {
    pub id: String,
    pub text: String,
    pub position: Position,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBoard {
    notes: Vec<PostIt>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[PostIt] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Put a new note on the board.
    ///
    /// Color and drop position come from the random bits of the new id.
    pub fn add(&mut self, text: &str) -> Result<PostIt, ValidationError> {
        Validator::validate_text(text)?;

        let id = Uuid::new_v4();
        let bytes = id.as_bytes();
        let color = NOTE_COLORS[bytes[0] as usize % NOTE_COLORS.len()];
        let x = f64::from(u16::from_le_bytes([bytes[1], bytes[2]])) / 65536.0 * DROP_AREA;
        let y = f64::from(u16::from_le_bytes([bytes[3], bytes[4]])) / 65536.0 * DROP_AREA;

        let note = PostIt {
            id: id.to_string(),
            text: text.trim().to_string(),
            position: Position { x, y },
            color: color.to_string(),
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Shift a note by a drag delta. Returns the moved note, or `None` if no
    /// note has that id.
    ///
    /// A move that would leave either coordinate non-finite is rejected and
    /// the note stays put.
    pub fn move_by(
        &mut self,
        id: &str,
        dx: f64,
        dy: f64,
    ) -> Result<Option<&PostIt>, ValidationError> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        let x = note.position.x + dx;
        let y = note.position.y + dy;
        if !(x.is_finite() && y.is_finite()) {
            return Err(ValidationError::InvalidPosition);
        }
        note.position = Position { x, y };
        Ok(Some(note))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }
}
