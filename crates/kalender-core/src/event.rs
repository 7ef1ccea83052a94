use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::Validator;

/// A user-created annotation on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Fields of an event as submitted from the date detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::validate_year(self.date.year())?;
        Validator::validate_title(&self.title)?;
        Validator::validate_description(&self.description)?;
        if let Some(color) = &self.color {
            Validator::validate_color(color)?;
        }
        Ok(())
    }

    /// Turn the submission into a stored event with the given id.
    pub fn into_event(self, id: String) -> CustomEvent {
        CustomEvent {
            id,
            date: self.date,
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            color: self.color,
            icon: self.icon,
        }
    }
}

/// All custom events, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventBook {
    events: Vec<CustomEvent>,
}

impl EventBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[CustomEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CustomEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate and append a new event under a fresh id.
    pub fn add(&mut self, new: NewEvent) -> Result<CustomEvent, ValidationError> {
        new.validate()?;
        let event = new.into_event(Uuid::new_v4().to_string());
        self.events.push(event.clone());
        Ok(event)
    }

    /// Replace the event with `id`. Returns the updated event, or `None` if
    /// no event has that id.
    pub fn update(
        &mut self,
        id: &str,
        changes: NewEvent,
    ) -> Result<Option<CustomEvent>, ValidationError> {
        changes.validate()?;
        let Some(slot) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        *slot = changes.into_event(id.to_string());
        Ok(Some(slot.clone()))
    }

    /// Remove the event with `id`. Returns true if it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    /// Events on exactly `date` (year, month and day).
    pub fn on_date(&self, date: NaiveDate) -> Vec<&CustomEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn in_year(&self, year: i32) -> Vec<&CustomEvent> {
        self.events.iter().filter(|e| e.date.year() == year).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_event(d: NaiveDate, title: &str) -> NewEvent {
        NewEvent {
            date: d,
            title: title.to_string(),
            description: None,
            color: Some("#ff0000".to_string()),
            icon: None,
        }
    }

    #[test]
    fn test_add_and_query() {
        let mut book = EventBook::new();
        let a = book.add(new_event(date(2024, 5, 17), "Tog")).unwrap();
        book.add(new_event(date(2025, 5, 17), "Tog igjen")).unwrap();
        book.add(new_event(date(2024, 12, 24), "Julaften")).unwrap();

        assert_eq!(book.len(), 3);
        assert_eq!(book.on_date(date(2024, 5, 17)), vec![&a]);
        assert_eq!(book.in_year(2024).len(), 2);
        assert!(book.get(&a.id).is_some());
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut book = EventBook::new();
        assert_eq!(
            book.add(new_event(date(2024, 1, 1), "  ")),
            Err(ValidationError::EmptyTitle)
        );

        let mut bad_color = new_event(date(2024, 1, 1), "Møte");
        bad_color.color = Some("red".to_string());
        assert!(book.add(bad_color).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_trims_and_drops_blank_description() {
        let mut book = EventBook::new();
        let mut new = new_event(date(2024, 1, 1), "  Møte  ");
        new.description = Some("   ".to_string());
        let event = book.add(new).unwrap();
        assert_eq!(event.title, "Møte");
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_update_and_remove() {
        let mut book = EventBook::new();
        let event = book.add(new_event(date(2024, 3, 1), "Før")).unwrap();

        let updated = book
            .update(&event.id, new_event(date(2024, 3, 2), "Etter"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, event.id);
        assert_eq!(updated.title, "Etter");
        assert!(book.on_date(date(2024, 3, 1)).is_empty());

        assert_eq!(
            book.update("missing", new_event(date(2024, 3, 2), "X")),
            Ok(None)
        );

        assert!(book.remove(&event.id));
        assert!(!book.remove(&event.id));
        assert!(book.is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let mut book = EventBook::new();
        book.add(new_event(date(2024, 3, 1), "Møte")).unwrap();
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["date"], "2024-03-01");
        assert!(json[0].get("description").is_none());
    }
}
