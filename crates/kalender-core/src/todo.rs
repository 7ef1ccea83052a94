use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Milliseconds since Unix epoch.
    pub created_at: i64,
    #[serde(default)]
    pub is_post_it: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Ordered to-do list. New items go on top and the order can be rearranged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a to-do at the top of the list.
    ///
    /// A `post_it_color` marks the item as a post-it with that color.
    pub fn add(
        &mut self,
        text: &str,
        post_it_color: Option<String>,
        created_at: i64,
    ) -> Result<Todo, ValidationError> {
        Validator::validate_text(text)?;
        if let Some(color) = &post_it_color {
            Validator::validate_color(color)?;
        }

        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            completed: false,
            created_at,
            is_post_it: post_it_color.is_some(),
            color: post_it_color,
        };
        self.items.insert(0, todo.clone());
        Ok(todo)
    }

    /// Flip the completed flag. Returns the updated item if found.
    pub fn toggle(&mut self, id: &str) -> Option<&Todo> {
        let todo = self.items.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(todo)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Move `active_id` to the position currently held by `over_id`.
    ///
    /// Returns false and leaves the list untouched when the ids are equal or
    /// either is unknown.
    pub fn move_item(&mut self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return false;
        }
        let from = self.items.iter().position(|t| t.id == active_id);
        let to = self.items.iter().position(|t| t.id == over_id);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };

        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(list: &TodoList) -> Vec<&str> {
        list.items().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_prepends() {
        let mut list = TodoList::new();
        list.add("Handle", None, 1).unwrap();
        list.add("  Vaske  ", None, 2).unwrap();
        assert_eq!(texts(&list), vec!["Vaske", "Handle"]);
        assert!(!list.items()[0].is_post_it);
    }

    #[test]
    fn test_add_post_it() {
        let mut list = TodoList::new();
        let todo = list.add("Ring", Some("#ffeb3b".to_string()), 1).unwrap();
        assert!(todo.is_post_it);
        assert_eq!(todo.color.as_deref(), Some("#ffeb3b"));
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = TodoList::new();
        assert_eq!(list.add("   ", None, 1), Err(ValidationError::EmptyText));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = TodoList::new();
        let todo = list.add("Handle", None, 1).unwrap();

        assert!(list.toggle(&todo.id).unwrap().completed);
        assert!(!list.toggle(&todo.id).unwrap().completed);
        assert!(list.toggle("missing").is_none());

        assert!(list.remove(&todo.id));
        assert!(!list.remove(&todo.id));
    }

    #[test]
    fn test_move_item() {
        let mut list = TodoList::new();
        let c = list.add("c", None, 1).unwrap();
        let b = list.add("b", None, 2).unwrap();
        let a = list.add("a", None, 3).unwrap();
        assert_eq!(texts(&list), vec!["a", "b", "c"]);

        assert!(list.move_item(&a.id, &c.id));
        assert_eq!(texts(&list), vec!["b", "c", "a"]);

        assert!(list.move_item(&a.id, &b.id));
        assert_eq!(texts(&list), vec!["a", "b", "c"]);

        assert!(!list.move_item(&a.id, &a.id));
        assert!(!list.move_item(&a.id, "missing"));
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut list = TodoList::new();
        list.add("Handle", None, 42).unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["createdAt"], 42);
        assert_eq!(json[0]["isPostIt"], false);
    }
}
