//! Todo list: newest first, identity by generated id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoStore {
    items: Vec<TodoItem>,
}

impl TodoStore {
    pub fn new(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    /// Insert at the front. Blank text is rejected with `None`.
    pub fn add(&mut self, text: &str) -> Option<&TodoItem> {
        self.add_at(text, Utc::now())
    }

    pub fn add_at(&mut self, text: &str, created_at: DateTime<Utc>) -> Option<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.items.insert(
            0,
            TodoItem {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                done: false,
                created_at,
            },
        );
        self.items.first()
    }

    /// Flip `done`; returns the new value, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|t| t.id == id)?;
        item.done = !item.done;
        Some(item.done)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Remove completed items, returning how many were dropped.
    pub fn clear_done(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|t| !t.done);
        before - self.items.len()
    }

    /// Case-insensitive substring match on text. An empty query matches all.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a TodoItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_inserts_at_front() {
        let mut store = TodoStore::default();
        store.add("first");
        store.add("second");
        let texts: Vec<_> = store.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut store = TodoStore::default();
        assert!(store.add("").is_none());
        assert!(store.add(" \t ").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut store = TodoStore::default();
        let a = store.add("a").unwrap().id.clone();
        let b = store.add("a").unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn toggle_and_remove_by_id() {
        let mut store = TodoStore::default();
        let id = store.add("write tests").unwrap().id.clone();
        assert_eq!(store.toggle(&id), Some(true));
        assert_eq!(store.toggle(&id), Some(false));
        assert_eq!(store.toggle("nope"), None);
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut store = TodoStore::default();
        store.add("Buy MILK");
        store.add("call mom");
        store.add("Milkshake recipe");
        let hits: Vec<_> = store.filter("milk").iter().map(|t| t.text.clone()).collect();
        assert_eq!(hits, vec!["Milkshake recipe", "Buy MILK"]);
        assert_eq!(store.filter("").len(), 3);
        assert!(store.filter("xyz").is_empty());
    }

    #[test]
    fn clear_done_keeps_open_items() {
        let mut store = TodoStore::default();
        let done = store.add("done").unwrap().id.clone();
        store.add("open");
        store.toggle(&done);
        assert_eq!(store.clear_done(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].text, "open");
    }
}
