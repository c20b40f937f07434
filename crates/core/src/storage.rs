//! Persistence bridge between the task list and a key-value store.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::model::Task;

/// Key under which the serialized task sequence is stored.
pub const TASKS_KEY: &str = "todoTasks";

/// String key-value storage in the shape of browser local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<bool>;
}

/// Non-durable store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        Ok(self.items.borrow_mut().remove(key).is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        (**self).remove_item(key)
    }
}

/// Load and save the whole task sequence.
///
/// `load` returns `Ok(None)` when nothing has been stored yet. Callers treat
/// every error as non-fatal.
pub trait Persistence {
    fn load(&self) -> Result<Option<Vec<Task>>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// Stores the task sequence as one JSON array under [`TASKS_KEY`].
#[derive(Debug)]
pub struct KeyValuePersistence<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValuePersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> Persistence for KeyValuePersistence<S> {
    fn load(&self) -> Result<Option<Vec<Task>>> {
        let Some(raw) = self.store.get_item(TASKS_KEY)? else {
            return Ok(None);
        };
        let tasks = serde_json::from_str(&raw)
            .with_context(|| format!("Stored value under '{}' is not a task list", TASKS_KEY))?;
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
        self.store
            .set_item(TASKS_KEY, &raw)
            .with_context(|| format!("Failed to write '{}'", TASKS_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_every_field() {
        let persistence = KeyValuePersistence::new(MemoryStore::new());
        let created = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 58).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let mut done = Task::new("01HX".into(), "Done thing", created);
        done.completed = true;
        let tasks = vec![
            Task::new("01HW".into(), "Open thing", created),
            done,
        ];

        persistence.save(&tasks).unwrap();
        assert_eq!(persistence.load().unwrap(), Some(tasks));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let persistence = KeyValuePersistence::new(MemoryStore::new());
        assert_eq!(persistence.load().unwrap(), None);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let store = MemoryStore::new();
        store.set_item(TASKS_KEY, "{not json").unwrap();
        let persistence = KeyValuePersistence::new(store);
        assert!(persistence.load().is_err());
    }

    #[test]
    fn stored_layout_uses_camel_case_fields() {
        let persistence = KeyValuePersistence::new(MemoryStore::new());
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        persistence
            .save(&[Task::new("a".into(), "x", created)])
            .unwrap();
        let raw = persistence.store().get_item(TASKS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"completed\":false"));
    }
}
