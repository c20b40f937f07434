use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::database::Database;
use crate::services::TasksService;
use crate::storage::{KeyValuePersistence, KeyValueStore, MemoryStore};

/// Where the opened task list is being persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite(PathBuf),
    Memory,
}

impl StorageBackend {
    pub fn is_durable(&self) -> bool {
        matches!(self, StorageBackend::Sqlite(_))
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite(path) => write!(f, "{}", path.display()),
            StorageBackend::Memory => write!(f, "in-memory (changes will not be saved)"),
        }
    }
}

/// Open the task list backed by the SQLite store under the data directory.
///
/// When the database cannot be opened the service runs on an in-memory store
/// for the rest of the session, so edits keep working but are not durable.
pub fn open_service(config: &AppConfig) -> (TasksService, StorageBackend) {
    let (store, backend) = match Database::initialize(config) {
        Ok(db) => {
            if let Ok(version) = db.schema_version() {
                debug!(path = %config.db_path().display(), version, "opened task database");
            }
            let store: Box<dyn KeyValueStore> = Box::new(db);
            (store, StorageBackend::Sqlite(config.db_path().to_path_buf()))
        }
        Err(err) => {
            warn!(
                path = %config.db_path().display(),
                "falling back to in-memory storage: {err:#}"
            );
            let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
            (store, StorageBackend::Memory)
        }
    };
    let service = TasksService::with_system_clock(Box::new(KeyValuePersistence::new(store)));
    (service, backend)
}
