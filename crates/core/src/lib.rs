pub mod capture;
pub mod clock;
pub mod commands;
pub mod config;
pub mod database;
pub mod model;
pub mod services;
pub mod state;
pub mod storage;
pub mod view;

pub use capture::CaptureError;
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{open_service, StorageBackend};
pub use config::AppConfig;
pub use database::Database;
pub use model::*;
pub use services::{TasksService, ViewSnapshot};
pub use state::TodoState;
pub use storage::{KeyValuePersistence, KeyValueStore, MemoryStore, Persistence, TASKS_KEY};
