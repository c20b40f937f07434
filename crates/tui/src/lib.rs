pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use tasklist_core as core;
pub use tasklist_core::capture;
pub use tasklist_core::database as db;
pub use tasklist_core::model;
pub use tasklist_core::storage;

pub use tasklist_core::AppConfig;
