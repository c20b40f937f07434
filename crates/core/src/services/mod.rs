pub mod tasks;

pub use tasks::{TasksService, ViewSnapshot};
