//! A small single-user to-do list kept in a JSON file.

pub mod config;
pub mod logging;
pub mod manager;
pub mod shell;
pub mod store;
pub mod task;

pub use config::Config;
pub use manager::{ManagerError, TaskId, TaskManager};
pub use store::{CorruptFilePolicy, StoreError, TaskStore};
pub use task::Task;
