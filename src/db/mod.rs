//! Storage layer: a key-value blob store and a typed repository on top.

pub mod file;
pub mod memory;
pub mod storage;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use storage::Storage;

use crate::error::AppError;

/// Store keys as constants.
pub mod keys {
    pub const USER: &str = "recovery_app_user";
    pub const AUTH_TOKEN: &str = "recovery_app_auth_token";
    pub const PROGRAMS: &str = "recovery_app_programs";
    pub const INJURIES: &str = "recovery_app_injuries";
    pub const REMINDERS: &str = "recovery_app_reminders";
}

/// Minimal text key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: String) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}
