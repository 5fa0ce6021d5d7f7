#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use gymlog_domain::StorageError;
use strum::AsRefStr;

pub mod files;
#[cfg(target_arch = "wasm32")]
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
mod records;

pub use records::*;

/// Key-value store holding whole serialized values.
pub trait Backend {
    /// Returns `None` if no value is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "gymlog_workouts")]
    Workouts,
    #[strum(serialize = "settings")]
    Settings,
}
