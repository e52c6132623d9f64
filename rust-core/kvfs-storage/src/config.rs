// SPDX-License-Identifier: PMPL-1.0-or-later
//! Runtime mode selection.
//!
//! The mode is read once, at startup, from `KVFS_STORAGE_MODE` and then
//! passed by value into [`crate::facade::Storage::open`]. Nothing in the
//! crate reads the environment after that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Environment variable that selects the runtime mode.
pub const MODE_ENV_VAR: &str = "KVFS_STORAGE_MODE";

/// Which backend the storage facade binds to for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// The host's hierarchical filesystem.
    #[default]
    Local,
    /// A flat, prefix-scannable key-value store.
    Remote,
}

impl RuntimeMode {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeMode::Local => "local",
            RuntimeMode::Remote => "remote",
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(RuntimeMode::Local),
            "remote" => Ok(RuntimeMode::Remote),
            other => Err(StorageError::InvalidConfig(format!(
                "unknown {} value '{}' (expected 'local' or 'remote')",
                MODE_ENV_VAR, other
            ))),
        }
    }
}

/// Configuration for the storage facade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection.
    pub mode: RuntimeMode,
}

impl StorageConfig {
    /// Build a config for an explicit mode.
    pub fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }

    /// Read the config from the process environment.
    ///
    /// An unset or empty `KVFS_STORAGE_MODE` means [`RuntimeMode::Local`].
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(MODE_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => RuntimeMode::default(),
        };
        Ok(Self { mode })
    }
}
