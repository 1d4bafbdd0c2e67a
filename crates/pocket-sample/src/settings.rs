//! # Settings
//!
//! The demo binary reads its [`PocketSettings`] from, in increasing priority:
//!
//! 1. an optional `config/pocket.{toml,json}` file;
//! 2. `POCKET__`-prefixed environment variables, with `__` separating levels.
//!
//! ```toml
//! request_timeout_ms = 5000
//!
//! [application]
//! id = "pocket-demo"
//! name = "Pocket Demo"
//! launch_id = "l-1"
//! api_host = "http://localhost:8080/api/v2"
//!
//! [user]
//! id = "u1"
//! name = "Ann"
//! session_id = "s-1"
//! ```
//!
//! `POCKET__APPLICATION__API_HOST=https://pocket.example.com/api` overrides the
//! host from the file. Environment values stay strings until deserialized, so
//! ids such as `007` keep their leading zeros.

use crate::model::{ApplicationData, UserData};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/pocket";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("Missing setting: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocketSettings {
    pub application: ApplicationData,
    pub user: UserData,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl PocketSettings {
    /// Loads from [`DEFAULT_CONFIG_PATH`] and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads from `path` (extension optional, file optional) and the environment.
    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        Self::build(Config::builder().add_source(File::with_name(path).required(false)))
    }

    /// Parses settings from a TOML document, still honouring the environment.
    pub fn from_toml(document: &str) -> Result<Self, SettingsError> {
        Self::build(Config::builder().add_source(File::from_str(document, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: PocketSettings = builder
            .add_source(Environment::with_prefix("POCKET").separator("__"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.application.api_host.trim().is_empty() {
            return Err(SettingsError::Missing("application.api_host"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
