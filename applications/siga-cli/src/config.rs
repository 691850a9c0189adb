/// Console configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use siga_storage::StorageSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "siga.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SigaConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Offline store on this machine
    #[default]
    Local,
    /// SIGA REST API
    Rest,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Rest => "rest",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub kind: BackendKind,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Role for users whose profile carries none
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Operator identity reported by `siga whoami`
    #[serde(default)]
    pub operator_email: Option<String>,

    #[serde(default)]
    pub operator_name: Option<String>,
}

impl SigaConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `siga.toml` in the working directory and may be
    /// missing. Environment variables prefixed with `SIGA_` override the
    /// file, with `__` between section and key (`SIGA_BACKEND__KIND=rest`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(CliError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SIGA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(CliError::Config(
                "storage key must not be empty (set SIGA_STORAGE__STORAGE_KEY)".to_string(),
            ));
        }

        if self.backend.kind == BackendKind::Rest && self.backend.base_url.trim().is_empty() {
            return Err(CliError::Config(
                "REST backend needs a base URL (set SIGA_BACKEND__BASE_URL)".to_string(),
            ));
        }

        if self.backend.timeout_secs == 0 {
            return Err(CliError::Config("timeout must be at least one second".to_string()));
        }

        if self.auth.default_role.trim().is_empty() {
            return Err(CliError::Config("default role must not be empty".to_string()));
        }

        Ok(())
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        kind: BackendKind::default(),
        base_url: default_base_url(),
        token: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        default_role: default_role(),
        operator_email: None,
        operator_name: None,
    }
}

fn default_role() -> String {
    siga_state::DEFAULT_ROLE.to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        default_backend()
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        default_auth()
    }
}
