use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use error_stack::{report, ResultExt};
use serde_path_to_error::Segment;
use thiserror::Error;

/// Mount point used by the hosting platform for secret files.
pub const DEFAULT_CREDENTIALS_FILE_PATH: &str = "/etc/secrets/credentials.json";
pub const DEFAULT_FRONTEND_URL: &str = "https://nortiq-trailer-house-vercel-9afi.vercel.app";
pub const DEFAULT_PORT: u16 = 10000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration sources")]
    Build,
    #[error("Failed to deserialize configuration (field path: {0})")]
    Deserialize(String),
}

/// Process-wide settings, built once at startup and shared read-only.
///
/// Every field can come from the optional `Config` file or from an environment variable with
/// the upper-cased field name (`GOOGLE_SHEET_KEY`, `PORT`, ...).
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub port: u16,
    pub bind_host: String,
    pub google_sheet_key: Option<String>,
    /// Reported by the diagnostics only, the credentials are always read from
    /// `credentials_file_path`.
    pub google_credentials_path: Option<String>,
    pub credentials_file_path: PathBuf,
    pub frontend_url: String,
    pub render: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            bind_host: "0.0.0.0".to_string(),
            google_sheet_key: None,
            google_credentials_path: None,
            credentials_file_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE_PATH),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            render: None,
            log_level: "info".to_string(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads the configuration from the `Config` file (or `CONFIG_PATH`) and the environment.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let builder = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::default());

        Self::from_builder(builder).attach_printable_lazy(|| format!("config file: {config_path}"))
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> error_stack::Result<Self, ConfigError> {
        let config = builder
            .build()
            .map_err(|e| report!(ConfigError::Build).attach_printable(e.to_string()))?;

        serde_path_to_error::deserialize::<_, AppConfig>(config).map_err(|e| {
            let path_str = e
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            let message = e.inner().to_string();
            report!(ConfigError::Deserialize(
                path_str.trim_start_matches('.').to_string()
            ))
            .attach_printable(message)
        })
    }

    pub fn sheet_key(&self) -> Option<&str> {
        non_blank(&self.google_sheet_key)
    }

    pub fn credentials_path_env_set(&self) -> bool {
        non_blank(&self.google_credentials_path).is_some()
    }

    pub fn is_render_environment(&self) -> bool {
        non_blank(&self.render).is_some()
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
