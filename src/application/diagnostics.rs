//! Read-only reports about configuration and the credentials file.
//!
//! Every report re-reads the file system; nothing is cached between calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, Utc};
use serde::Serialize;
use serde_json::Value;

use super::inquiry_service::iso_timestamp;
use crate::adapters::credentials::{CredentialFile, CredentialLoader};
use crate::config::app_config::AppConfig;
use crate::domain::submission::FormField;
use crate::ports::spreadsheet_client::SpreadsheetClient;

pub const SERVICE_NAME: &str = "Trailer House Inquiry Form Backend";
pub const SECRET_FILES_NOTE: &str = "Upload credentials.json to Render → Environment → Secret Files";
pub const SECRET_FILES_GUIDE: &str = "Mount path should be: /etc/secrets";
pub const SECRET_FILES_INSTRUCTION: &str = "1. Go to Render → Your Service → Environment\n2. Scroll to \"Secret Files\"\n3. Add file with mount path: /etc/secrets\n4. Filename: credentials.json\n5. Paste your service account JSON";
const NOT_FOUND: &str = "Not found";

fn library_label(available: bool) -> &'static str {
    if available {
        "AVAILABLE"
    } else {
        "NOT AVAILABLE"
    }
}

fn set_label(set: bool) -> &'static str {
    if set {
        "SET"
    } else {
        "NOT SET"
    }
}

/// A file check that only makes sense when a spreadsheet backend is compiled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileCheck {
    Checked(bool),
    NotApplicable(&'static str),
}

#[derive(Debug, Serialize)]
pub struct StatusConfig {
    pub google_sheets: bool,
    pub credentials_path: String,
    pub file_exists: FileCheck,
    pub sheets_library: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub frontend: String,
    pub form_fields: BTreeMap<&'static str, &'static str>,
    pub config: StatusConfig,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigCheck {
    pub google_sheet_key: &'static str,
    pub credentials_path: String,
    pub file_exists: bool,
    pub file_exists_detail: &'static str,
    pub sheets_library: &'static str,
    pub frontend: String,
    pub server_time: String,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentFlags {
    #[serde(rename = "GOOGLE_SHEET_KEY_set")]
    pub google_sheet_key_set: bool,
    #[serde(rename = "GOOGLE_CREDENTIALS_PATH_set")]
    pub google_credentials_path_set: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct FileDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_readable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_files_guide: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DebugReport {
    pub credentials_path: String,
    pub file_exists: bool,
    pub sheets_available: bool,
    pub frontend: String,
    pub server_time: f64,
    pub render_environment: bool,
    pub environment: EnvironmentFlags,
    #[serde(flatten)]
    pub file: FileDetails,
}

/// Outcome of `GET /check-creds`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CredentialCheck {
    Valid {
        status: &'static str,
        message: &'static str,
        file_path: String,
        file_size: usize,
        service_account: String,
        share_sheet_with: String,
        project_id: Value,
        private_key_id: Value,
        action_required: &'static str,
    },
    Missing {
        status: &'static str,
        message: &'static str,
        exact_path: String,
        instruction: &'static str,
    },
    InvalidJson {
        status: &'static str,
        message: &'static str,
        error: String,
        file_path: String,
    },
    Failed {
        status: &'static str,
        message: String,
        #[serde(rename = "type")]
        error_type: &'static str,
        file_path: String,
    },
}

fn string_field(document: &Value, key: &str) -> Option<String> {
    document.get(key).map(|value| match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

/// Builds the diagnostic reports from the live configuration and file state.
#[derive(Clone)]
pub struct Diagnostics {
    config: Arc<AppConfig>,
    credentials: CredentialLoader,
    client: Arc<dyn SpreadsheetClient>,
}

impl Diagnostics {
    pub fn new(config: Arc<AppConfig>, client: Arc<dyn SpreadsheetClient>) -> Self {
        let credentials = CredentialLoader::new(config.credentials_file_path.clone());
        Diagnostics {
            config,
            credentials,
            client,
        }
    }

    fn credentials_path(&self) -> String {
        self.credentials.path().display().to_string()
    }

    pub async fn status(&self) -> ServiceStatus {
        let available = self.client.is_available();
        let file_exists = if available {
            FileCheck::Checked(self.credentials.exists().await)
        } else {
            FileCheck::NotApplicable("N/A")
        };

        ServiceStatus {
            status: "ok",
            service: SERVICE_NAME,
            frontend: self.config.frontend_url.clone(),
            form_fields: FormField::catalog(),
            config: StatusConfig {
                google_sheets: self.config.sheet_key().is_some(),
                credentials_path: self.credentials_path(),
                file_exists,
                sheets_library: library_label(available),
            },
            endpoints: BTreeMap::from([
                ("submit", "/submit (POST)"),
                ("health", "/health (GET)"),
                ("test", "/test (GET)"),
                ("debug", "/debug (GET)"),
                ("check_creds", "/check-creds (GET)"),
            ]),
        }
    }

    pub fn health(&self) -> Health {
        Health {
            status: "healthy",
            timestamp: iso_timestamp(Local::now().naive_local()),
        }
    }

    pub async fn config_check(&self) -> ConfigCheck {
        let available = self.client.is_available();
        let file_exists = available && self.credentials.exists().await;

        ConfigCheck {
            google_sheet_key: set_label(self.config.sheet_key().is_some()),
            credentials_path: self.credentials_path(),
            file_exists,
            file_exists_detail: if file_exists {
                "YES"
            } else {
                "NO - Check Render Secret Files"
            },
            sheets_library: library_label(available),
            frontend: self.config.frontend_url.clone(),
            server_time: iso_timestamp(Local::now().naive_local()),
        }
    }

    pub async fn debug_report(&self) -> DebugReport {
        let file = match self.credentials.read_raw().await {
            CredentialFile::Missing => FileDetails {
                note: Some(SECRET_FILES_NOTE),
                secret_files_guide: Some(SECRET_FILES_GUIDE),
                ..FileDetails::default()
            },
            CredentialFile::Unreadable(e) => FileDetails {
                file_readable: Some(false),
                file_error: Some(e.to_string()),
                ..FileDetails::default()
            },
            CredentialFile::Contents(contents) => {
                let mut details = FileDetails {
                    file_size: Some(contents.chars().count()),
                    file_readable: Some(true),
                    ..FileDetails::default()
                };
                match serde_json::from_str::<Value>(&contents) {
                    Ok(document) => {
                        let field = |key: &str| {
                            string_field(&document, key).or_else(|| Some(NOT_FOUND.to_string()))
                        };
                        details.json_valid = Some(true);
                        details.service_account = field("client_email");
                        details.project_id = field("project_id");
                        details.private_key_id = field("private_key_id");
                    }
                    Err(e) => {
                        details.json_valid = Some(false);
                        details.json_error = Some(e.to_string());
                    }
                }
                details
            }
        };

        DebugReport {
            credentials_path: self.credentials_path(),
            file_exists: file.note.is_none(),
            sheets_available: self.client.is_available(),
            frontend: self.config.frontend_url.clone(),
            server_time: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            render_environment: self.config.is_render_environment(),
            environment: EnvironmentFlags {
                google_sheet_key_set: self.config.sheet_key().is_some(),
                google_credentials_path_set: self.config.credentials_path_env_set(),
            },
            file,
        }
    }

    pub async fn check_credentials(&self) -> CredentialCheck {
        let file_path = self.credentials_path();
        tracing::info!("🔍 Checking credentials at: {}", file_path);

        let contents = match self.credentials.read_raw().await {
            CredentialFile::Contents(contents) => contents,
            CredentialFile::Missing => {
                return CredentialCheck::Missing {
                    status: "error",
                    message: "File not found at exact path",
                    exact_path: file_path,
                    instruction: SECRET_FILES_INSTRUCTION,
                }
            }
            CredentialFile::Unreadable(e) => {
                tracing::error!("❌ Error: {}", e);
                return CredentialCheck::Failed {
                    status: "error",
                    message: e.to_string(),
                    error_type: "IoError",
                    file_path,
                };
            }
        };
        let file_size = contents.chars().count();
        tracing::info!("📄 File size: {} bytes", file_size);

        let document = match serde_json::from_str::<Value>(&contents) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("❌ JSON Parse Error: {}", e);
                return CredentialCheck::InvalidJson {
                    status: "error",
                    message: "Invalid JSON format",
                    error: e.to_string(),
                    file_path,
                };
            }
        };
        if !document.is_object() {
            return CredentialCheck::Failed {
                status: "error",
                message: "Credentials file must contain a JSON object".to_string(),
                error_type: "MalformedCredentials",
                file_path,
            };
        }

        let client_email = string_field(&document, "client_email").unwrap_or_default();
        CredentialCheck::Valid {
            status: "success",
            message: "Credentials file is valid",
            file_path,
            file_size,
            service_account: client_email.clone(),
            share_sheet_with: client_email,
            project_id: document.get("project_id").cloned().unwrap_or(Value::Null),
            private_key_id: document.get("private_key_id").cloned().unwrap_or(Value::Null),
            action_required: "Share your Google Sheet with the service account email above",
        }
    }
}
