use std::path::PathBuf;

use super::app_config::AppConfig;

/// Where the service account lives and which spreadsheet receives the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Option<Box<str>>,
    pub credentials_file: PathBuf,
}

impl SpreadsheetConfig {
    pub fn is_configured(&self) -> bool {
        self.spreadsheet_id.is_some()
    }
}

impl From<&AppConfig> for SpreadsheetConfig {
    fn from(config: &AppConfig) -> Self {
        SpreadsheetConfig {
            spreadsheet_id: config.sheet_key().map(Box::from),
            credentials_file: config.credentials_file_path.clone(),
        }
    }
}
