use thiserror::Error;

use crate::domain::credentials::CredentialRecord;
use crate::domain::sheets::row::Row;

/// Why a spreadsheet write did not happen.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsError {
    #[error("Spreadsheet key is not configured")]
    NotConfigured,
    #[error("Spreadsheet client is not available in this build")]
    Unavailable,
    #[error("Service account credentials could not be loaded")]
    Credentials,
    #[error("Authentication with the spreadsheet service failed")]
    Auth,
    #[error("Permission denied by the spreadsheet service")]
    Permission,
    #[error("Spreadsheet not found")]
    NotFound,
    #[error("Spreadsheet has no worksheet")]
    WorksheetNotFound,
    #[error("Spreadsheet service request failed")]
    Transient,
}

impl SheetsError {
    /// Maps an HTTP status returned by the spreadsheet service.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => SheetsError::Auth,
            403 => SheetsError::Permission,
            404 => SheetsError::NotFound,
            _ => SheetsError::Transient,
        }
    }

    /// What the operator should look at.
    pub fn hint(&self) -> &'static str {
        match self {
            SheetsError::NotConfigured => "Set the GOOGLE_SHEET_KEY environment variable",
            SheetsError::Unavailable => "Build with the `google-sheets` feature",
            SheetsError::Credentials => {
                "Upload credentials.json as a secret file mounted at /etc/secrets"
            }
            SheetsError::Auth => "Regenerate the service account key or check the server clock",
            SheetsError::Permission => "Share the spreadsheet with the service account email",
            SheetsError::NotFound => "Check the GOOGLE_SHEET_KEY environment variable",
            SheetsError::WorksheetNotFound => "Make sure the spreadsheet has at least one worksheet",
            SheetsError::Transient => "Retry later, the spreadsheet service could not be reached",
        }
    }
}

/// The first worksheet of an opened spreadsheet.
#[async_trait::async_trait]
pub trait Worksheet: Send + Sync {
    fn title(&self) -> &str;

    /// Values of `row`, trailing empty cells trimmed. Empty when the row is blank.
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetsError>;

    /// Appends `values` after the last non-empty row.
    async fn append_row(&self, values: &[String]) -> error_stack::Result<(), SheetsError>;
}

/// Remote spreadsheet capability, selected once at startup.
#[async_trait::async_trait]
pub trait SpreadsheetClient: Send + Sync {
    fn is_available(&self) -> bool;

    /// Authenticates as `credentials` and opens the first worksheet of `spreadsheet_id`.
    async fn open_first_worksheet(
        &self,
        credentials: &CredentialRecord,
        spreadsheet_id: &str,
    ) -> error_stack::Result<Box<dyn Worksheet>, SheetsError>;
}
