use error_stack::report;

use crate::domain::credentials::CredentialRecord;
use crate::ports::spreadsheet_client::{SheetsError, SpreadsheetClient, Worksheet};

/// Stand-in used when the binary is built without a spreadsheet backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClient;

#[async_trait::async_trait]
impl SpreadsheetClient for UnavailableClient {
    fn is_available(&self) -> bool {
        false
    }

    async fn open_first_worksheet(
        &self,
        _credentials: &CredentialRecord,
        _spreadsheet_id: &str,
    ) -> error_stack::Result<Box<dyn Worksheet>, SheetsError> {
        Err(report!(SheetsError::Unavailable))
    }
}
