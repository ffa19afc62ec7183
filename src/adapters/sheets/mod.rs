#[cfg(feature = "google-sheets")]
pub mod auth;
pub mod flatten_double_vec;
#[cfg(feature = "google-sheets")]
pub mod google_client;
#[cfg(feature = "google-sheets")]
pub mod http_client;
pub mod unavailable;
#[cfg(feature = "google-sheets")]
pub mod value_range_factory;

use std::sync::Arc;

use crate::ports::spreadsheet_client::SpreadsheetClient;

/// The spreadsheet client compiled into this binary.
pub fn default_client() -> Arc<dyn SpreadsheetClient> {
    #[cfg(feature = "google-sheets")]
    {
        Arc::new(google_client::GoogleSheetsClient::new())
    }
    #[cfg(not(feature = "google-sheets"))]
    {
        Arc::new(unavailable::UnavailableClient)
    }
}
