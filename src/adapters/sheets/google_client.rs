use error_stack::{report, Report, ResultExt};
use google_sheets4::api::{Scope, ValueRange};
use google_sheets4::{hyper, Sheets};
use serde_json::Value;
use tracing::{debug, instrument};

use super::auth;
use super::flatten_double_vec::{trim_trailing_empty, FlattenDoubleVec};
use super::http_client::{self, HttpsConnector};
use super::value_range_factory::ValueRangeFactory;
use crate::domain::credentials::CredentialRecord;
use crate::domain::sheets::a1_notation::A1Notation;
use crate::domain::sheets::row::Row;
use crate::ports::spreadsheet_client::{SheetsError, SpreadsheetClient, Worksheet};

/// Turns a Sheets API failure into a classified report, keeping the original message.
fn classify(error: google_sheets4::Error) -> Report<SheetsError> {
    let kind = match &error {
        google_sheets4::Error::BadRequest(body) => body
            .pointer("/error/code")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .map_or(SheetsError::Transient, SheetsError::from_status),
        google_sheets4::Error::Failure(response) => {
            SheetsError::from_status(response.status().as_u16())
        }
        google_sheets4::Error::MissingToken(_) | google_sheets4::Error::MissingAPIKey => {
            SheetsError::Auth
        }
        _ => SheetsError::Transient,
    };
    report!(kind).attach_printable(error.to_string())
}

/// Google Sheets API v4 over a shared HTTPS client. A new authenticator is built for each
/// write so the service account key is always the one currently on disk.
pub struct GoogleSheetsClient {
    client: hyper::Client<HttpsConnector>,
}

impl GoogleSheetsClient {
    pub fn new() -> Self {
        GoogleSheetsClient {
            client: http_client::http_client(),
        }
    }
}

impl Default for GoogleSheetsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpreadsheetClient for GoogleSheetsClient {
    fn is_available(&self) -> bool {
        true
    }

    #[instrument(skip(self, credentials), fields(service_account = %credentials.client_email))]
    async fn open_first_worksheet(
        &self,
        credentials: &CredentialRecord,
        spreadsheet_id: &str,
    ) -> error_stack::Result<Box<dyn Worksheet>, SheetsError> {
        let authenticator = auth::auth(credentials, self.client.clone()).await?;
        let hub = Sheets::new(self.client.clone(), authenticator);

        let (_, spreadsheet) = hub
            .spreadsheets()
            .get(spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(classify)
            .attach_printable_lazy(|| format!("Failed to open spreadsheet {spreadsheet_id}"))?;

        let title = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .min_by_key(|properties| properties.index.unwrap_or_default())
            .and_then(|properties| properties.title)
            .ok_or_else(|| report!(SheetsError::WorksheetNotFound))?;

        debug!("Opened worksheet {}", title);
        Ok(Box::new(GoogleWorksheet {
            hub,
            spreadsheet_id: spreadsheet_id.to_string(),
            title,
        }))
    }
}

struct GoogleWorksheet {
    hub: Sheets<HttpsConnector>,
    spreadsheet_id: String,
    title: String,
}

#[async_trait::async_trait]
impl Worksheet for GoogleWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    #[instrument(skip(self), fields(worksheet = %self.title))]
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetsError> {
        let range = A1Notation::whole_row(&self.title, row);
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range.as_ref())
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(classify)
            .attach_printable_lazy(|| format!("Failed to read range {range}"))?;

        Ok(trim_trailing_empty(
            value_range.values.unwrap_or_default().flatten_double_vec(),
        ))
    }

    #[instrument(skip(self, values), fields(worksheet = %self.title))]
    async fn append_row(&self, values: &[String]) -> error_stack::Result<(), SheetsError> {
        let anchor = A1Notation::table_anchor(&self.title);
        self.hub
            .spreadsheets()
            .values_append(
                ValueRange::from_single_row(values),
                &self.spreadsheet_id,
                anchor.as_ref(),
            )
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .map_err(classify)
            .attach_printable_lazy(|| format!("Failed to append to {anchor}"))
    }
}
