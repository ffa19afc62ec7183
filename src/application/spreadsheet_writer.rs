use std::sync::Arc;

use chrono::NaiveDateTime;
use error_stack::{report, ResultExt};
use tracing::{error, info, instrument, warn};

use crate::adapters::credentials::CredentialLoader;
use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::row::Row;
use crate::domain::sheets::sheet_row::SheetRow;
use crate::domain::submission::{FormField, FormSubmission};
use crate::ports::spreadsheet_client::{SheetsError, SpreadsheetClient};

/// Appends inquiries to the first worksheet of the configured spreadsheet.
///
/// Writes are best-effort: [`SpreadsheetWriter::save_row`] logs and swallows every failure so
/// the caller can acknowledge the submission regardless.
#[derive(Clone)]
pub struct SpreadsheetWriter {
    config: SpreadsheetConfig,
    credentials: CredentialLoader,
    client: Arc<dyn SpreadsheetClient>,
}

impl std::fmt::Debug for SpreadsheetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetWriter {{ config: {:?} }}", self.config)
    }
}

impl SpreadsheetWriter {
    pub fn new(config: SpreadsheetConfig, client: Arc<dyn SpreadsheetClient>) -> Self {
        let credentials = CredentialLoader::new(config.credentials_file.clone());
        SpreadsheetWriter {
            config,
            credentials,
            client,
        }
    }

    /// Both a spreadsheet key and a spreadsheet backend are present.
    pub fn is_enabled(&self) -> bool {
        self.config.is_configured() && self.client.is_available()
    }

    /// Appends `submission`, returning whether the row reached the spreadsheet.
    #[instrument(skip_all)]
    pub async fn save_row(&self, submission: &FormSubmission, received_at: NaiveDateTime) -> bool {
        match self.try_save_row(submission, received_at).await {
            Ok(()) => {
                info!(
                    "✅ SUCCESS: Saved to Google Sheets! (user: {})",
                    submission.cell(FormField::Name)
                );
                true
            }
            Err(report) => {
                let kind = report.current_context();
                error!("❌ GOOGLE SHEETS ERROR: {kind}");
                warn!("💡 Solution: {}", kind.hint());
                error!("{report:?}");
                false
            }
        }
    }

    pub async fn try_save_row(
        &self,
        submission: &FormSubmission,
        received_at: NaiveDateTime,
    ) -> error_stack::Result<(), SheetsError> {
        if !self.client.is_available() {
            return Err(report!(SheetsError::Unavailable));
        }
        let spreadsheet_id = self
            .config
            .spreadsheet_id
            .as_deref()
            .ok_or_else(|| report!(SheetsError::NotConfigured))?;

        info!(
            "📊 Saving inquiry to spreadsheet {} using {}",
            spreadsheet_id,
            self.credentials.path().display()
        );

        let credentials = self
            .credentials
            .load()
            .await
            .ok_or_else(|| report!(SheetsError::Credentials))?;
        info!("✅ Service Account: {}", credentials.client_email);

        let share_with = || format!("service account: {}", credentials.client_email);

        let worksheet = self
            .client
            .open_first_worksheet(&credentials, spreadsheet_id)
            .await
            .attach_printable_lazy(share_with)?;
        info!("✅ Opened sheet: {}", worksheet.title());

        let header = worksheet
            .row_values(Row::HEADER)
            .await
            .attach_printable_lazy(share_with)?;
        if header.is_empty() {
            info!("📝 Adding headers to sheet...");
            worksheet
                .append_row(SheetRow::header().cells())
                .await
                .attach_printable_lazy(share_with)?;
        }

        let row = SheetRow::from_submission(submission, received_at);
        worksheet
            .append_row(row.cells())
            .await
            .attach_printable_lazy(share_with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sheets::unavailable::UnavailableClient;
    use crate::domain::credentials::CredentialRecord;
    use crate::domain::submission::FieldValue;
    use crate::ports::spreadsheet_client::Worksheet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSheet {
        rows: Mutex<Vec<Vec<String>>>,
        opened: Mutex<u32>,
    }

    struct FakeWorksheet(Arc<FakeSheet>);

    #[async_trait::async_trait]
    impl Worksheet for FakeWorksheet {
        fn title(&self) -> &str {
            "Sheet1"
        }

        async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetsError> {
            let rows = self.0.rows.lock().unwrap();
            Ok(rows.get(row.index() as usize).cloned().unwrap_or_default())
        }

        async fn append_row(&self, values: &[String]) -> error_stack::Result<(), SheetsError> {
            self.0.rows.lock().unwrap().push(values.to_vec());
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl SpreadsheetClient for Arc<FakeSheet> {
        fn is_available(&self) -> bool {
            true
        }

        async fn open_first_worksheet(
            &self,
            _credentials: &CredentialRecord,
            _spreadsheet_id: &str,
        ) -> error_stack::Result<Box<dyn Worksheet>, SheetsError> {
            *self.opened.lock().unwrap() += 1;
            Ok(Box::new(FakeWorksheet(Arc::clone(self))))
        }
    }

    const VALID_KEY: &str = r#"{"type":"service_account","project_id":"p","private_key_id":"i","private_key":"k","client_email":"bot@p.iam.gserviceaccount.com"}"#;

    fn received_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn submission() -> FormSubmission {
        [("name", "田中太郎"), ("email", "a@b.com"), ("phone", "090"), ("content", "x")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
            .collect()
    }

    fn writer_with(
        dir: &tempfile::TempDir,
        key: Option<&str>,
        client: Arc<dyn SpreadsheetClient>,
    ) -> SpreadsheetWriter {
        let credentials_file = dir.path().join("credentials.json");
        if let Some(key) = key {
            std::fs::write(&credentials_file, key).unwrap();
        }
        SpreadsheetWriter::new(
            SpreadsheetConfig {
                spreadsheet_id: Some("sheet-id".into()),
                credentials_file,
            },
            client,
        )
    }

    #[tokio::test]
    async fn test_header_then_row_on_empty_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = Arc::new(FakeSheet::default());
        let writer = writer_with(&dir, Some(VALID_KEY), Arc::new(Arc::clone(&sheet)));

        assert!(writer.save_row(&submission(), received_at()).await);
        assert!(writer.save_row(&submission(), received_at()).await);

        let rows = sheet.rows.lock().unwrap();
        assert_eq!(rows.len(), 3, "header is written only once");
        assert_eq!(rows[0], SheetRow::header().cells());
        assert_eq!(rows[1][0], "2024-04-01 10:00:00");
        assert_eq!(rows[1][3], "田中太郎");
        assert_eq!(rows[1], rows[2]);
    }

    #[tokio::test]
    async fn test_missing_credentials_never_opens_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = Arc::new(FakeSheet::default());
        let writer = writer_with(&dir, None, Arc::new(Arc::clone(&sheet)));

        assert!(!writer.save_row(&submission(), received_at()).await);
        let report = writer
            .try_save_row(&submission(), received_at())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &SheetsError::Credentials);
        assert_eq!(*sheet.opened.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_credentials_without_client_email_fail() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = Arc::new(FakeSheet::default());
        let writer = writer_with(
            &dir,
            Some(r#"{"type":"service_account","project_id":"p","private_key_id":"i","private_key":"k"}"#),
            Arc::new(Arc::clone(&sheet)),
        );

        assert!(!writer.save_row(&submission(), received_at()).await);
        assert!(sheet.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_client_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_with(&dir, Some(VALID_KEY), Arc::new(UnavailableClient));

        assert!(!writer.is_enabled());
        let report = writer
            .try_save_row(&submission(), received_at())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &SheetsError::Unavailable);
    }

    #[tokio::test]
    async fn test_missing_sheet_key_is_not_configured() {
        let writer = SpreadsheetWriter::new(
            SpreadsheetConfig {
                spreadsheet_id: None,
                credentials_file: "/nonexistent/credentials.json".into(),
            },
            Arc::new(Arc::new(FakeSheet::default())),
        );
        assert!(!writer.is_enabled());
        let report = writer
            .try_save_row(&submission(), received_at())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &SheetsError::NotConfigured);
    }
}
