use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::spreadsheet_writer::SpreadsheetWriter;
use crate::domain::submission::{
    FieldValue, FormField, FormSubmission, ValidationError, ACCEPTED_MESSAGE,
};

/// ISO-8601 local time without offset, e.g. `2024-04-01T09:30:05.123456`.
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn iso_timestamp(at: NaiveDateTime) -> String {
    at.format(ISO_TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoedFields {
    pub name: FieldValue,
    pub email: FieldValue,
    pub phone: FieldValue,
}

/// Acknowledgment returned for an accepted inquiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: &'static str,
    pub sheets_saved: bool,
    pub timestamp: String,
    pub form_data: EchoedFields,
}

/// Validates inquiries and hands them to the spreadsheet writer.
#[derive(Debug, Clone)]
pub struct InquiryService {
    writer: SpreadsheetWriter,
}

impl InquiryService {
    pub fn new(writer: SpreadsheetWriter) -> Self {
        InquiryService { writer }
    }

    /// Rejects incomplete inquiries; otherwise always accepts, whether or not the
    /// spreadsheet write went through.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        submission: FormSubmission,
    ) -> Result<SubmissionResult, ValidationError> {
        let echo = |field| {
            submission
                .get(field)
                .cloned()
                .unwrap_or_else(|| FieldValue::Text(String::new()))
        };
        info!(
            "📝 FORM SUBMISSION (email: {}, phone: {})",
            submission.cell(FormField::Email),
            submission.cell(FormField::Phone)
        );

        if let Err(error) = submission.validate() {
            warn!("❌ Missing fields: {:?}", error.missing);
            return Err(error);
        }

        let received_at = Local::now().naive_local();
        let sheets_saved = if self.writer.is_enabled() {
            self.writer.save_row(&submission, received_at).await
        } else {
            warn!("⚠️ Google Sheets: Not configured");
            false
        };

        Ok(SubmissionResult {
            success: true,
            message: ACCEPTED_MESSAGE,
            sheets_saved,
            timestamp: iso_timestamp(Local::now().naive_local()),
            form_data: EchoedFields {
                name: echo(FormField::Name),
                email: echo(FormField::Email),
                phone: echo(FormField::Phone),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sheets::unavailable::UnavailableClient;
    use crate::config::sheets_config::SpreadsheetConfig;
    use std::sync::Arc;

    fn service(spreadsheet_id: Option<&str>) -> InquiryService {
        InquiryService::new(SpreadsheetWriter::new(
            SpreadsheetConfig {
                spreadsheet_id: spreadsheet_id.map(Into::into),
                credentials_file: "/nonexistent/credentials.json".into(),
            },
            Arc::new(UnavailableClient),
        ))
    }

    fn form(pairs: &[(&str, &str)]) -> FormSubmission {
        FormSubmission::from_pairs(pairs.iter().copied())
    }

    #[tokio::test]
    async fn test_accepts_without_spreadsheet() {
        let result = service(None)
            .submit(form(&[
                ("name", "田中太郎"),
                ("email", "a@b.com"),
                ("phone", "090-1234-5678"),
                ("content", "資料が欲しい"),
            ]))
            .await
            .unwrap();
        assert!(result.success);
        assert!(!result.sheets_saved);
        assert_eq!(result.message, ACCEPTED_MESSAGE);
        assert_eq!(result.form_data.name, FieldValue::from("田中太郎"));
    }

    #[tokio::test]
    async fn test_rejects_blank_name() {
        let error = service(Some("sheet-id"))
            .submit(form(&[
                ("name", ""),
                ("email", "a@b.com"),
                ("phone", "090"),
                ("content", "x"),
            ]))
            .await
            .unwrap_err();
        assert_eq!(error.missing, vec!["name"]);
    }

    #[test]
    fn test_iso_timestamp_has_no_offset() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_micro_opt(9, 30, 5, 42)
            .unwrap();
        assert_eq!(iso_timestamp(at), "2024-04-01T09:30:05.000042");
    }
}
