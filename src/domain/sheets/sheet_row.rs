use chrono::NaiveDateTime;

use crate::domain::submission::{FormField, FormSubmission};

pub const COLUMN_COUNT: usize = 8;

/// Column titles written once, on the first row of an empty worksheet.
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Timestamp",
    "相談方法",
    "相談種類",
    "名前",
    "ふりがな",
    "メールアドレス",
    "電話番号",
    "ご相談内容",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One inquiry laid out in [`HEADER`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow([String; COLUMN_COUNT]);

impl SheetRow {
    pub fn header() -> Self {
        SheetRow(HEADER.map(str::to_string))
    }

    pub fn from_submission(submission: &FormSubmission, received_at: NaiveDateTime) -> Self {
        SheetRow([
            received_at.format(TIMESTAMP_FORMAT).to_string(),
            submission.cell(FormField::ConsultationMethod),
            submission.cell(FormField::ConsultationType),
            submission.cell(FormField::Name),
            submission.cell(FormField::Furigana),
            submission.cell(FormField::Email),
            submission.cell(FormField::Phone),
            submission.cell(FormField::Content),
        ])
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }
}
