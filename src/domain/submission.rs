use std::collections::{btree_map::Entry, BTreeMap};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "必須項目が入力されていません";
pub const ACCEPTED_MESSAGE: &str =
    "お問い合わせが正常に送信されました。確認後、担当者よりご連絡いたします。";

/// Fields of the inquiry form, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    ConsultationMethod,
    ConsultationType,
    Name,
    Furigana,
    Email,
    Phone,
    Content,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Content,
    ];

    /// Label shown next to the field on the form.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ConsultationMethod => "オンライン（Team / Zoom）, 電話",
            FormField::ConsultationType => {
                "トレーテールウスについて聞きたい, 新築戸建施設について聞きたい, お見積りについて聞きたい, その他"
            }
            FormField::Name => "名前",
            FormField::Furigana => "ふりがな",
            FormField::Email => "メールアドレス",
            FormField::Phone => "電話番号",
            FormField::Content => "ご相談内容",
        }
    }

    pub fn catalog() -> BTreeMap<&'static str, &'static str> {
        FormField::iter()
            .map(|field| (field.name(), field.label()))
            .collect()
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }
}

/// A single submitted value. Multi-select inputs arrive as lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    /// Objects and mixed lists, kept as sent.
    Other(serde_json::Value),
}

impl FieldValue {
    /// Empty strings, empty lists and objects, `null`, `false` and zero all count as
    /// "not filled in".
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
            FieldValue::Bool(flag) => !flag,
            FieldValue::Null => true,
            FieldValue::Other(value) => match value {
                serde_json::Value::Object(fields) => fields.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                _ => false,
            },
        }
    }

    /// Text written to a spreadsheet cell.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Bool(flag) => flag.to_string(),
            FieldValue::Null => String::new(),
            FieldValue::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields: {missing:?}")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// The normalized body of a `POST /submit`, whatever its encoding was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSubmission {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        FormSubmission { fields }
    }

    /// Builds a submission from url-encoded pairs. A key sent more than once becomes a list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: BTreeMap<String, FieldValue> = BTreeMap::new();
        for (key, value) in pairs {
            let value = value.into();
            match fields.entry(key.into()) {
                Entry::Vacant(slot) => {
                    slot.insert(FieldValue::Text(value));
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    FieldValue::List(items) => items.push(value),
                    existing => {
                        let first = existing.to_cell();
                        *existing = FieldValue::List(vec![first, value]);
                    }
                },
            }
        }
        FormSubmission { fields }
    }

    pub fn get(&self, field: FormField) -> Option<&FieldValue> {
        self.fields.get(field.name())
    }

    /// Cell text for `field`, empty when it was not submitted.
    pub fn cell(&self, field: FormField) -> String {
        self.get(field).map(FieldValue::to_cell).unwrap_or_default()
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        FormField::REQUIRED
            .iter()
            .filter(|field| self.get(**field).map_or(true, FieldValue::is_blank))
            .map(FormField::name)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

impl FromIterator<(String, FieldValue)> for FormSubmission {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        FormSubmission {
            fields: iter.into_iter().collect(),
        }
    }
}
