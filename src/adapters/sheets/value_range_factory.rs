use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

pub trait ValueRangeFactory {
    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self {
        let row = row_values
            .iter()
            .map(|cell| wrap_value(cell.clone()))
            .collect::<Vec<_>>();

        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![row]),
        }
    }
}
