use serde_json::Value;

pub trait FlattenDoubleVec<T> {
    fn flatten_double_vec(self) -> T;
}

/// Cell values of a value range, row after row. Strings are taken verbatim, other JSON
/// values use their literal text.
impl FlattenDoubleVec<Vec<String>> for Vec<Vec<Value>> {
    fn flatten_double_vec(self) -> Vec<String> {
        self.into_iter()
            .flatten()
            .map(|v| match v {
                Value::String(text) => text,
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
    }
}

/// Drops the empty cells at the end of a row, the way the Sheets API reports rows.
pub fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}
