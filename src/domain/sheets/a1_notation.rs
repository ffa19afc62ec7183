use std::fmt::Formatter;

use super::row::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sheet titles are always quoted; embedded quotes are doubled.
fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

impl A1Notation {
    /// The whole of `row`, e.g. `'Sheet1'!1:1`.
    pub fn whole_row(sheet_title: &str, row: Row) -> Self {
        A1Notation(format!("{}!{}:{}", quote_sheet_title(sheet_title), row, row))
    }

    /// The top-left cell, used as the table anchor when appending.
    pub fn table_anchor(sheet_title: &str) -> Self {
        A1Notation(format!("{}!A{}", quote_sheet_title(sheet_title), Row::HEADER))
    }
}
