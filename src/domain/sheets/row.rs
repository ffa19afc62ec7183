use std::fmt::Formatter;

/// A worksheet row, stored zero-based and displayed one-based like the sheet UI.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row {
    index: u32,
}

impl Row {
    /// The row holding the column titles.
    pub const HEADER: Row = Row { index: 0 };

    /// Returns the row number as a 1-based index.
    /// # Examples
    /// ```
    /// use trailer_inquiry::domain::sheets::row::Row;
    /// assert_eq!(Row::HEADER.row(), 1);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}
