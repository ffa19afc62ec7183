pub mod a1_notation;
pub mod row;
pub mod sheet_row;
