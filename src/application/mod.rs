pub mod diagnostics;
pub mod inquiry_service;
pub mod spreadsheet_writer;
