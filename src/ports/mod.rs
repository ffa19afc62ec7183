pub mod spreadsheet_client;
