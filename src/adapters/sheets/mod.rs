//! Spreadsheet sinks. Google Sheets over REST, or a local CSV file.

pub mod csv_sink;
pub mod google;

pub use csv_sink::CsvSheetSink;
pub use google::GoogleSheetsSink;
