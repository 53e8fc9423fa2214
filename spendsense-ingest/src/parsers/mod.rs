//! Structured statement formats (as opposed to free-form pasted text).

pub mod csv_export;

pub use csv_export::{CSV_SOURCE, parse_csv_export, parse_csv_file};
