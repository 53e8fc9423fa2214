//! spendsense-ingest: turn pasted bank messages and statement exports into
//! [`ParsedTransaction`](spendsense_core::ParsedTransaction) records.

pub mod extract;
pub mod message;
pub mod parsers;
pub mod types;

pub use extract::{AmountMatch, extract_amount, extract_merchant, parse_amount};
pub use message::{parse_line, parse_messages, parse_messages_with};
pub use parsers::{parse_csv_export, parse_csv_file};
pub use types::{DEFAULT_SOURCE, ParseOptions};
