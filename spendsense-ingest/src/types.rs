use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source tag used when the caller does not provide one
pub const DEFAULT_SOURCE: &str = "sms";

/// Knobs shared by every importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Origin channel stamped on every record
    pub source: String,
    /// Fallback timestamp for lines without a recognisable date
    pub now: NaiveDateTime,
}

impl ParseOptions {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            now,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::at(Local::now().naive_local())
    }
}
