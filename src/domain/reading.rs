// Reading domain model
use chrono::{Local, NaiveDateTime, Timelike};

/// Timestamp format used in the CSV record files. Lexicographic order of
/// formatted timestamps matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One (timestamp, guest count) observation for a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub taken_at: NaiveDateTime,
    pub count: u32,
}

impl Reading {
    pub fn new(taken_at: NaiveDateTime, count: u32) -> Self {
        Self { taken_at, count }
    }

    /// A reading taken at the current local wall-clock time, truncated to
    /// second precision to match the CSV format.
    pub fn now(count: u32) -> Self {
        let now = Local::now().naive_local();
        let taken_at = now.with_nanosecond(0).unwrap_or(now);
        Self { taken_at, count }
    }

    pub fn format_timestamp(&self) -> String {
        self.taken_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn parse_timestamp(value: &str) -> chrono::ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
    }
}
