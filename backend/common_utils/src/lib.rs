//! Common utilities for the donation service

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod id_type;
pub mod types;

pub use errors::CustomResult;

pub mod date_time {
    use time::OffsetDateTime;

    /// Current date and time in UTC.
    pub fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    /// Return the UNIX timestamp of the current date and time in UTC, in milliseconds
    pub fn now_unix_timestamp_millis() -> i128 {
        OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
    }

    /// Human readable date used in receipts, e.g. `18 October 2026`
    pub fn format_receipt_date(date: OffsetDateTime) -> String {
        format!("{} {} {}", date.day(), date.month(), date.year())
    }
}
