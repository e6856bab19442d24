// src/utils/timestamp.rs
use chrono::{DateTime, Local, SecondsFormat, Utc};

/// "2024-05-01T09:30:12.345Z"
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO timestamp with ':' and '.' replaced so it can sit in a file name.
/// "2024-05-01T09:30:12.345Z" -> "2024-05-01T09-30-12-345Z"
pub fn filename_timestamp(now: DateTime<Utc>) -> String {
    iso_timestamp(now).replace([':', '.'], "-")
}

/// Seconds-precision stamp used in performance report names.
/// "2024-05-01T09:30:12.345Z" -> "2024-05-01_09-30-12"
pub fn compact_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Human readable local time for report footers.
pub fn local_display(now: DateTime<Local>) -> String {
    now.format("%d/%m/%Y %H:%M:%S").to_string()
}
