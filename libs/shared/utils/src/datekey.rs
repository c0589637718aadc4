use chrono::{Datelike, NaiveDate, NaiveTime};

/// Format a date as the backend's booked-slot map key: `D_M_YYYY`, no zero
/// padding. The backend uses the same string as a map key, so the format has
/// to match byte-for-byte or lookups silently miss.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}_{}_{}", date.day(), date.month(), date.year())
}

/// Format a slot start time as the backend's time label, e.g. `10:00 AM`,
/// `1:30 PM`. Hours are unpadded, twelve-hour clock.
pub fn time_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
