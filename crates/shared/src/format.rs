//! Display formatting for event timestamps.

/// Zero-pad a date/time component to two digits.
#[must_use]
pub fn pad2(v: u32) -> String {
    format!("{v:02}")
}

/// Format broken-down local time as `YYYY-MM-DD HH:MM (timezone)`.
///
/// The caller supplies the components (the frontend reads them off the
/// browser clock) so this stays pure and testable.
#[must_use]
pub fn format_date_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, tz: &str) -> String {
    format!(
        "{year}-{}-{} {}:{} ({tz})",
        pad2(month),
        pad2(day),
        pad2(hour),
        pad2(minute)
    )
}
