use chrono::{NaiveDateTime, Timelike};

/// Renders a timestamp as `YYYY-MM-DDTHH:MM:SS`, appending `.ffffff` only
/// when the microsecond part is non-zero.
pub fn format_iso_datetime(value: &NaiveDateTime) -> String {
    if value.nanosecond() / 1_000 == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
