//! Timestamp utilities

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Start of a broadcast hour on a given calendar date.
///
/// `hour_of_day` is clamped to 0..=23; broadcast hours never cross a date
/// boundary.
pub fn hour_start(air_date: NaiveDate, hour_of_day: u8) -> DateTime<Utc> {
    let hour = u32::from(hour_of_day.min(23));
    let naive = air_date
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| air_date.and_time(NaiveTime::MIN));
    Utc.from_utc_datetime(&naive)
}
