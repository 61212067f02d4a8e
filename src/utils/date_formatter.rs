use crate::data_types::TimeUnit;
use chrono::{DateTime, Utc};

/// Label resolution picked from the visible time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
    SecMillis,  // 15.250
}

/// Determines the best date format based on the visible time range (in seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else if visible_range_sec > 5.0 {
        SmartDateFormat::HourMinSec
    } else {
        SmartDateFormat::SecMillis
    }
}

fn to_datetime(value: f64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let nanos_per_unit = match unit {
        TimeUnit::Seconds => 1e9,
        TimeUnit::Milliseconds => 1e6,
        TimeUnit::Microseconds => 1e3,
        TimeUnit::Nanoseconds => 1.0,
    };
    let total_nanos = value * nanos_per_unit;
    if !total_nanos.is_finite() {
        return None;
    }
    let secs = (total_nanos / 1e9).floor();
    let subsec = (total_nanos - secs * 1e9).clamp(0.0, 999_999_999.0);
    DateTime::from_timestamp(secs as i64, subsec as u32)
}

/// Formats a timestamp according to the specified format and unit.
/// Values outside chrono's range fall back to plain numbers.
pub fn format_timestamp(value: f64, format: SmartDateFormat, unit: TimeUnit) -> String {
    let Some(dt) = to_datetime(value, unit) else {
        return format!("{:.2}", value);
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
        SmartDateFormat::SecMillis => dt.format("%S%.3f").to_string(),
    }
}
