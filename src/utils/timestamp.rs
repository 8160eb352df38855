use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// First and last calendar days accepted, as (year, month, day). Dates
/// outside this window count as missing.
const EARLIEST_DATE: (i32, u32, u32) = (1677, 9, 21);
const LATEST_DATE: (i32, u32, u32) = (2262, 4, 11);

/// Coerce a cell to a timestamp. Returns `None` when nothing matches or the
/// date falls outside 1677-09-21..=2262-04-11.
///
/// Values carrying a UTC offset keep their wall-clock time in that offset,
/// so day buckets follow the timestamp's own calendar.
///
/// # Examples
/// ```
/// use energy_dashboard::utils::parse_timestamp;
///
/// let ts = parse_timestamp("2024-01-01T06:30:00+02:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-01 06:30:00");
/// assert!(parse_timestamp("not-a-date").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_any_format(raw.trim()).filter(in_supported_range)
}

fn in_supported_range(timestamp: &NaiveDateTime) -> bool {
    let date = timestamp.date();
    (EARLIEST_DATE..=LATEST_DATE).contains(&(date.year(), date.month(), date.day()))
}

fn parse_any_format(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Coerce a cell to a finite number. NaN and infinities count as missing.
pub fn parse_kwh(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
