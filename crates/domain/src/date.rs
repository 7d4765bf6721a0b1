use chrono::prelude::*;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Truncates a timestamp in millis to midnight UTC of the same day.
///
/// This is the day-bucket used when matching submissions against
/// existing `ScheduledEvent`s.
pub fn start_of_utc_day(ts: i64) -> i64 {
    ts.div_euclid(MILLIS_PER_DAY) * MILLIS_PER_DAY
}

/// Last millisecond (23:59:59.999 UTC) of the day `ts` falls on
pub fn end_of_utc_day(ts: i64) -> i64 {
    start_of_utc_day(ts) + MILLIS_PER_DAY - 1
}

pub fn is_same_utc_day(ts1: i64, ts2: i64) -> bool {
    start_of_utc_day(ts1) == start_of_utc_day(ts2)
}

pub fn format_datetime(ts: i64) -> String {
    match Utc.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => String::from("[No scheduled time]"),
    }
}

/// Parses the datetime formats sent by form providers.
///
/// RFC3339 strings keep their offset, naive datetimes like `2025-07-30T15:00`
/// are interpreted as UTC.
pub fn parse_datetime(datestr: &str) -> Option<i64> {
    let datestr = datestr.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(datestr) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(datestr, format) {
            return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(datestr, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
}

#[cfg(test)]
mod test {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn it_truncates_to_utc_midnight() {
        let afternoon = ts(2025, 7, 30, 15, 0, 0);
        assert_eq!(start_of_utc_day(afternoon), ts(2025, 7, 30, 0, 0, 0));
        assert_eq!(start_of_utc_day(ts(2025, 7, 30, 0, 0, 0)), ts(2025, 7, 30, 0, 0, 0));
        assert_eq!(end_of_utc_day(afternoon), ts(2025, 7, 30, 23, 59, 59) + 999);
    }

    #[test]
    fn it_truncates_timestamps_before_epoch() {
        let before_epoch = ts(1969, 12, 31, 12, 0, 0);
        assert_eq!(start_of_utc_day(before_epoch), ts(1969, 12, 31, 0, 0, 0));
    }

    #[test]
    fn it_compares_days() {
        assert!(is_same_utc_day(
            ts(2025, 7, 30, 0, 0, 0),
            ts(2025, 7, 30, 23, 59, 59)
        ));
        assert!(!is_same_utc_day(
            ts(2025, 7, 30, 23, 59, 59),
            ts(2025, 7, 31, 0, 0, 0)
        ));
    }

    #[test]
    fn it_parses_form_datetimes() {
        let expected = ts(2025, 7, 30, 15, 0, 0);
        assert_eq!(parse_datetime("2025-07-30T15:00"), Some(expected));
        assert_eq!(parse_datetime("2025-07-30T15:00:00"), Some(expected));
        assert_eq!(parse_datetime("2025-07-30T15:00:00Z"), Some(expected));
        assert_eq!(parse_datetime("2025-07-30T17:00:00+02:00"), Some(expected));
        assert_eq!(parse_datetime(" 2025-07-30 15:00 "), Some(expected));
        assert_eq!(parse_datetime("2025-07-30"), Some(ts(2025, 7, 30, 0, 0, 0)));
    }

    #[test]
    fn it_rejects_invalid_datetimes() {
        for datestr in ["", "tomorrow", "2025-13-01T10:00", "2025-02-30"] {
            assert!(parse_datetime(datestr).is_none());
        }
    }
}
