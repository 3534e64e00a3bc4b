//! Timestamp parsing and calendar helpers.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a feed timestamp into an instant.
///
/// Accepts RFC 3339 strings with a `Z` or numeric offset, with or without
/// fractional seconds. Anything else yields `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// The first instant of `now`'s calendar day in `now`'s time zone.
///
/// When local midnight does not exist (a DST gap at 00:00) the day starts at
/// the first local minute after it that does.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let zone = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    (0..MINUTES_PER_DAY)
        .map(|minutes| midnight + Duration::minutes(minutes))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        // Unreachable for real zones: `now` itself is a valid local time.
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// The first instant of the hour containing `now`, in `now`'s time zone.
pub fn start_of_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let utc = now.with_timezone(&Utc);
    let into_hour = now
        .time()
        .signed_duration_since(NaiveTime::MIN)
        .num_nanoseconds()
        .map(|nanos| nanos % 3_600_000_000_000)
        .unwrap_or(0);
    utc - Duration::nanoseconds(into_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Timelike};
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn test_parse_utc_designator() {
        let parsed = parse_timestamp("2025-07-31T14:30:00Z").unwrap();
        assert_eq!(parsed.hour(), 14);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse_timestamp("2025-07-31T14:30:00.123456Z").unwrap();
        assert_eq!(parsed.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_offset_normalizes_to_utc() {
        let parsed = parse_timestamp("2025-07-31T16:30:00+02:00").unwrap();
        assert_eq!(parsed, parse_timestamp("2025-07-31T14:30:00Z").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2025-07-31").is_none());
    }

    #[test]
    fn test_start_of_day_uses_zone() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2025, 7, 31, 1, 15, 0).unwrap();
        // 00:00 at +02:00 is 22:00 UTC on the previous day.
        assert_eq!(
            start_of_day(&now),
            parse_timestamp("2025-07-30T22:00:00Z").unwrap()
        );
    }

    #[test]
    fn test_start_of_day_skips_dst_gap_at_midnight() {
        // Sao Paulo jumped from 00:00 -03:00 to 01:00 -02:00 on 2018-11-04.
        let now = Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 8, 0, 0).unwrap();
        let start = start_of_day(&now);

        assert_eq!(start, parse_timestamp("2018-11-04T03:00:00Z").unwrap());
        let local = start.with_timezone(&Sao_Paulo);
        assert_eq!((local.day(), local.hour(), local.minute()), (4, 1, 0));
    }

    #[test]
    fn test_start_of_day_on_regular_zone_day() {
        let now = Sao_Paulo.with_ymd_and_hms(2018, 11, 5, 8, 0, 0).unwrap();
        assert_eq!(
            start_of_day(&now),
            parse_timestamp("2018-11-05T02:00:00Z").unwrap()
        );
    }

    #[test]
    fn test_start_of_hour() {
        let zone = FixedOffset::west_opt(5 * 3600 + 1800).unwrap();
        let now = zone.with_ymd_and_hms(2025, 7, 31, 9, 47, 12).unwrap();
        let start = start_of_hour(&now).with_timezone(&zone);
        assert_eq!((start.hour(), start.minute(), start.second()), (9, 0, 0));
    }
}
