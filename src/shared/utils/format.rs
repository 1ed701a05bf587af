//! Display formatting shared by the list and the bubbles

use chrono::{DateTime, Local, TimeZone, Utc};

/// `HH:MM` in the browser's local time zone
pub fn format_time_of_day(timestamp: &DateTime<Utc>) -> String {
    format_time_in(timestamp, &Local)
}

pub fn format_time_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(zone).format("%H:%M").to_string()
}

/// List entries without any message show no time
pub fn format_optional_time(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map(format_time_of_day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ts(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_format_time_in_zone() {
        let at = ts("2024-05-01T21:07:59Z");
        assert_eq!(format_time_in(&at, &Utc), "21:07");

        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_time_in(&at, &ist), "02:37");
    }

    #[test]
    fn test_format_optional_time() {
        assert_eq!(format_optional_time(None), "");
        assert_eq!(format_optional_time(Some(&ts("2024-05-01T10:00:00Z"))).len(), 5);
    }
}
