use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Column headers of the grid, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Time-of-day formats accepted on input and when decoding stored rows.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Date-time formats accepted on input and when decoding stored rows.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One of the three daily timeslots a lesson can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Before 12:00.
    Morning,
    /// 12:00 up to (not including) 18:00.
    Afternoon,
    /// 18:00 onwards.
    Evening,
}

impl Bucket {
    /// All buckets in grid row order.
    pub const ALL: [Bucket; 3] = [Bucket::Morning, Bucket::Afternoon, Bucket::Evening];

    /// Classify a wall-clock time. Both cut points are half-open:
    /// 12:00 is Afternoon and 18:00 is Evening.
    pub fn classify(time: NaiveTime) -> Self {
        match time.hour() {
            0..=11 => Bucket::Morning,
            12..=17 => Bucket::Afternoon,
            _ => Bucket::Evening,
        }
    }

    /// Classify a textual time. Malformed input falls back to Morning.
    pub fn classify_str(raw: &str) -> Self {
        match parse_time_of_day(raw) {
            Some(time) => Self::classify(time),
            None => {
                warn!(input = %raw, "invalid time format, defaulting to morning");
                Bucket::Morning
            }
        }
    }

    /// Grid row index (Morning = 0).
    pub fn row(self) -> usize {
        match self {
            Bucket::Morning => 0,
            Bucket::Afternoon => 1,
            Bucket::Evening => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Morning => "Morning",
            Bucket::Afternoon => "Afternoon",
            Bucket::Evening => "Evening",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Bucket::Morning),
            "afternoon" => Ok(Bucket::Afternoon),
            "evening" => Ok(Bucket::Evening),
            other => Err(format!("unknown timeslot: {other}")),
        }
    }
}

/// Grid column index for a weekday (Monday = 0 … Sunday = 6).
pub fn weekday_column(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Parse `HH:MM` or `HH:MM:SS[.f]`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// Parse `YYYY-MM-DD HH:MM[:SS[.f]]`, with either a space or `T` separator.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn classify_boundaries_are_half_open() {
        assert_eq!(Bucket::classify(hm(11, 59)), Bucket::Morning);
        assert_eq!(Bucket::classify(hm(12, 0)), Bucket::Afternoon);
        assert_eq!(Bucket::classify(hm(17, 59)), Bucket::Afternoon);
        assert_eq!(Bucket::classify(hm(18, 0)), Bucket::Evening);
    }

    #[test]
    fn classify_extremes() {
        assert_eq!(Bucket::classify(hm(0, 0)), Bucket::Morning);
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Bucket::classify(last), Bucket::Evening);
    }

    #[test]
    fn classify_just_before_six_pm_with_seconds() {
        let t = NaiveTime::from_hms_opt(17, 59, 59).unwrap();
        assert_eq!(Bucket::classify(t), Bucket::Afternoon);
    }

    #[test]
    fn classify_str_accepts_both_formats() {
        assert_eq!(Bucket::classify_str("09:00"), Bucket::Morning);
        assert_eq!(Bucket::classify_str("13:30:00"), Bucket::Afternoon);
        assert_eq!(Bucket::classify_str(" 19:15 "), Bucket::Evening);
    }

    #[test]
    fn classify_str_malformed_defaults_to_morning() {
        assert_eq!(Bucket::classify_str("not a time"), Bucket::Morning);
        assert_eq!(Bucket::classify_str("25:00"), Bucket::Morning);
        assert_eq!(Bucket::classify_str(""), Bucket::Morning);
    }

    #[test]
    fn bucket_rows_follow_all_order() {
        for (i, b) in Bucket::ALL.iter().enumerate() {
            assert_eq!(b.row(), i);
        }
    }

    #[test]
    fn bucket_from_str_is_case_insensitive() {
        assert_eq!("Evening".parse::<Bucket>().unwrap(), Bucket::Evening);
        assert_eq!("AFTERNOON".parse::<Bucket>().unwrap(), Bucket::Afternoon);
        assert!("noon".parse::<Bucket>().is_err());
    }

    #[test]
    fn weekday_columns_start_on_monday() {
        assert_eq!(weekday_column(Weekday::Mon), 0);
        assert_eq!(weekday_column(Weekday::Sun), 6);
        assert_eq!(WEEKDAY_LABELS[weekday_column(Weekday::Wed)], "Wednesday");
    }

    #[test]
    fn parse_date_time_variants() {
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_date_time("2024-06-03 09:00"), Some(expected));
        assert_eq!(parse_date_time("2024-06-03 09:00:00"), Some(expected));
        assert_eq!(parse_date_time("2024-06-03T09:00:00"), Some(expected));
        assert_eq!(parse_date_time("June 3rd"), None);
    }
}
