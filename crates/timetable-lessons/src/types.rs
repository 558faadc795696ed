use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use timetable_core::Bucket;

use crate::error::{Result, StoreError};

/// One scheduled study session as persisted in the `lessons` table.
///
/// The time-of-day and the date-time are stored as independent columns.
/// The bucket comes from `time_of_day`, the weekday from `occurs_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Lesson label shown in the grid. Never empty.
    pub name: String,
    /// Wall-clock time the lesson starts.
    pub time_of_day: NaiveTime,
    /// Absolute date-time the lesson occurs on.
    pub occurs_on: NaiveDateTime,
}

impl LessonRecord {
    /// Build a record, rejecting blank names. Sub-second precision is
    /// dropped because storage keeps whole seconds.
    pub fn new(
        name: impl Into<String>,
        time_of_day: NaiveTime,
        occurs_on: NaiveDateTime,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidRecord(
                "lesson name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            time_of_day: time_of_day.with_nanosecond(0).unwrap_or(time_of_day),
            occurs_on: occurs_on.with_nanosecond(0).unwrap_or(occurs_on),
        })
    }

    /// Timeslot row for this lesson.
    pub fn bucket(&self) -> Bucket {
        Bucket::classify(self.time_of_day)
    }

    pub fn weekday(&self) -> Weekday {
        self.occurs_on.weekday()
    }

    /// Grid coordinate this lesson is displayed in.
    pub fn cell(&self) -> (Bucket, Weekday) {
        (self.bucket(), self.weekday())
    }

    /// True when `time_of_day` matches the time part of `occurs_on` to the minute.
    pub fn is_consistent(&self) -> bool {
        let t = self.occurs_on.time();
        t.hour() == self.time_of_day.hour() && t.minute() == self.time_of_day.minute()
    }
}
