//! `timetable-core` — shared vocabulary for the weekly lesson timetable.
//!
//! Holds the timeslot classifier, weekday indexing, input parsing helpers
//! and the layered configuration used by every other crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DatabaseConfig, TimetableConfig};
pub use error::{Result, TimetableError};
pub use types::{parse_date_time, parse_time_of_day, weekday_column, Bucket, WEEKDAY_LABELS};
