//! `timetable-lessons` — lesson persistence and the weekly grid projection.
//!
//! # Overview
//!
//! Lessons live in a single SQLite `lessons` table. [`store::LessonStore`]
//! lists, inserts and deletes rows, opening a fresh connection for every
//! operation. [`grid::TimetableGrid`] is the 3×7 view rebuilt from those rows.
//!
//! | Column        | Stored as             | Used for         |
//! |---------------|-----------------------|------------------|
//! | `name_lesson` | TEXT                  | cell label       |
//! | `times`       | `HH:MM:SS`            | timeslot (row)   |
//! | `days`        | `YYYY-MM-DD HH:MM:SS` | weekday (column) |

pub mod db;
pub mod error;
pub mod grid;
pub mod store;
pub mod types;

pub use error::{ConnectionError, Result, StoreError};
pub use grid::{GridMatrix, TimetableGrid};
pub use store::LessonStore;
pub use types::LessonRecord;
