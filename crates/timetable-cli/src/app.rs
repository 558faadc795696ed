use chrono::{NaiveDateTime, NaiveTime, Weekday};
use timetable_core::{Bucket, DatabaseConfig};
use timetable_lessons::{LessonRecord, LessonStore, TimetableGrid};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Critical,
}

/// A user-facing message raised by an action. The front end decides how to
/// show it; the action has already completed or been abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
}

/// Session state: the optional store and the grid it projects into.
///
/// `store` is `None` when storage was unreachable at startup. The session
/// keeps running with an empty grid and every write is refused.
pub struct App {
    store: Option<LessonStore>,
    grid: TimetableGrid,
    alerts: Vec<Alert>,
}

impl App {
    /// Attempt one connection, then load the grid if it succeeded.
    pub fn start(config: DatabaseConfig) -> Self {
        let mut app = Self {
            store: None,
            grid: TimetableGrid::new(),
            alerts: Vec::new(),
        };
        match LessonStore::open(config) {
            Ok(store) => {
                app.store = Some(store);
                app.load();
            }
            Err(e) => app.alert(
                Severity::Critical,
                "Database Error",
                format!("Error connecting to database: {e}"),
            ),
        }
        app
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn grid(&self) -> &TimetableGrid {
        &self.grid
    }

    /// Rebuild the grid from storage. Malformed rows are dropped by the store.
    pub fn load(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.list_all() {
            Ok(records) => {
                let mut grid = TimetableGrid::new();
                for rec in &records {
                    if let Some(prev) = grid.place(rec) {
                        warn!(cell = ?rec.cell(), %prev, name = %rec.name, "cell already occupied, showing later lesson");
                    }
                }
                info!(lessons = records.len(), cells = grid.occupied(), "grid loaded");
                self.grid = grid;
            }
            Err(e) => self.alert(
                Severity::Warning,
                "Database Error",
                format!("Error loading lessons: {e}"),
            ),
        }
    }

    /// Every stored lesson, or nothing when storage is unavailable.
    pub fn lessons(&mut self) -> Vec<LessonRecord> {
        let Some(store) = &self.store else {
            self.not_connected();
            return Vec::new();
        };
        match store.list_all() {
            Ok(records) => records,
            Err(e) => {
                self.alert(
                    Severity::Warning,
                    "Database Error",
                    format!("Error loading lessons: {e}"),
                );
                Vec::new()
            }
        }
    }

    /// Persist a lesson, then show it. The grid is only touched after the
    /// write succeeded. Returns whether the lesson was added.
    pub fn add(&mut self, name: &str, time_of_day: NaiveTime, occurs_on: NaiveDateTime) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.alert(Severity::Warning, "Warning", "Please enter a lesson name.".to_string());
            return false;
        }
        let record = match LessonRecord::new(name, time_of_day, occurs_on) {
            Ok(r) => r,
            Err(e) => {
                self.alert(Severity::Warning, "Warning", e.to_string());
                return false;
            }
        };
        if !record.is_consistent() {
            warn!(
                time = %record.time_of_day,
                at = %record.occurs_on,
                "time of day differs from the lesson date-time; timeslot follows the time of day"
            );
        }
        let Some(store) = &self.store else {
            self.not_connected();
            return false;
        };

        match store.insert(&record) {
            Ok(()) => {
                if let Some(prev) = self.grid.place(&record) {
                    warn!(%prev, name = %record.name, "cell already occupied, overwritten");
                }
                self.alert(
                    Severity::Information,
                    "Success",
                    "Lesson added successfully!".to_string(),
                );
                true
            }
            Err(e) => {
                self.alert(
                    Severity::Warning,
                    "Database Error",
                    format!("Error adding lesson: {e}"),
                );
                false
            }
        }
    }

    /// Delete the lesson shown in the selected cell.
    ///
    /// Every stored row with that name is deleted, but only the selected cell
    /// is cleared. Returns whether anything was removed.
    pub fn remove(&mut self, bucket: Bucket, weekday: Weekday) -> bool {
        let Some(name) = self.grid.get(bucket, weekday).map(str::to_owned) else {
            self.alert(
                Severity::Warning,
                "Warning",
                "Please select a cell to remove.".to_string(),
            );
            return false;
        };
        let Some(store) = &self.store else {
            self.not_connected();
            return false;
        };

        match store.delete_by_name(&name) {
            Ok(rows) => {
                self.grid.clear(bucket, weekday);
                if rows > 1 {
                    info!(%name, rows, "removed every lesson sharing this name");
                }
                self.alert(
                    Severity::Information,
                    "Success",
                    "Lesson removed successfully!".to_string(),
                );
                true
            }
            Err(e) => {
                self.alert(
                    Severity::Warning,
                    "Database Error",
                    format!("Error removing lesson: {e}"),
                );
                false
            }
        }
    }

    /// Hand pending alerts to the front end.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    fn not_connected(&mut self) {
        self.alert(
            Severity::Warning,
            "Database Error",
            "Not connected to the database.".to_string(),
        );
    }

    fn alert(&mut self, severity: Severity, title: &'static str, message: String) {
        match severity {
            Severity::Information => info!(%title, "{message}"),
            Severity::Warning => warn!(%title, "{message}"),
            Severity::Critical => error!(%title, "{message}"),
        }
        self.alerts.push(Alert {
            severity,
            title,
            message,
        });
    }
}
