use rusqlite::{types::Value, Connection};
use timetable_core::{parse_date_time, parse_time_of_day, DatabaseConfig};
use tracing::{debug, info, instrument, warn};

use crate::db::{self, DATE_TIME_FORMAT, TIME_FORMAT};
use crate::error::{ConnectionError, Result};
use crate::types::LessonRecord;

/// CRUD façade over the `lessons` table.
///
/// Holds only the connection settings. Each operation opens its own
/// connection and drops it before returning, so every statement runs in its
/// own implicit transaction and nothing stays open between user actions.
#[derive(Debug, Clone)]
pub struct LessonStore {
    config: DatabaseConfig,
}

impl LessonStore {
    /// Probe storage once and return a store bound to `config`.
    ///
    /// Fails with [`ConnectionError`] when the database cannot be opened;
    /// callers must not retry and should continue without persistence.
    pub fn open(config: DatabaseConfig) -> std::result::Result<Self, ConnectionError> {
        let store = Self { config };
        store.connect()?;
        info!(path = %store.config.path, "lesson store ready");
        Ok(store)
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Acquire a connection scoped to the caller.
    pub fn connect(&self) -> std::result::Result<Connection, ConnectionError> {
        db::connect(&self.config)
    }

    /// Read every lesson in insertion order.
    ///
    /// Rows whose name, time or date columns are not well-formed are skipped
    /// with a warning; only connection and query failures are errors.
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<LessonRecord>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT rowid, name_lesson, times, days FROM lessons ORDER BY rowid")?;
        let rows: Vec<(i64, Value, Value, Value)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,   // rowid
                    row.get::<_, Value>(1)?, // name_lesson
                    row.get::<_, Value>(2)?, // times
                    row.get::<_, Value>(3)?, // days
                ))
            })?
            .collect::<rusqlite::Result<_>>()?;

        let total = rows.len();
        let lessons: Vec<LessonRecord> = rows
            .into_iter()
            .filter_map(|(rowid, name, times, days)| match decode_row(name, times, days) {
                Ok(rec) => Some(rec),
                Err(reason) => {
                    warn!(rowid, %reason, "skipping invalid lesson row");
                    None
                }
            })
            .collect();

        debug!(total, loaded = lessons.len(), "lessons listed");
        Ok(lessons)
    }

    /// Persist one lesson as three independent columns.
    #[instrument(skip(self, record), fields(name = %record.name))]
    pub fn insert(&self, record: &LessonRecord) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO lessons (name_lesson, times, days) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                record.name,
                record.time_of_day.format(TIME_FORMAT).to_string(),
                record.occurs_on.format(DATE_TIME_FORMAT).to_string(),
            ],
        )?;
        info!("lesson added");
        Ok(())
    }

    /// Delete every row whose name matches exactly. Returns the number of
    /// rows removed; zero matches is not an error.
    #[instrument(skip(self))]
    pub fn delete_by_name(&self, name: &str) -> Result<usize> {
        let conn = self.connect()?;
        let n = conn.execute(
            "DELETE FROM lessons WHERE name_lesson = ?1",
            rusqlite::params![name],
        )?;
        info!(rows = n, "lessons removed");
        Ok(n)
    }
}

/// Turn raw column values into a record, or explain why the row is unusable.
fn decode_row(name: Value, times: Value, days: Value) -> std::result::Result<LessonRecord, String> {
    let name = match name {
        Value::Text(s) if !s.trim().is_empty() => s,
        other => return Err(format!("bad name_lesson: {other:?}")),
    };
    let time_of_day = match &times {
        Value::Text(s) => parse_time_of_day(s),
        _ => None,
    }
    .ok_or_else(|| format!("bad times: {times:?}"))?;
    let occurs_on = match &days {
        Value::Text(s) => parse_date_time(s),
        _ => None,
    }
    .ok_or_else(|| format!("bad days: {days:?}"))?;

    LessonRecord::new(name, time_of_day, occurs_on).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn decode_accepts_stored_formats() {
        let rec = decode_row(text("Math"), text("09:00:00"), text("2024-06-03 09:00:00")).unwrap();
        assert_eq!(rec.name, "Math");
        assert_eq!(rec.time_of_day.to_string(), "09:00:00");
    }

    #[test]
    fn decode_rejects_non_text_columns() {
        assert!(decode_row(text("Math"), Value::Integer(900), text("2024-06-03 09:00:00")).is_err());
        assert!(decode_row(text("Math"), text("09:00:00"), Value::Null).is_err());
        assert!(decode_row(Value::Null, text("09:00:00"), text("2024-06-03 09:00:00")).is_err());
    }

    #[test]
    fn decode_rejects_garbage_text() {
        let err = decode_row(text("Math"), text("nine-ish"), text("2024-06-03 09:00:00")).unwrap_err();
        assert!(err.contains("bad times"));
    }
}
