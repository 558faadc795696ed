use std::time::Duration;

use rusqlite::Connection;
use timetable_core::DatabaseConfig;
use tracing::debug;

use crate::error::ConnectionError;

/// Storage format of the `times` column.
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Storage format of the `days` column.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Initialise the lessons table.
///
/// Safe to call on every connect — uses `IF NOT EXISTS`. Columns are plain
/// TEXT (no STRICT) because other writers may store anything; decoding in
/// the store decides what is well-formed.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS lessons (
            name_lesson TEXT,
            times       TEXT,   -- HH:MM:SS
            days        TEXT    -- YYYY-MM-DD HH:MM:SS
        );",
    )
}

/// Open a short-lived connection described by `config`.
///
/// The connection is released when the returned value is dropped; there is
/// no shared long-lived handle.
pub fn connect(config: &DatabaseConfig) -> Result<Connection, ConnectionError> {
    let wrap = |source| ConnectionError {
        path: config.path.clone(),
        source,
    };
    let conn = Connection::open(&config.path).map_err(wrap)?;
    conn.busy_timeout(Duration::from_millis(config.timeout))
        .map_err(wrap)?;
    init_db(&conn).map_err(wrap)?;
    debug!(path = %config.path, "lesson database connection opened");
    Ok(conn)
}
