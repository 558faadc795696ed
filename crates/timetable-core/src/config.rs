use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Busy timeout applied to every SQLite connection, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Top-level config (timetable.toml + TIMETABLE_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Where lessons are persisted.
///
/// Every store operation opens its own connection from these settings, so
/// the struct is cheap to clone and carries no open handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    /// SQLite busy timeout in milliseconds.
    /// Override with env var: TIMETABLE_DATABASE_TIMEOUT=10000
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl DatabaseConfig {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            timeout: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::at(default_db_path())
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.timetable/timetable.db", home)
}

impl TimetableConfig {
    /// Load config from a TOML file with TIMETABLE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.timetable/timetable.toml
    ///
    /// A missing file is not an error; every key has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: TimetableConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("TIMETABLE_").split("_"))
            .extract()
            .map_err(|e| crate::error::TimetableError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.timetable/timetable.toml", home)
}
