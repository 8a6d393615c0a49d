use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReadlistError, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "READLIST_CONFIG";

/// Environment variable overriding the database path
pub const DB_ENV: &str = "READLIST_DB";

/// Default database file name inside the data directory
pub const DEFAULT_DB_FILE: &str = "readinglist.db";

/// Default log file name for the list screen
pub const DEFAULT_LOG_FILE: &str = "readlist.log";

/// Configuration loaded from ~/.readlist/config.toml
///
/// Every key is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadlistConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file (default: ~/.readlist/readinglist.db)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "info", "readlist_core=debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Where the list screen writes its log (default: ~/.readlist/readlist.log)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl ReadlistConfig {
    /// Load config from an explicit path, `READLIST_CONFIG`, or ~/.readlist/config.toml
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if !path.exists() {
            // An explicitly requested file must exist
            if explicit.is_some() {
                return Err(ReadlistError::config(&path, "file does not exist"));
            }
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Parse a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ReadlistError::config(path, e.to_string()))
    }

    /// Config file path: $READLIST_CONFIG or ~/.readlist/config.toml
    pub fn config_path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("config.toml"))
    }

    /// Resolve the database path: explicit flag, `READLIST_DB`, config file, default
    pub fn database_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(DB_ENV).map(PathBuf::from))
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(|| data_dir().join(DEFAULT_DB_FILE))
    }

    /// Log file for the list screen
    pub fn log_path(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| data_dir().join(DEFAULT_LOG_FILE))
    }

    /// Render as TOML (for `readlist config show`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ReadlistError::config(Self::config_path(), e.to_string()))
    }
}

/// Data directory: ~/.readlist (falls back to ./.readlist without a home dir)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".readlist")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[database]
path = "/tmp/books.db"

[log]
level = "debug"
file = "/tmp/readlist.log"
"#,
        )
        .unwrap();

        let cfg = ReadlistConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.database.path, Some(PathBuf::from("/tmp/books.db")));
        assert_eq!(cfg.log.level.as_deref(), Some("debug"));
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/readlist.log"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"warn\"\n").unwrap();

        let cfg = ReadlistConfig::load_from(&path).unwrap();
        assert_eq!(cfg.database, DatabaseConfig::default());
        assert!(cfg.log_path().ends_with(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = ReadlistConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ReadlistError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database\npath = 3").unwrap();

        let err = ReadlistConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let cfg = ReadlistConfig {
            database: DatabaseConfig {
                path: Some(PathBuf::from("/from/config.db")),
            },
            ..Default::default()
        };
        let flag = PathBuf::from("/from/flag.db");
        assert_eq!(cfg.database_path(Some(&flag)), flag);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let cfg = ReadlistConfig {
            log: LogConfig {
                level: Some("info".into()),
                file: None,
            },
            ..Default::default()
        };
        let text = cfg.to_toml().unwrap();
        let parsed: ReadlistConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }
}
