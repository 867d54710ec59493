use crate::errors::{AppError, AppResult};
use crate::models::StopPolicy;
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub stop_policy: StopPolicy,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_tick_interval() -> u64 {
    10
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            tick_interval_ms: default_tick_interval(),
            stop_policy: StopPolicy::default(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("obslogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".obslogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("obslogger.conf")
    }

    /// Return the full path of the SQLite session store
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("obslogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found or unreadable
    pub fn load() -> Self {
        let path = Self::config_file();
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        let cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        if cfg.tick_interval_ms == 0 {
            return Err(AppError::Config("tick_interval_ms must be > 0".into()));
        }
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve a `--db` value: `~` is expanded, relative names land in the
    /// configuration directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Create the configuration directory and file.
    /// Returns the resolved database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(name),
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(db_path)
    }
}
