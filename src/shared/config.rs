use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    /// Interval between automatic sync passes, in seconds.
    pub sync_interval: u64,
    /// Interval between status recomputations, in seconds.
    pub status_refresh_interval: u64,
    /// Upload attempts per record before the retry queue stops retrying it.
    pub max_attempts: u32,
    /// Minimum seconds between retries of the same record.
    pub min_backoff: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database: DatabaseConfig {
                url: format!("sqlite:{}/carevista.db", data_dir.display()),
                max_connections: 5,
                connection_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 300, // 5 minutes
                status_refresh_interval: 10,
                max_attempts: 5,
                min_backoff: 30,
            },
            storage: StorageConfig {
                data_dir: data_dir.display().to_string(),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("carevista"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("CAREVISTA_DATA_DIR") {
            if !v.trim().is_empty() {
                cfg.storage.data_dir = v.trim().to_string();
                cfg.database.url = format!("sqlite:{}/carevista.db", cfg.storage.data_dir);
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_DB_MAX_CONNECTIONS") {
            if let Some(value) = parse_u32(&v) {
                cfg.database.max_connections = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("CAREVISTA_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_STATUS_REFRESH_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.status_refresh_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_MAX_SYNC_ATTEMPTS") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.max_attempts = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("CAREVISTA_RETRY_BACKOFF_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.min_backoff = value;
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.sync.max_attempts == 0 {
            return Err("Sync max_attempts must be greater than 0".to_string());
        }
        if self.sync.status_refresh_interval == 0 {
            return Err("Sync status_refresh_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_attempts_rejected() {
        let mut cfg = AppConfig::default();
        cfg.sync.max_attempts = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parse_bool_falls_back_on_garbage() {
        assert!(parse_bool("yes", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("banana", true));
    }
}
