use crate::shared::config::DatabaseConfig;
use crate::shared::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub type DbPool = Pool<Sqlite>;

pub struct Database;

impl Database {
    /// Open (creating if missing) the local store and bring the schema up to
    /// date. Called once per session by the engine; the pool it returns is
    /// the shared handle every repository uses.
    pub async fn initialize(config: &DatabaseConfig) -> Result<DbPool> {
        if let Some(parent) = db_file_parent(&config.url) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Database connected: {}", config.url);

        Self::run_migrations(&pool).await?;

        Ok(pool)
    }

    pub async fn run_migrations(pool: &DbPool) -> Result<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations completed");
        Ok(())
    }
}

fn db_file_parent(url: &str) -> Option<&Path> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.starts_with(':') {
        return None; // :memory:
    }
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_creates_file_and_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
            connection_timeout: 5,
        };

        let pool = Database::initialize(&config).await.unwrap();
        assert!(db_path.exists());

        let table_check =
            sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name='recordings'")
                .fetch_optional(&pool)
                .await
                .unwrap();
        assert!(table_check.is_some());

        pool.close().await;
    }

    #[test]
    fn memory_url_has_no_parent() {
        assert!(db_file_parent("sqlite::memory:").is_none());
    }

    #[test]
    fn file_url_parent_extracted() {
        let parent = db_file_parent("sqlite://data/carevista.db?mode=rwc").unwrap();
        assert_eq!(parent, Path::new("data"));
    }
}
