use crate::application::ports::connectivity::{ConnectivityEvent, ConnectivityMonitor};
use crate::application::ports::repositories::Repository;
use crate::application::ports::transport::RecordTransport;
use crate::application::services::{
    ConsentService, RecordService, StatusPublisher, SyncService, SyncStatus,
};
use crate::infrastructure::database::{Database, DbPool, SqliteRepository};
use crate::shared::config::AppConfig;
use crate::shared::error::{Result, SyncError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// The engine owns the store handle, the services, and the background tasks
/// for one application session. Construct it once at startup and share it by
/// reference; there is no teardown beyond process exit.
pub struct SyncEngine {
    pool: DbPool,
    consent: Arc<ConsentService>,
    records: Arc<RecordService>,
    sync: Arc<SyncService>,
    status: StatusPublisher,
}

impl SyncEngine {
    /// Open the local store, wire the services, start the connectivity
    /// listener and tickers, and, when already online, kick off the startup
    /// sync pass.
    pub async fn start(
        config: AppConfig,
        transport: Arc<dyn RecordTransport>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Result<Self> {
        config.validate().map_err(SyncError::InvalidInput)?;

        let pool = Database::initialize(&config.database).await?;
        let store: Arc<dyn Repository> = Arc::new(SqliteRepository::new(pool.clone()));

        let status = StatusPublisher::new();
        let consent = Arc::new(ConsentService::new(store.clone()));
        let records = Arc::new(RecordService::new(
            store.clone(),
            consent.clone(),
            status.clone(),
        ));
        let sync = Arc::new(SyncService::new(
            store,
            transport,
            connectivity.clone(),
            status.clone(),
            config.sync.clone(),
        ));

        Self::spawn_connectivity_listener(sync.clone(), connectivity.clone());
        Self::spawn_status_ticker(sync.clone(), config.sync.status_refresh_interval);
        if config.sync.auto_sync {
            Self::spawn_auto_sync(sync.clone(), connectivity.clone(), config.sync.sync_interval);
        }

        sync.refresh_status().await;

        if connectivity.is_online() {
            info!(target: "engine", "online at startup, scheduling initial sync pass");
            sync.trigger();
        }

        Ok(Self {
            pool,
            consent,
            records,
            sync,
            status,
        })
    }

    pub fn consent(&self) -> &ConsentService {
        &self.consent
    }

    pub fn records(&self) -> &RecordService {
        &self.records
    }

    pub fn sync(&self) -> &SyncService {
        &self.sync
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    pub fn current_status(&self) -> SyncStatus {
        self.status.current()
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn spawn_connectivity_listener(
        sync: Arc<SyncService>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) {
        let mut events = connectivity.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(ConnectivityEvent::Online) => {
                        info!(target: "engine", "connectivity restored, scheduling sync pass");
                        sync.trigger();
                    }
                    Ok(ConnectivityEvent::Offline) => {
                        info!(target: "engine", "connectivity lost");
                    }
                    // Skipped events only mean we coalesced transitions.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    fn spawn_status_ticker(sync: Arc<SyncService>, interval_secs: u64) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.tick().await; // immediate first tick
            loop {
                interval.tick().await;
                sync.refresh_status().await;
            }
        });
    }

    fn spawn_auto_sync(
        sync: Arc<SyncService>,
        connectivity: Arc<dyn ConnectivityMonitor>,
        interval_secs: u64,
    ) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.tick().await;
            loop {
                interval.tick().await;
                if !connectivity.is_online() {
                    continue;
                }
                if let Err(err) = sync.run_pass().await {
                    error!(target: "engine", error = %err, "scheduled sync pass failed");
                }
            }
        });
    }
}
