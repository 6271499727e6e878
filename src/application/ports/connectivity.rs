use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

/// Reports the device's connectivity and broadcasts transitions. The engine
/// subscribes and starts a sync pass on every transition to online.
pub trait ConnectivityMonitor: Send + Sync {
    fn is_online(&self) -> bool;
    fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent>;
}
