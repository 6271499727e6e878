use crate::application::ports::connectivity::{ConnectivityEvent, ConnectivityMonitor};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Connectivity monitor driven by the embedding shell: the host application
/// observes the platform's online/offline signal and forwards transitions
/// here. Repeated reports of the same state are not re-broadcast.
pub struct ManualConnectivity {
    online: AtomicBool,
    events: broadcast::Sender<ConnectivityEvent>,
}

impl ManualConnectivity {
    pub fn new(initially_online: bool) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            online: AtomicBool::new(initially_online),
            events,
        }
    }

    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return;
        }
        let event = if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        };
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }
}

impl ConnectivityMonitor for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent> {
        self.events.subscribe()
    }
}
