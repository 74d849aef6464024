use std::sync::Arc;

use tokio::sync::watch;

/// Shared unread-notification count
///
/// Cloned into the notification center, the poller and any top bar that
/// wants to show the unread dot. Subscribers see every change.
#[derive(Debug, Clone)]
pub struct UnreadCounter {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for UnreadCounter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl UnreadCounter {
    pub fn new(initial: u64) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn set(&self, count: u64) {
        self.tx.send_if_modified(|current| {
            if *current == count {
                return false;
            }
            *current = count;
            true
        });
    }

    pub fn increment(&self) {
        self.tx.send_modify(|current| *current += 1);
    }

    pub fn decrement(&self) {
        self.tx.send_if_modified(|current| {
            if *current == 0 {
                return false;
            }
            *current -= 1;
            true
        });
    }

    pub fn clear(&self) {
        self.set(0);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}
