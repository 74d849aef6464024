use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use super::counter::UnreadCounter;
use crate::api::NotificationBackend;

/// Background unread-count refresh for a dashboard top bar
///
/// The first poll runs immediately, then once per interval. Dropping the
/// poller stops it.
pub struct UnreadPoller {
    handle: JoinHandle<()>,
}

impl UnreadPoller {
    pub fn spawn(
        backend: Arc<dyn NotificationBackend>,
        counter: UnreadCounter,
        interval: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match backend.unread_count().await {
                    Ok(count) => {
                        debug!("Polled unread count: {}", count);
                        counter.set(count);
                    }
                    Err(e) => warn!("Unread count poll failed: {}", e),
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for UnreadPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::MockNotificationBackend;
    use crate::error::ApiError;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[tokio::test]
    async fn test_poller_publishes_counts_and_survives_errors() {
        // given: first poll fails, later polls return a growing count
        let calls = Arc::new(AtomicU64::new(0));
        let seen = calls.clone();
        let mut backend = MockNotificationBackend::new();
        backend.expect_unread_count().returning(move || {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(ApiError::Status {
                    path: "/admin/notifications/unread/count".to_string(),
                    status: 503,
                    body: String::new(),
                })
            } else {
                Ok(n)
            }
        });
        let counter = UnreadCounter::default();
        let mut rx = counter.subscribe();

        // when
        let poller = UnreadPoller::spawn(Arc::new(backend), counter.clone(), Duration::from_millis(10));

        // then: a count arrives after the failed first poll
        time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("poller never published")
            .unwrap();
        assert!(*rx.borrow() >= 1);
        assert!(poller.is_running());
    }

    #[tokio::test]
    async fn test_drop_stops_polling() {
        let calls = Arc::new(AtomicU64::new(0));
        let seen = calls.clone();
        let mut backend = MockNotificationBackend::new();
        backend.expect_unread_count().returning(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });

        let poller = UnreadPoller::spawn(
            Arc::new(backend),
            UnreadCounter::default(),
            Duration::from_millis(5),
        );
        time::sleep(Duration::from_millis(30)).await;
        drop(poller);
        time::sleep(Duration::from_millis(10)).await;

        let after_drop = calls.load(Ordering::SeqCst);
        time::sleep(Duration::from_millis(40)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_drop);
        assert!(after_drop >= 1);
    }
}
