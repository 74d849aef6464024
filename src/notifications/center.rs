//! Notification list with read-state synchronization.
//!
//! Read flags flip locally before the server confirms. When the confirming
//! request fails the flip is reverted and the unread count restored.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use super::counter::UnreadCounter;
use crate::api::NotificationBackend;
use crate::error::ApiError;
use crate::models::NotificationDetails;
use crate::pagination::{self, PageWindow};

pub const LOAD_FAILED: &str = "Failed to load notifications";

/// A notification opened for display and the outcome of its read update
#[derive(Debug)]
pub struct Opened {
    pub notification: NotificationDetails,
    pub synced: Result<(), ApiError>,
}

pub struct NotificationCenter {
    backend: Arc<dyn NotificationBackend>,
    counter: UnreadCounter,
    items: Vec<NotificationDetails>,
    new_ids: HashSet<i64>,
    page: usize,
    size: usize,
    error: Option<String>,
}

impl NotificationCenter {
    pub fn new(backend: Arc<dyn NotificationBackend>, counter: UnreadCounter, size: usize) -> Self {
        Self {
            backend,
            counter,
            items: Vec::new(),
            new_ids: HashSet::new(),
            page: 0,
            size: size.max(1),
            error: None,
        }
    }

    pub fn counter(&self) -> &UnreadCounter {
        &self.counter
    }

    pub fn items(&self) -> &[NotificationDetails] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch all and unread notifications together. Either failing fails both.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let fetched = tokio::try_join!(self.backend.all(), self.backend.unread());
        match fetched {
            Ok((all, unread)) => {
                self.new_ids = unread.iter().map(|n| n.id).collect();
                self.counter.set(unread.len() as u64);
                self.items = all;
                self.error = None;
                self.page = self.page.min(self.total_pages().saturating_sub(1));
                info!(
                    "Loaded {} notifications, {} unread",
                    self.items.len(),
                    self.new_ids.len()
                );
                Ok(())
            }
            Err(e) => {
                error!("{}: {}", LOAD_FAILED, e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Whether the "New" badge applies
    pub fn is_new(&self, id: i64) -> bool {
        self.new_ids.contains(&id)
            && self
                .items
                .iter()
                .any(|n| n.id == id && !n.viewed)
    }

    /// Mark one notification read and return it for display
    ///
    /// The notification is returned even when the server rejects the read
    /// update; the flag is rolled back and the failure is in `synced`.
    /// Returns `None` for an id that is not loaded.
    pub async fn open(&mut self, id: i64) -> Option<Opened> {
        let index = self.items.iter().position(|n| n.id == id)?;

        let was_viewed = self.items[index].viewed;
        self.items[index].viewed = true;
        if !was_viewed {
            self.counter.decrement();
        }
        let notification = self.items[index].clone();

        let synced = self.backend.mark_viewed(id).await;
        if let Err(e) = &synced {
            error!("Failed to mark notification {} as viewed: {}", id, e);
            self.items[index].viewed = was_viewed;
            if !was_viewed {
                self.counter.increment();
            }
        }

        Some(Opened {
            notification,
            synced,
        })
    }

    /// Mark everything read. Each call hits the bulk endpoint.
    pub async fn mark_all_read(&mut self) -> Result<(), ApiError> {
        let previous: Vec<bool> = self.items.iter().map(|n| n.viewed).collect();
        let previous_count = self.counter.get();

        for item in &mut self.items {
            item.viewed = true;
        }
        self.counter.clear();

        if let Err(e) = self.backend.mark_all_viewed().await {
            error!("Failed to mark all notifications as viewed: {}", e);
            for (item, viewed) in self.items.iter_mut().zip(previous) {
                item.viewed = viewed;
            }
            self.counter.set(previous_count);
            return Err(e);
        }

        info!("✅ All notifications marked as read");
        Ok(())
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.items.len(), self.size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to a 0-based page, clamped to the last page
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages().saturating_sub(1));
    }

    pub fn page_items(&self) -> &[NotificationDetails] {
        pagination::page_slice(&self.items, self.page, self.size)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::for_index(self.page, self.total_pages())
    }
}
