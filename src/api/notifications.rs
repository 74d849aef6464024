use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::client::HttpClient;
use super::endpoints::{notifications_base, Actor};
use super::traits::NotificationBackend;
use crate::error::{ApiError, ValidationError};
use crate::models::NotificationDetails;

/// Count endpoints answer either `5` or `{"count": 5}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UnreadCount {
    Bare(u64),
    Wrapped {
        #[serde(alias = "unreadCount")]
        count: u64,
    },
}

impl From<UnreadCount> for u64 {
    fn from(value: UnreadCount) -> Self {
        match value {
            UnreadCount::Bare(n) | UnreadCount::Wrapped { count: n } => n,
        }
    }
}

/// Notification endpoints for one admin or agent
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    http: HttpClient,
    base: String,
}

impl NotificationsApi {
    pub fn new(http: HttpClient, actor: &Actor) -> Result<Self, ValidationError> {
        Ok(Self {
            http,
            base: notifications_base(actor)?,
        })
    }
}

#[async_trait]
impl NotificationBackend for NotificationsApi {
    async fn all(&self) -> Result<Vec<NotificationDetails>, ApiError> {
        self.http.get_json(&self.base, &[]).await
    }

    async fn unread(&self) -> Result<Vec<NotificationDetails>, ApiError> {
        self.http.get_json(&format!("{}/unread", self.base), &[]).await
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        let count: UnreadCount = self
            .http
            .get_json(&format!("{}/unread/count", self.base), &[])
            .await?;
        let count = u64::from(count);
        debug!("{} unread notifications", count);
        Ok(count)
    }

    async fn mark_viewed(&self, id: i64) -> Result<(), ApiError> {
        self.http
            .patch::<()>(&format!("{}/{}/viewed", self.base, id), None)
            .await
    }

    async fn mark_all_viewed(&self) -> Result<(), ApiError> {
        self.http
            .patch::<()>(&format!("{}/markAllViewed", self.base), None)
            .await
    }
}
