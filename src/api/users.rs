use serde_json::json;
use tracing::info;

use super::client::HttpClient;
use super::endpoints::{segment, RejectionReason};
use crate::error::ApiError;
use crate::filters::QueryParams;
use crate::models::{
    AgentResponse, ListingPage, ListingPayload, ProfileUpdate, SellerResponse, UserResponse,
};

/// User directory, KYC review and profile endpoints
#[derive(Debug, Clone)]
pub struct UsersApi {
    http: HttpClient,
}

impl UsersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Registered users, whatever shape the endpoint answers in
    pub async fn list_users(
        &self,
        page: usize,
        size: usize,
    ) -> Result<ListingPage<UserResponse>, ApiError> {
        let params = QueryParams::new().with_pagination(page, size);
        let payload: ListingPayload<UserResponse> =
            self.http.get_json("/admin/users", params.pairs()).await?;
        Ok(payload.normalize(page, size))
    }

    pub async fn list_agents(&self) -> Result<Vec<AgentResponse>, ApiError> {
        self.http.get_json("/admin/agents", &[]).await
    }

    /// Sellers whose KYC documents wait for review
    pub async fn pending_kyc(&self) -> Result<Vec<SellerResponse>, ApiError> {
        self.http.get_json("/admin/kyc/pending", &[]).await
    }

    pub async fn approve_kyc(&self, user_id: &str) -> Result<(), ApiError> {
        self.http
            .patch::<()>(&format!("/admin/kyc/{}/approve", segment(user_id)), None)
            .await?;
        info!("✅ KYC approved for {}", user_id);
        Ok(())
    }

    pub async fn reject_kyc(&self, user_id: &str, reason: &RejectionReason) -> Result<(), ApiError> {
        let body = json!({ "reason": reason.as_str() });
        self.http
            .patch(&format!("/admin/kyc/{}/reject", segment(user_id)), Some(&body))
            .await?;
        info!("KYC rejected for {}", user_id);
        Ok(())
    }

    pub async fn agent_profile(&self, agent_id: &str) -> Result<AgentResponse, ApiError> {
        self.http
            .get_json(&format!("/agent/profile/{}", segment(agent_id)), &[])
            .await
    }

    pub async fn update_agent_profile(
        &self,
        agent_id: &str,
        update: &ProfileUpdate,
    ) -> Result<AgentResponse, ApiError> {
        update.validate()?;
        self.http
            .put_json(&format!("/agent/profile/{}", segment(agent_id)), update)
            .await
    }

    pub async fn buyer_profile(&self, buyer_id: &str) -> Result<UserResponse, ApiError> {
        self.http
            .get_json(&format!("/buyer/profile/{}", segment(buyer_id)), &[])
            .await
    }

    pub async fn update_buyer_profile(
        &self,
        buyer_id: &str,
        update: &ProfileUpdate,
    ) -> Result<UserResponse, ApiError> {
        update.validate()?;
        self.http
            .put_json(&format!("/buyer/profile/{}", segment(buyer_id)), update)
            .await
    }
}
