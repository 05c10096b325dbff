//! HTTP client for the Sproutbook JSON API.
//!
//! All endpoints are pass-through persistence calls on the server side; the
//! client's job is request shaping, status mapping, and deserialization.

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{
    Child, ChildDraft, GrowthRecord, MediaItem, Milestone, NewGrowthRecord, NewMilestone,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the Sproutbook server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-success statuses to `ApiError`, consuming the body for context.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", path))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to post to {}", path))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))
    }

    // =========================================================================
    // Child
    // =========================================================================

    /// Fetch the tracked child. The endpoint returns JSON `null` until a
    /// child has been created (single-child application).
    pub async fn fetch_child(&self) -> Result<Option<Child>> {
        let child: Option<Child> = self.get_json("/api/baby", &[]).await?;
        debug!(found = child.is_some(), "Child profile fetched");
        Ok(child)
    }

    /// Create the child profile.
    pub async fn create_child(&self, draft: &ChildDraft) -> Result<Child> {
        self.post_json("/api/baby", draft).await
    }

    /// Update the child profile. Only the populated draft fields change.
    pub async fn update_child(&self, id: &str, draft: &ChildDraft) -> Result<Child> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UpdatePayload<'a> {
            id: &'a str,
            #[serde(flatten)]
            draft: &'a ChildDraft,
        }

        let response = self
            .client
            .put(self.url("/api/baby"))
            .json(&UpdatePayload { id, draft })
            .send()
            .await
            .context("Failed to update child profile")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse updated child profile")
    }

    // =========================================================================
    // Growth records
    // =========================================================================

    /// Fetch all growth records for the child, newest first.
    pub async fn fetch_growth_records(&self, child_id: &str) -> Result<Vec<GrowthRecord>> {
        let records: Vec<GrowthRecord> = self
            .get_json("/api/growth-records", &[("babyId", child_id)])
            .await?;
        debug!(count = records.len(), "Growth records fetched");
        Ok(records)
    }

    pub async fn create_growth_record(&self, record: &NewGrowthRecord) -> Result<GrowthRecord> {
        self.post_json("/api/growth-records", record).await
    }

    // =========================================================================
    // Milestones
    // =========================================================================

    /// Fetch all milestones for the child, newest first.
    pub async fn fetch_milestones(&self, child_id: &str) -> Result<Vec<Milestone>> {
        let milestones: Vec<Milestone> = self
            .get_json("/api/milestones", &[("babyId", child_id)])
            .await?;
        debug!(count = milestones.len(), "Milestones fetched");
        Ok(milestones)
    }

    pub async fn create_milestone(&self, milestone: &NewMilestone) -> Result<Milestone> {
        self.post_json("/api/milestones", milestone).await
    }

    // =========================================================================
    // Media
    // =========================================================================

    /// Fetch the photo listing for the child. Uploads go through the server's
    /// own upload handler, not this client.
    pub async fn fetch_media(&self, child_id: &str) -> Result<Vec<MediaItem>> {
        let items: Vec<MediaItem> = self
            .get_json("/api/media-items", &[("babyId", child_id)])
            .await?;
        debug!(count = items.len(), "Media items fetched");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/api/baby"), "http://localhost:3000/api/baby");
    }
}
