use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;

/// JSON HTTP client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Client for the marketplace backend
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_headers(&config.api_base_url, config.request_timeout, HeaderMap::new())
    }

    /// Client for any JSON API with extra default headers
    pub fn with_headers(
        base_url: &str,
        timeout: Duration,
        mut headers: HeaderMap,
    ) -> Result<Self, ApiError> {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ApiError::Transport {
                path: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path)).query(query);
        let body = self.send(path, request).await?;
        decode(path, &body)
    }

    /// PATCH with an optional JSON body, ignoring the response body
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut request = self.client.patch(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(path, request).await.map(|_| ())
    }

    /// PUT a JSON body and decode the answer
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        let body = self.send(path, request).await?;
        decode(path, &body)
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<String, ApiError> {
        debug!("Sending request to {}", path);

        let transport = |source| ApiError::Transport {
            path: path.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            warn!("{} returned status: {}", path, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("Received {} bytes from {}", body.len(), path);
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}
