//! Fake marketplace backend for integration tests.
//!
//! Answers canned JSON per `METHOD path` and records every request it sees.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use propdesk::api::{HttpClient, LocationClient};
use propdesk::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    /// Lowercased header names
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<String, (u16, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeBackend {
    base_url: String,
    shared: Arc<Shared>,
    handle: JoinHandle<()>,
}

fn key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_uppercase(), path)
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let headers = headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or_default().to_string();
            (name.as_str().to_lowercase(), value)
        })
        .collect();
    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    });

    let canned = shared
        .routes
        .lock()
        .unwrap()
        .get(&key(method.as_str(), &path))
        .cloned();
    match canned {
        Some((status, value)) => {
            let status = StatusCode::from_u16(status).unwrap();
            (status, Json(value)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
    }
}

impl FakeBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
            handle,
        }
    }

    /// Answer `METHOD path` with this status and body
    pub fn route(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(key(method, path), (status, body));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> HttpClient {
        let config = Config {
            api_base_url: self.base_url.clone(),
            ..Config::default()
        };
        HttpClient::new(&config).expect("Failed to build client")
    }

    /// Location lookup pointed at this server with a fixed API key
    pub fn locations(&self, api_key: &str) -> LocationClient {
        let config = Config {
            csc_base_url: self.base_url.clone(),
            csc_api_key: Some(api_key.to_string()),
            ..Config::default()
        };
        LocationClient::new(&config).expect("Failed to build location client")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn property(id: i64, category: &str, city: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Listing {id}"),
        "category": category,
        "city": city,
        "price": 2500000.0,
        "adminApproved": "PENDING"
    })
}

pub fn user(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{id}@example.com"),
        "role": "BUYER",
        "kycStatus": "PENDING",
        "createdAt": "2024-04-02T09:30:00Z"
    })
}

pub fn notification(id: i64, viewed: bool) -> Value {
    json!({
        "id": id,
        "type": "PROPERTY_SUBMITTED",
        "message": format!("Listing #{id} submitted for review"),
        "senderId": "ag-1",
        "senderRole": "AGENT",
        "receiverRole": "ADMIN",
        "viewed": viewed,
        "createdAt": "2024-05-01T10:00:00"
    })
}
