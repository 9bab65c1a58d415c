use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::HttpError;
use crate::transport::{Method, StoreRequest, StoreResponse, Transport};

/// In-memory store speaking the remote wire contract, for testing and local
/// development.
///
/// `GET` answers `{"result": <value or null>}`, `POST` stores the raw body
/// (400 if it is not JSON), `DELETE` always succeeds. Every request is
/// recorded in arrival order.
#[derive(Default)]
pub struct MemoryTransport {
    records: tokio::sync::RwLock<HashMap<String, Value>>,
    requests: tokio::sync::Mutex<Vec<StoreRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record without going through a request.
    pub async fn put(&self, url: impl Into<String>, value: Value) {
        self.records.write().await.insert(url.into(), value);
    }

    pub async fn record(&self, url: &str) -> Option<Value> {
        self.records.read().await.get(url).cloned()
    }

    /// Requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<StoreRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse, HttpError> {
        self.requests.lock().await.push(request.clone());
        match request.method {
            Method::Get => {
                let records = self.records.read().await;
                let result = records.get(&request.url).cloned().unwrap_or(Value::Null);
                Ok(StoreResponse::new(200, json!({ "result": result }).to_string()))
            }
            Method::Post => {
                let body = request.body.unwrap_or_default();
                match serde_json::from_str::<Value>(&body) {
                    Ok(value) => {
                        self.records.write().await.insert(request.url, value);
                        Ok(StoreResponse::new(200, ""))
                    }
                    Err(e) => Ok(StoreResponse::new(400, e.to_string())),
                }
            }
            Method::Delete => {
                self.records.write().await.remove(&request.url);
                Ok(StoreResponse::new(200, ""))
            }
        }
    }
}
