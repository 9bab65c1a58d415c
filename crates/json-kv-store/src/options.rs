//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Payload size the remote store accepts per record.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 100 * 1024;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Options for [`StoreClient`](crate::StoreClient).
///
/// Every field has a default, so partial configs deserialize:
///
/// ```
/// use json_kv_store::ClientOptions;
///
/// let opts: ClientOptions = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
/// assert_eq!(opts.timeout_secs, 5);
/// assert_eq!(opts.max_payload_bytes, 100 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Prefix for relative record paths.
    pub base_url: Option<String>,
    /// Deadline for a whole request, response body included.
    pub timeout_secs: u64,
    /// Bodies larger than this are logged as oversized. They are still sent.
    pub max_payload_bytes: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves a record path against `base_url`.
    ///
    /// Absolute `http://` and `https://` URLs are returned unchanged, as is
    /// everything when no base is configured.
    pub fn resolve(&self, path: &str) -> String {
        let is_absolute = path.starts_with("http://") || path.starts_with("https://");
        match &self.base_url {
            Some(base) if !is_absolute => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            _ => path.to_string(),
        }
    }
}
