//! Client for a minimal HTTP key-value JSON store.
//!
//! One record lives at one URL. The store answers `GET` with
//! `{"result": <value or null>}`, stores the raw body of a `POST`, and
//! removes the record on `DELETE`. Record shapes are described with
//! [`json_kv_codec`] codecs.
//!
//! # Example
//!
//! ```
//! use json_kv_codec::{json, object};
//! use json_kv_store::{ClientOptions, MemoryTransport, StoreClient};
//!
//! #[derive(Debug, PartialEq)]
//! struct Counter {
//!     hits: i64,
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let counter = object(|hits: i64| Counter { hits })
//!     .with("hits", json::int(), |c: &Counter| &c.hits)
//!     .to_json();
//!
//! let client = StoreClient::with_transport(MemoryTransport::new(), ClientOptions::new());
//! client.save("/counters/home", &counter, &Counter { hits: 1 }).await.unwrap();
//! client.update("/counters/home", &counter, |c| Counter { hits: c.hits + 1 }).await.unwrap();
//! assert_eq!(
//!     client.load("/counters/home", &counter).await.unwrap(),
//!     Some(Counter { hits: 2 })
//! );
//! # });
//! ```

pub mod client;
pub mod error;
pub mod memory;
pub mod options;
pub mod transport;

pub use client::StoreClient;
pub use error::HttpError;
pub use memory::MemoryTransport;
pub use options::ClientOptions;
pub use transport::{Method, ReqwestTransport, StoreRequest, StoreResponse, Transport};
