//! Dual JSON codecs.
//!
//! A [`Json<T>`] pairs a decoder and an encoder for one type. Primitive codecs
//! and combinators live in [`json`]; [`object`] assembles codecs for record
//! types field by field.
//!
//! # Example
//!
//! ```
//! use json_kv_codec::json;
//! use serde_json::json;
//!
//! let scores = json::dict(json::int());
//! let decoded = scores.decode(&json!({"ada": 3, "bob": 5})).unwrap();
//! assert_eq!(decoded["bob"], 5);
//! assert_eq!(scores.encode(&decoded), json!({"ada": 3, "bob": 5}));
//! ```

pub mod error;
pub mod json;
pub mod object;
pub mod text;

pub use error::DecodeError;
pub use json::{Decoder, Json};
pub use object::{object, JsonObject};
pub use text::{parse, print};
