//! `Json<T>` — a decoder and an encoder for one type, kept together.
//!
//! Every constructor in this module returns a codec that satisfies the
//! round-trip law: `decode(encode(x)) == x` for every valid `x`. The reverse
//! does not have to hold, a decoder may tolerate shapes its encoder never
//! produces.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::DecodeError;
use crate::text;

pub(crate) type DecodeFn<T> = dyn Fn(&Value) -> Result<T, DecodeError> + Send + Sync;
pub(crate) type EncodeFn<T> = dyn Fn(&T) -> Value + Send + Sync;

/// The decoding half of a codec.
pub struct Decoder<T> {
    decode_fn: Arc<DecodeFn<T>>,
}

impl<T> Decoder<T> {
    pub fn new<F>(decode_fn: F) -> Self
    where
        F: Fn(&Value) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        Decoder {
            decode_fn: Arc::new(decode_fn),
        }
    }

    pub fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        (self.decode_fn)(value)
    }
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Decoder {
            decode_fn: Arc::clone(&self.decode_fn),
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Decoder")
    }
}

/// A paired decoder and encoder for values of type `T`.
///
/// Codecs are immutable; cloning one only bumps two reference counts, and a
/// single codec can be shared by any number of threads or tasks.
///
/// # Example
///
/// ```
/// use json_kv_codec::json;
/// use serde_json::json;
///
/// let codec = json::int();
/// assert_eq!(codec.decode(&json!(42)), Ok(42));
/// assert_eq!(codec.encode(&7), json!(7));
/// ```
pub struct Json<T> {
    decoder: Decoder<T>,
    encoder: Arc<EncodeFn<T>>,
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        Json {
            decoder: self.decoder.clone(),
            encoder: Arc::clone(&self.encoder),
        }
    }
}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Json")
    }
}

impl<T: 'static> Json<T> {
    /// Builds a codec from a decode function and an encode function.
    pub fn new<D, E>(decode_fn: D, encode_fn: E) -> Self
    where
        D: Fn(&Value) -> Result<T, DecodeError> + Send + Sync + 'static,
        E: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Json {
            decoder: Decoder::new(decode_fn),
            encoder: Arc::new(encode_fn),
        }
    }

    pub fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        self.decoder.decode(value)
    }

    pub fn encode(&self, value: &T) -> Value {
        (self.encoder)(value)
    }

    /// Returns the decoding half, for readers that never write.
    pub fn decoder(&self) -> Decoder<T> {
        self.decoder.clone()
    }

    /// Parses `text` and decodes the resulting value.
    pub fn decode_str(&self, text: &str) -> Result<T, DecodeError> {
        self.decode(&text::parse(text)?)
    }

    /// Encodes `value` and prints it as compact JSON text.
    pub fn encode_string(&self, value: &T) -> String {
        text::print(&self.encode(value))
    }

    /// Derives a codec for `B` from this one.
    ///
    /// `decode_fn` runs after a successful decode, `encode_fn` before the
    /// encode. No failure is introduced beyond what this codec reports.
    pub fn map<B, D, E>(self, decode_fn: D, encode_fn: E) -> Json<B>
    where
        B: 'static,
        D: Fn(T) -> B + Send + Sync + 'static,
        E: Fn(&B) -> T + Send + Sync + 'static,
    {
        let inner_dec = self.decoder;
        let inner_enc = self.encoder;
        Json::new(
            move |value| inner_dec.decode(value).map(&decode_fn),
            move |b| inner_enc(&encode_fn(b)),
        )
    }
}

/// Free-function form of [`Json::map`].
pub fn map<A, B, D, E>(decode_fn: D, encode_fn: E, codec: Json<A>) -> Json<B>
where
    A: 'static,
    B: 'static,
    D: Fn(A) -> B + Send + Sync + 'static,
    E: Fn(&B) -> A + Send + Sync + 'static,
{
    codec.map(decode_fn, encode_fn)
}

// ------------------------------------------------------------------
// Primitives

pub fn bool() -> Json<bool> {
    Json::new(
        |value| match value {
            Value::Bool(b) => Ok(*b),
            other => Err(DecodeError::mismatch("a BOOL", other)),
        },
        |b| Value::Bool(*b),
    )
}

/// Whole numbers representable as `i64`. Numbers with a fractional part are
/// rejected.
pub fn int() -> Json<i64> {
    Json::new(
        |value| {
            value
                .as_i64()
                .ok_or_else(|| DecodeError::mismatch("an INT", value))
        },
        |n| Value::Number(Number::from(*n)),
    )
}

/// Any JSON number. Non-finite floats have no JSON form and encode as `null`.
pub fn float() -> Json<f64> {
    Json::new(
        |value| {
            value
                .as_f64()
                .ok_or_else(|| DecodeError::mismatch("a FLOAT", value))
        },
        |n| Number::from_f64(*n).map_or(Value::Null, Value::Number),
    )
}

pub fn string() -> Json<String> {
    Json::new(
        |value| match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch("a STRING", other)),
        },
        |s| Value::String(s.clone()),
    )
}

/// Passes JSON values through untouched.
pub fn value() -> Json<Value> {
    Json::new(|value| Ok(value.clone()), |value| value.clone())
}

// ------------------------------------------------------------------
// Containers

/// A JSON object whose values all share one codec.
///
/// Decoding fails on the first value the inner codec rejects; the error
/// names that key. Keys are kept verbatim.
pub fn dict<A: 'static>(codec: Json<A>) -> Json<IndexMap<String, A>> {
    let dec = codec.clone();
    Json::new(
        move |value| {
            let obj = value
                .as_object()
                .ok_or_else(|| DecodeError::mismatch("an OBJECT", value))?;
            let mut out = IndexMap::with_capacity(obj.len());
            for (key, val) in obj {
                let decoded = dec
                    .decode(val)
                    .map_err(|e| DecodeError::in_field(key, e))?;
                out.insert(key.clone(), decoded);
            }
            Ok(out)
        },
        move |entries| {
            let mut obj = Map::new();
            for (key, val) in entries {
                obj.insert(key.clone(), codec.encode(val));
            }
            Value::Object(obj)
        },
    )
}

/// A JSON array whose elements all share one codec.
pub fn list<A: 'static>(codec: Json<A>) -> Json<Vec<A>> {
    let dec = codec.clone();
    Json::new(
        move |value| decode_elements(&dec, value),
        move |items| Value::Array(items.iter().map(|item| codec.encode(item)).collect()),
    )
}

/// `null` maps to `None`, anything else goes through `codec`.
pub fn nullable<A: 'static>(codec: Json<A>) -> Json<Option<A>> {
    let dec = codec.clone();
    Json::new(
        move |value| match value {
            Value::Null => Ok(None),
            other => dec.decode(other).map(Some),
        },
        move |maybe| match maybe {
            Some(v) => codec.encode(v),
            None => Value::Null,
        },
    )
}

pub(crate) fn decode_elements<A: 'static>(
    codec: &Json<A>,
    value: &Value,
) -> Result<Vec<A>, DecodeError> {
    let arr = value
        .as_array()
        .ok_or_else(|| DecodeError::mismatch("a LIST", value))?;
    arr.iter()
        .enumerate()
        .map(|(index, item)| {
            codec
                .decode(item)
                .map_err(|e| DecodeError::at_index(index, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_rejects_fractions() {
        assert!(int().decode(&json!(1.5)).is_err());
        assert_eq!(int().decode(&json!(-3)), Ok(-3));
    }

    #[test]
    fn float_accepts_integers() {
        assert_eq!(float().decode(&json!(2)), Ok(2.0));
    }

    #[test]
    fn float_nan_encodes_as_null() {
        assert_eq!(float().encode(&f64::NAN), Value::Null);
    }

    #[test]
    fn mismatch_reports_expected_kind() {
        let err = bool().decode(&json!("yes")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                expected: "a BOOL",
                found: "\"yes\"".to_string(),
            }
        );
    }
}
