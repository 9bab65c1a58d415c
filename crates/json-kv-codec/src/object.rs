//! Object schema builder.
//!
//! A schema starts from a curried constructor and binds one constructor
//! argument per declared field:
//!
//! ```
//! use json_kv_codec::{json, object};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Record {
//!     value: i64,
//!     name: String,
//! }
//!
//! let codec = object(|value: i64| move |name: String| Record { value, name })
//!     .with("value", json::int(), |r: &Record| &r.value)
//!     .with("name", json::string(), |r: &Record| &r.name)
//!     .to_json();
//!
//! let record = codec.decode(&json!({"value": 42, "name": "Elm"})).unwrap();
//! assert_eq!(record, Record { value: 42, name: "Elm".into() });
//! assert_eq!(codec.encode_string(&record), r#"{"value":42,"name":"Elm"}"#);
//! ```
//!
//! `to_json` is only available once every constructor argument is bound, so
//! a schema with too few fields does not compile, and one with too many
//! fails because the constructor cannot be applied again.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::DecodeError;
use crate::json::{decode_elements, Decoder, EncodeFn, Json};

/// An object schema under construction.
///
/// `Remaining` is what the partial decoder currently produces: the
/// constructor with the fields declared so far already applied. When it is
/// `Obj` itself the schema is complete.
pub struct JsonObject<Obj, Remaining> {
    decoder: Decoder<Remaining>,
    fields: Vec<(String, Arc<EncodeFn<Obj>>)>,
}

/// Starts a schema for `Obj` from its curried constructor.
///
/// The constructor is cloned once per decode.
pub fn object<Obj, Ctor>(ctor: Ctor) -> JsonObject<Obj, Ctor>
where
    Ctor: Clone + Send + Sync + 'static,
{
    JsonObject {
        decoder: Decoder::new(move |_: &Value| Ok(ctor.clone())),
        fields: Vec::new(),
    }
}

impl<Obj: 'static, F: 'static> JsonObject<Obj, F> {
    /// Declares a required field.
    ///
    /// Decoding fails if the input is not an object, if `name` is absent,
    /// or if its value does not decode.
    pub fn with<A, G, P>(self, name: &str, codec: Json<A>, projection: P) -> JsonObject<Obj, G>
    where
        A: 'static,
        G: 'static,
        F: FnOnce(A) -> G,
        P: Fn(&Obj) -> &A + Send + Sync + 'static,
    {
        let partial = self.decoder.clone();
        let dec = codec.clone();
        let key = name.to_string();
        let decoder = Decoder::new(move |value: &Value| {
            let apply = partial.decode(value)?;
            let obj = value
                .as_object()
                .ok_or_else(|| DecodeError::mismatch("an OBJECT", value))?;
            let raw = obj
                .get(&key)
                .ok_or_else(|| DecodeError::MissingField(key.clone()))?;
            let arg = dec
                .decode(raw)
                .map_err(|e| DecodeError::in_field(&key, e))?;
            Ok(apply(arg))
        });
        self.push(name, decoder, move |obj: &Obj| codec.encode(projection(obj)))
    }

    /// Declares a list field.
    ///
    /// Decoding never fails here: an absent key, `null`, a non-array, or an
    /// array with any element the inner codec rejects all give an empty list.
    /// Encoding always writes the key, as `[]` when the list is empty.
    pub fn with_list<A, G, P>(
        self,
        name: &str,
        codec: Json<A>,
        projection: P,
    ) -> JsonObject<Obj, G>
    where
        A: 'static,
        G: 'static,
        F: FnOnce(Vec<A>) -> G,
        P: Fn(&Obj) -> &[A] + Send + Sync + 'static,
    {
        let partial = self.decoder.clone();
        let dec = codec.clone();
        let key = name.to_string();
        let decoder = Decoder::new(move |value: &Value| {
            let apply = partial.decode(value)?;
            let items = value
                .get(key.as_str())
                .and_then(|raw| decode_elements(&dec, raw).ok())
                .unwrap_or_default();
            Ok(apply(items))
        });
        self.push(name, decoder, move |obj: &Obj| {
            Value::Array(projection(obj).iter().map(|item| codec.encode(item)).collect())
        })
    }

    /// Declares an optional field.
    ///
    /// An absent key or a value the inner codec rejects decodes as `None`;
    /// the failure is not reported. `None` encodes as `null`.
    pub fn with_maybe<A, G, P>(
        self,
        name: &str,
        codec: Json<A>,
        projection: P,
    ) -> JsonObject<Obj, G>
    where
        A: 'static,
        G: 'static,
        F: FnOnce(Option<A>) -> G,
        P: Fn(&Obj) -> Option<&A> + Send + Sync + 'static,
    {
        let partial = self.decoder.clone();
        let dec = codec.clone();
        let key = name.to_string();
        let decoder = Decoder::new(move |value: &Value| {
            let apply = partial.decode(value)?;
            let arg = value
                .get(key.as_str())
                .and_then(|raw| dec.decode(raw).ok());
            Ok(apply(arg))
        });
        self.push(name, decoder, move |obj: &Obj| {
            projection(obj).map_or(Value::Null, |v| codec.encode(v))
        })
    }

    /// Names of the fields declared so far, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn push<G, E>(self, name: &str, decoder: Decoder<G>, encode_field: E) -> JsonObject<Obj, G>
    where
        E: Fn(&Obj) -> Value + Send + Sync + 'static,
    {
        let mut fields = self.fields;
        fields.push((name.to_string(), Arc::new(encode_field)));
        JsonObject { decoder, fields }
    }
}

impl<Obj: 'static> JsonObject<Obj, Obj> {
    /// Seals a complete schema into a codec.
    ///
    /// The encoder writes exactly the declared fields, in declaration order.
    pub fn to_json(self) -> Json<Obj> {
        let decoder = self.decoder;
        // Fields were pushed as they were declared, so front to back is
        // declaration order.
        let fields = self.fields;
        Json::new(
            move |value| decoder.decode(value),
            move |obj| {
                let mut out = Map::with_capacity(fields.len());
                for (name, encode_field) in &fields {
                    out.insert(name.clone(), encode_field(obj));
                }
                Value::Object(out)
            },
        )
    }
}

impl<Obj, Remaining> Clone for JsonObject<Obj, Remaining> {
    fn clone(&self) -> Self {
        JsonObject {
            decoder: self.decoder.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl<Obj, Remaining> fmt::Debug for JsonObject<Obj, Remaining> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonObject")
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Empty;

    #[test]
    fn empty_schema_accepts_any_object() {
        let codec = object(Empty).to_json();
        assert_eq!(codec.decode(&json!({"extra": 1})), Ok(Empty));
        assert_eq!(codec.encode(&Empty), json!({}));
    }

    #[test]
    fn field_names_follow_declaration_order() {
        #[derive(Debug, PartialEq)]
        struct Pair {
            b: bool,
            a: String,
        }
        let builder = object(|b: bool| move |a: String| Pair { b, a })
            .with("b", json::bool(), |p: &Pair| &p.b)
            .with("a", json::string(), |p: &Pair| &p.a);
        assert_eq!(builder.field_names(), vec!["b", "a"]);
    }

    #[test]
    fn required_field_rejects_non_objects() {
        #[derive(Debug, PartialEq)]
        struct One {
            n: i64,
        }
        let codec = object(|n: i64| One { n })
            .with("n", json::int(), |o: &One| &o.n)
            .to_json();
        assert!(matches!(
            codec.decode(&json!([1])),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }
}
