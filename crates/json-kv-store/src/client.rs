//! Record operations against the store.
//!
//! Every operation is an `async fn`: nothing is sent until the future is
//! polled, and dropping the future abandons whichever request is in flight.

use json_kv_codec::{print, Decoder, Json};
use serde_json::Value;

use crate::error::HttpError;
use crate::options::ClientOptions;
use crate::transport::{ReqwestTransport, StoreRequest, StoreResponse, Transport};

/// Key under which the store wraps a record in `GET` responses.
const RESULT_KEY: &str = "result";

/// Client for one store. Each call addresses exactly one record.
#[derive(Debug, Clone)]
pub struct StoreClient<T = ReqwestTransport> {
    transport: T,
    options: ClientOptions,
}

impl StoreClient<ReqwestTransport> {
    pub fn new(options: ClientOptions) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(&options)?;
        Ok(Self { transport, options })
    }
}

impl<T: Transport> StoreClient<T> {
    pub fn with_transport(transport: T, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates or overwrites the record at `url`.
    ///
    /// Any 2xx response counts as success; its body is ignored. Bodies over
    /// `max_payload_bytes` are logged but still sent, splitting large data
    /// into several records is up to the caller.
    pub async fn insert(&self, url: &str, value: &Value) -> Result<(), HttpError> {
        let url = self.options.resolve(url);
        let body = print(value);
        if body.len() > self.options.max_payload_bytes {
            tracing::warn!(
                url = %url,
                size = body.len(),
                limit = self.options.max_payload_bytes,
                "record payload exceeds store limit"
            );
        }
        self.execute(StoreRequest::post(url, body)).await?;
        Ok(())
    }

    /// Removes the record at `url`. Removing a missing record succeeds.
    pub async fn delete(&self, url: &str) -> Result<(), HttpError> {
        let url = self.options.resolve(url);
        self.execute(StoreRequest::delete(url)).await?;
        Ok(())
    }

    /// Reads the record at `url`.
    ///
    /// Returns `None` when the store reports no value. A body that is not a
    /// JSON object with a `result` key, or a result `decoder` rejects, is a
    /// [`HttpError::BadBody`].
    pub async fn get<A>(&self, url: &str, decoder: &Decoder<A>) -> Result<Option<A>, HttpError> {
        let url = self.options.resolve(url);
        let response = self.execute(StoreRequest::get(url)).await?;
        decode_envelope(&response.body, decoder)
    }

    /// [`get`](Self::get) with the decoding half of `codec`.
    pub async fn load<A: 'static>(&self, url: &str, codec: &Json<A>) -> Result<Option<A>, HttpError> {
        self.get(url, &codec.decoder()).await
    }

    /// [`insert`](Self::insert) of `value` encoded with `codec`.
    pub async fn save<A: 'static>(
        &self,
        url: &str,
        codec: &Json<A>,
        value: &A,
    ) -> Result<(), HttpError> {
        self.insert(url, &codec.encode(value)).await
    }

    /// Read-modify-write of an existing record.
    ///
    /// Reads the record; if absent, returns without writing. Otherwise writes
    /// back `transform` of the decoded value. The read and the write are two
    /// independent requests, a concurrent writer in between is overwritten.
    pub async fn update<A, F>(&self, url: &str, codec: &Json<A>, transform: F) -> Result<(), HttpError>
    where
        A: 'static,
        F: FnOnce(A) -> A,
    {
        let current = match self.load(url, codec).await? {
            Some(current) => current,
            None => {
                tracing::debug!(url, "update skipped, record absent");
                return Ok(());
            }
        };
        let next = codec.encode(&transform(current));
        self.insert(url, &next).await
    }

    async fn execute(&self, request: StoreRequest) -> Result<StoreResponse, HttpError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, url = %url, "store request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, %method, url = %url, "store request failed");
            e
        })?;
        if !response.is_success() {
            tracing::warn!(status = response.status, %method, url = %url, "store rejected request");
            return Err(HttpError::BadStatus(response.status));
        }
        Ok(response)
    }
}

fn decode_envelope<A>(body: &str, decoder: &Decoder<A>) -> Result<Option<A>, HttpError> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|e| HttpError::BadBody(e.to_string()))?;
    let result = envelope
        .get(RESULT_KEY)
        .ok_or_else(|| {
            HttpError::BadBody(format!(
                "Expecting an OBJECT with a field named `{}`",
                RESULT_KEY
            ))
        })?;
    match result {
        Value::Null => Ok(None),
        value => decoder
            .decode(value)
            .map(Some)
            .map_err(|e| HttpError::BadBody(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_kv_codec::json;

    #[test]
    fn envelope_null_is_absent() {
        let dec = json::int().decoder();
        assert_eq!(decode_envelope(r#"{"result":null}"#, &dec), Ok(None));
        assert_eq!(decode_envelope(r#"{"result":3,"meta":1}"#, &dec), Ok(Some(3)));
    }

    #[test]
    fn envelope_shape_errors_are_bad_body() {
        let dec = json::int().decoder();
        for body in ["", "[1]", r#"{"value":1}"#, r#"{"result":"x"}"#] {
            assert!(
                matches!(decode_envelope(body, &dec), Err(HttpError::BadBody(_))),
                "body: {}",
                body
            );
        }
    }
}
