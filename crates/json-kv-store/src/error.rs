use thiserror::Error;

/// Failure of a store request.
///
/// Nothing is retried internally; every variant reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("bad url: {0}")]
    BadUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("network error")]
    NetworkError,

    #[error("bad status: {0}")]
    BadStatus(u16),

    #[error("bad body: {0}")]
    BadBody(String),
}
