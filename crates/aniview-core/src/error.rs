use thiserror::Error;

/// Why a fetch settled without a value.
///
/// Carried inside `LoadState::Failure` and cloned to every observer, so the
/// variants hold plain detail strings rather than source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connect, timeout, dropped body.
    #[error("network error: {0}")]
    Network(String),
    /// The response arrived but could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Anything else, including unexpected HTTP statuses.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// Returned when a controller is used after `dispose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("load controller used after dispose")]
pub struct Disposed;
