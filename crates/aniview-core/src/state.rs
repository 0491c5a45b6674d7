//! Published state of one logical load.

use crate::error::FetchError;

/// Where a load currently stands, as seen by observers.
///
/// Exactly one variant is active at a time.  A fresh request resets the state
/// to `Loading`; only the task that issued the newest request may move it to
/// `Success` or `Failure`.  `Disposed` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// No request has been made yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The newest fetch settled with a value.
    Success(T),
    /// The newest fetch settled with an error.
    Failure(FetchError),
    /// The controller was torn down.
    Disposed,
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed)
    }

    /// True once the newest request has settled, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    /// The loaded value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The error the newest fetch settled with, if any.
    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}
