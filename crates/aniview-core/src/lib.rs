//! Cancellable, single-flight load tracking.
//!
//! Every screen in the workspace follows the same pattern: a key says what to
//! show, a fetch produces the data, and only the newest request matters.
//! [`LoadController`] owns that pattern once so the screen models stay thin.

pub mod controller;
pub mod error;
pub mod state;

pub use controller::LoadController;
pub use error::{Disposed, FetchError};
pub use state::LoadState;
