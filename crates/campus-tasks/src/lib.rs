//! Background task helpers for Campus admin screens
//!
//! - [`Debouncer`]: delays search input until typing pauses; a newer value
//!   cancels the pending one
//! - [`RequestSequencer`]: last-request-wins fetching with a last-known-good
//!   fallback, so a slow or failed request never replaces newer data

#![warn(missing_docs)]

pub mod debounce;
pub mod error;
pub mod sequencer;
pub mod settings;

pub use debounce::Debouncer;
pub use error::TaskError;
pub use sequencer::{FetchState, RequestSequencer, Ticket};
pub use settings::{DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS, SearchSettings};
