//! Error types for background tasks

use thiserror::Error;

/// Errors raised by the debouncer and the request sequencer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
	/// The receiving side of a debouncer was dropped
	#[error("Debounce receiver closed")]
	Closed,

	/// A newer request was started before this one completed
	#[error("Request {ticket} superseded by request {current}")]
	Superseded {
		/// Ticket of the completed request
		ticket: u64,
		/// Ticket of the latest request
		current: u64,
	},
}
