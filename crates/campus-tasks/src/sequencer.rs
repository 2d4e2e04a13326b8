//! Last-request-wins data fetching
//!
//! Each fetch takes a [`Ticket`] from [`RequestSequencer::begin`]. Starting a
//! new fetch cancels the previous ticket's token, and a result is applied
//! only when its ticket is still the latest. A failed fetch keeps showing the
//! last good data (or the seeded fallback) marked as stale.

use crate::error::TaskError;
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle for one in-flight request
#[derive(Debug, Clone)]
pub struct Ticket {
	id: u64,
	token: CancellationToken,
}

impl Ticket {
	/// Sequence number, increasing per [`RequestSequencer::begin`]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Whether a newer request has superseded this one
	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Token cancelled when this request is superseded
	pub fn token(&self) -> CancellationToken {
		self.token.clone()
	}

	/// Runs `fut` until it finishes or this request is superseded
	///
	/// Returns `None` when superseded; the future is dropped at that point.
	pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
		tokio::select! {
			_ = self.token.cancelled() => None,
			output = fut => Some(output),
		}
	}
}

/// What a screen shows for one data source
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
	/// Data to display: the latest success or the fallback
	pub data: Option<T>,
	/// Message of the latest failure, cleared by a success
	pub error: Option<String>,
	/// Whether a request is in flight
	pub is_loading: bool,
	/// Whether `data` is not the result of the latest request
	pub is_stale: bool,
}

impl<T> Default for FetchState<T> {
	fn default() -> Self {
		Self {
			data: None,
			error: None,
			is_loading: false,
			is_stale: false,
		}
	}
}

/// Sequences fetches so only the latest result lands
///
/// # Examples
///
/// ```
/// use campus_tasks::RequestSequencer;
///
/// let mut courses = RequestSequencer::<Vec<&str>>::new();
/// let first = courses.begin();
/// let second = courses.begin();
/// assert!(first.is_cancelled());
///
/// courses.complete(&second, Ok::<_, String>(vec!["Advanced React"])).unwrap();
/// assert!(courses.complete(&first, Ok::<_, String>(vec!["stale"])).is_err());
/// assert_eq!(courses.state().data, Some(vec!["Advanced React"]));
/// ```
pub struct RequestSequencer<T> {
	current: u64,
	token: Option<CancellationToken>,
	state: FetchState<T>,
}

impl<T> RequestSequencer<T> {
	/// Creates a sequencer with no data
	pub fn new() -> Self {
		Self {
			current: 0,
			token: None,
			state: FetchState::default(),
		}
	}

	/// Seeds data shown until the first successful fetch
	pub fn fallback(&mut self, data: T) {
		self.state.data = Some(data);
		self.state.is_stale = true;
	}

	/// Current display state
	pub fn state(&self) -> &FetchState<T> {
		&self.state
	}

	/// Starts a request, cancelling the previous one
	pub fn begin(&mut self) -> Ticket {
		if let Some(previous) = self.token.take()
			&& !previous.is_cancelled()
		{
			debug!(request = self.current, "superseding in-flight request");
			previous.cancel();
		}
		self.current += 1;
		let token = CancellationToken::new();
		self.token = Some(token.clone());
		self.state.is_loading = true;
		Ticket {
			id: self.current,
			token,
		}
	}

	/// Whether `ticket` belongs to the latest request
	pub fn is_current(&self, ticket: &Ticket) -> bool {
		ticket.id == self.current
	}

	/// Applies the result of a request if it is still the latest
	///
	/// A failure keeps the previous data and marks it stale. A superseded
	/// result is discarded and reported as [`TaskError::Superseded`].
	pub fn complete<E: fmt::Display>(
		&mut self,
		ticket: &Ticket,
		result: Result<T, E>,
	) -> Result<(), TaskError> {
		if !self.is_current(ticket) {
			debug!(request = ticket.id, current = self.current, "discarding superseded result");
			return Err(TaskError::Superseded {
				ticket: ticket.id,
				current: self.current,
			});
		}

		self.token = None;
		self.state.is_loading = false;
		match result {
			Ok(data) => {
				self.state.data = Some(data);
				self.state.error = None;
				self.state.is_stale = false;
			}
			Err(e) => {
				warn!(request = ticket.id, error = %e, "fetch failed, keeping last good data");
				self.state.error = Some(e.to_string());
				self.state.is_stale = self.state.data.is_some();
			}
		}
		Ok(())
	}
}

impl<T> Default for RequestSequencer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: fmt::Debug> fmt::Debug for RequestSequencer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RequestSequencer")
			.field("current", &self.current)
			.field("state", &self.state)
			.finish()
	}
}
