//! Debounced delivery of search input
//!
//! Every keystroke calls [`Debouncer::trigger`]. A value is delivered on the
//! receiver only after the window passes without another trigger; a newer
//! trigger cancels the pending one.
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Input
//!     participant Debouncer
//!     participant Receiver
//!     Input->>Debouncer: trigger("re")
//!     Input->>Debouncer: trigger("rea")
//!     Note over Debouncer: "re" cancelled
//!     Input->>Debouncer: trigger("react")
//!     Note over Debouncer: window elapses
//!     Debouncer->>Receiver: "react"
//! ```

use crate::error::TaskError;
use crate::settings::SearchSettings;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

type Slot<T> = Arc<Mutex<Option<T>>>;

struct Pending<T> {
	token: CancellationToken,
	slot: Slot<T>,
}

/// Whoever takes the value delivers it, so a flush racing the timer sends once
fn take<T>(slot: &Slot<T>) -> Option<T> {
	slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Supersede-cancels-prior debouncer
///
/// Must be used inside a tokio runtime; each trigger spawns one timer task.
///
/// # Examples
///
/// ```
/// use campus_tasks::Debouncer;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(10));
/// debouncer.trigger("re").unwrap();
/// debouncer.trigger("react").unwrap();
///
/// assert_eq!(rx.recv().await, Some("react"));
/// # }
/// ```
pub struct Debouncer<T> {
	window: Duration,
	tx: mpsc::UnboundedSender<T>,
	pending: Option<Pending<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
	/// Creates a debouncer and the receiver its values are delivered on
	pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
		let (tx, rx) = mpsc::unbounded_channel();
		let debouncer = Self {
			window,
			tx,
			pending: None,
		};
		(debouncer, rx)
	}

	/// Creates a debouncer with the configured window
	pub fn from_settings(settings: &SearchSettings) -> (Self, mpsc::UnboundedReceiver<T>) {
		Self::new(settings.window())
	}

	/// Quiet period before delivery
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Schedules `value` for delivery, cancelling any pending value
	pub fn trigger(&mut self, value: T) -> Result<(), TaskError> {
		if self.tx.is_closed() {
			return Err(TaskError::Closed);
		}
		self.cancel();

		let token = CancellationToken::new();
		let slot: Slot<T> = Arc::new(Mutex::new(Some(value)));
		let pending = Pending {
			token: token.clone(),
			slot: slot.clone(),
		};
		let tx = self.tx.clone();
		let window = self.window;

		tokio::spawn(async move {
			tokio::select! {
				_ = token.cancelled() => {}
				_ = tokio::time::sleep(window) => {
					if let Some(value) = take(&slot) && tx.send(value).is_err() {
						debug!("debounce receiver dropped before delivery");
					}
				}
			}
		});

		self.pending = Some(pending);
		Ok(())
	}

	/// Drops the pending value. Returns whether one was pending.
	pub fn cancel(&mut self) -> bool {
		let Some(pending) = self.pending.take() else {
			return false;
		};
		pending.token.cancel();
		let cancelled = take(&pending.slot).is_some();
		if cancelled {
			debug!(window_ms = self.window.as_millis() as u64, "pending debounced value cancelled");
		}
		cancelled
	}

	/// Delivers the pending value now. Returns whether one was pending.
	pub fn flush(&mut self) -> Result<bool, TaskError> {
		let Some(pending) = self.pending.take() else {
			return Ok(false);
		};
		pending.token.cancel();
		match take(&pending.slot) {
			Some(value) => {
				self.tx.send(value).map_err(|_| TaskError::Closed)?;
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Whether a value is waiting for its window to pass
	pub fn is_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(|pending| {
			pending
				.slot
				.lock()
				.unwrap_or_else(PoisonError::into_inner)
				.is_some()
		})
	}
}

impl<T> Drop for Debouncer<T> {
	fn drop(&mut self) {
		if let Some(pending) = &self.pending {
			pending.token.cancel();
		}
	}
}
