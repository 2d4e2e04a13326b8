//! Submission handlers and outcomes

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

/// What the form does after a successful submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterSubmit {
	/// Close the modal and reset the form
	#[default]
	Close,
	/// Stay open and return to the initial values
	Reset,
	/// Stay open with the submitted values
	Keep,
}

/// Result of [`Form::submit`](crate::form::Form::submit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Validation failed; the handler was not called
	Invalid,
	/// The handler succeeded and the after-submit action was applied
	Submitted(AfterSubmit),
	/// The handler failed; the message is shown as the form banner
	Failed(String),
}

impl SubmitOutcome {
	/// True for [`SubmitOutcome::Submitted`]
	pub fn is_submitted(&self) -> bool {
		matches!(self, Self::Submitted(_))
	}
}

/// Receives the nested payload of a valid form
///
/// Errors are shown to the user as-is, so they should be readable messages.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
	/// Persists the payload
	async fn submit(&self, payload: Value) -> anyhow::Result<()>;
}

/// Adapter returned by [`handler_fn`]
pub struct FnHandler<F>(F);

/// Wraps an async closure as a [`SubmitHandler`]
///
/// # Examples
///
/// ```
/// use campus_forms::handler_fn;
///
/// let handler = handler_fn(|payload: serde_json::Value| async move {
///     anyhow::ensure!(payload.is_object(), "payload must be an object");
///     Ok(())
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
	F: Fn(Value) -> Fut + Send + Sync,
	Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
	FnHandler(f)
}

#[async_trait]
impl<F, Fut> SubmitHandler for FnHandler<F>
where
	F: Fn(Value) -> Fut + Send + Sync,
	Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
	async fn submit(&self, payload: Value) -> anyhow::Result<()> {
		(self.0)(payload).await
	}
}
