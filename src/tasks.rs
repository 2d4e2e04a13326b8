//! Debounced search and request sequencing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use campus::tasks::{Debouncer, SearchSettings};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (mut debouncer, mut rx) = Debouncer::from_settings(&SearchSettings::default());
//! debouncer.trigger("react".to_string()).unwrap();
//! let query = rx.recv().await;
//! # }
//! ```

pub use campus_tasks::*;
