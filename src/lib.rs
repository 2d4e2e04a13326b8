//! # Campus admin
//!
//! Headless engines behind the Campus LMS admin dashboard. Every list,
//! modal and sidebar of the dashboard is driven by one of these engines; the
//! UI layer only draws the views they render.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All engines and [`settings`]
//! - `tables` - Tabular data engine (sorting, search, filters, pagination,
//!   selection, CSV/JSON export)
//! - `forms` - Dynamic form engine (field kinds, validation, conditional
//!   fields, nested payloads, async submission)
//! - `filters` - Filter sidebar and URL view-state codec
//! - `tasks` - Debounced search and last-request-wins fetching
//!
//! ## Example
//!
//! ```rust
//! use campus::filters::ViewState;
//! use campus::settings::AdminSettings;
//!
//! let settings = AdminSettings::default();
//! assert_eq!(settings.tables.page_size, 10);
//!
//! let state = ViewState::from_query_string("?q=react&page=2");
//! assert_eq!(state.q.as_deref(), Some("react"));
//! ```

#[cfg(feature = "filters")]
pub mod filters;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(all(
	feature = "tables",
	feature = "forms",
	feature = "filters",
	feature = "tasks"
))]
pub mod settings;
#[cfg(feature = "tables")]
pub mod tables;
#[cfg(feature = "tasks")]
pub mod tasks;
