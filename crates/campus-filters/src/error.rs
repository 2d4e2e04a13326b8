//! Error types for the filter sidebar

use thiserror::Error;

/// Result type alias for sidebar operations
pub type FilterResult<T> = std::result::Result<T, FilterError>;

/// Errors raised by sidebar construction and mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
	/// No section has this key
	#[error("Unknown filter section: {0}")]
	UnknownSection(String),

	/// The section has no option with this value
	#[error("Unknown option '{value}' in filter section '{section}'")]
	UnknownOption {
		/// Section key
		section: String,
		/// Rejected option value
		value: String,
	},

	/// A search was set on a section that is not searchable
	#[error("Filter section is not searchable: {0}")]
	NotSearchable(String),

	/// Two sections share a key
	#[error("Duplicate filter section: {0}")]
	DuplicateSection(String),

	/// The key is used by the view-state query string
	#[error("Filter section key is reserved: {0}")]
	ReservedKey(String),
}
