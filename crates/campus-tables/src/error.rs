//! Error types for table operations

use thiserror::Error;

/// Result type alias for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised by table configuration and state changes
///
/// An empty dataset is not an error; it renders as
/// [`TableBody::Empty`](crate::view::TableBody::Empty).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
	/// The named column does not exist
	#[error("Column not found: {0}")]
	ColumnNotFound(String),

	/// The named column exists but cannot be sorted
	#[error("Column is not sortable: {0}")]
	ColumnNotSortable(String),

	/// The named column exists but cannot be filtered
	#[error("Column is not filterable: {0}")]
	ColumnNotFilterable(String),

	/// Page numbers are 1-indexed and page sizes must be positive
	#[error("Invalid pagination: page {page}, per_page {per_page}")]
	InvalidPagination {
		/// Requested page
		page: usize,
		/// Requested page size
		per_page: usize,
	},

	/// A selection was requested for a row that is not on the current page
	#[error("Row is not visible on the current page: {0}")]
	RowNotVisible(String),

	/// The requested export format is not produced by this engine
	#[error("Unsupported export format: {0}")]
	UnsupportedExport(String),

	/// Writing the export artifact failed
	#[error("Export failed: {0}")]
	Export(String),
}
