//! Sorting functionality for tables

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortOrder {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}
}

/// The single active sort key of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
	/// Column name
	pub field: String,
	/// Direction
	pub order: SortOrder,
}

impl SortConfig {
	/// Creates a sort configuration
	pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
		Self {
			field: field.into(),
			order,
		}
	}

	/// Parses a sort from a query parameter
	///
	/// A leading `-` means descending (e.g., `"title"` is ascending and
	/// `"-title"` is descending). Returns `None` for an empty field or a
	/// field that itself starts with `-`.
	///
	/// # Examples
	///
	/// ```
	/// use campus_tables::{SortConfig, SortOrder};
	///
	/// let sort = SortConfig::parse_from_query("-created_at").unwrap();
	/// assert_eq!(sort.field, "created_at");
	/// assert_eq!(sort.order, SortOrder::Descending);
	/// assert!(SortConfig::parse_from_query("-").is_none());
	/// assert!(SortConfig::parse_from_query("--title").is_none());
	/// ```
	pub fn parse_from_query(s: &str) -> Option<Self> {
		let s = s.trim();
		let (order, field) = match s.strip_prefix('-') {
			Some(field) => (SortOrder::Descending, field),
			None => (SortOrder::Ascending, s),
		};
		let field = field.trim();
		if field.is_empty() || field.starts_with('-') {
			None
		} else {
			Some(Self::new(field, order))
		}
	}

	/// Formats the sort as a query parameter value
	pub fn to_query(&self) -> String {
		match self.order {
			SortOrder::Ascending => self.field.clone(),
			SortOrder::Descending => format!("-{}", self.field),
		}
	}
}

/// Next state when a column header is clicked
///
/// Clicking a new column sorts it ascending; clicking the active column
/// cycles ascending, descending, then no sort.
pub fn next_sort(current: Option<&SortConfig>, field: &str) -> Option<SortConfig> {
	match current {
		Some(sort) if sort.field == field => match sort.order {
			SortOrder::Ascending => Some(SortConfig::new(field, SortOrder::Descending)),
			SortOrder::Descending => None,
		},
		_ => Some(SortConfig::new(field, SortOrder::Ascending)),
	}
}
