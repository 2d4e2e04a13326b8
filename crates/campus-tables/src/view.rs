//! Render output of a table
//!
//! A [`TableView`] is plain data: a UI layer draws it without calling back
//! into the table.

use crate::column::Alignment;
use crate::pagination::PageInfo;
use crate::selection::CheckState;
use crate::sorting::{SortConfig, SortOrder};
use serde::{Deserialize, Serialize};

/// Guidance shown instead of rows when nothing matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
	/// Message, e.g. "No courses found"
	pub message: String,
	/// Optional call-to-action label, e.g. "Create course"
	pub action: Option<String>,
}

impl EmptyState {
	/// Empty state with a message and no action
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			action: None,
		}
	}

	/// Adds a call-to-action label
	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}
}

impl Default for EmptyState {
	fn default() -> Self {
		Self::new("No data available")
	}
}

/// One visible column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
	/// Column name
	pub name: String,
	/// Header label
	pub label: String,
	/// Whether clicking the header sorts
	pub sortable: bool,
	/// Active sort direction on this column
	pub sort: Option<SortOrder>,
	/// Preferred width in pixels
	pub width: Option<u16>,
	/// Cell alignment
	pub align: Alignment,
	/// CSS classes for the column's cells
	pub css_classes: String,
}

/// One rendered row of the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
	/// Row identifier
	pub id: String,
	/// Whether the row checkbox is checked
	pub selected: bool,
	/// Rendered cells, one per visible column
	pub cells: Vec<String>,
}

/// Rows of the current page or the empty-state branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TableBody {
	/// At least one row matches
	Rows(Vec<RowView>),
	/// Nothing matches; not an error
	Empty(EmptyState),
}

/// Complete render output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
	/// Visible column headers
	pub headers: Vec<HeaderView>,
	/// Page rows or empty state
	pub body: TableBody,
	/// Header "select all" checkbox
	pub select_all: CheckState,
	/// Page controls
	pub page: PageInfo,
	/// Active sort
	pub sort: Option<SortConfig>,
	/// Active search text
	pub search: Option<String>,
}

impl TableView {
	/// Rows on the page, empty for the empty-state branch
	pub fn rows(&self) -> &[RowView] {
		match &self.body {
			TableBody::Rows(rows) => rows,
			TableBody::Empty(_) => &[],
		}
	}

	/// True when the empty-state branch is shown
	pub fn is_empty(&self) -> bool {
		matches!(self.body, TableBody::Empty(_))
	}
}
