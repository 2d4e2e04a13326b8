//! Row selection state
//!
//! Selection uses string row ids so it stays stable when rows are re-sorted
//! or re-fetched. The owning table keeps it a subset of the ids on the
//! current page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// State of the header "select all" checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
	/// Every row on the page is selected
	Checked,
	/// No row on the page is selected (or the page is empty)
	Unchecked,
	/// Some, but not all, rows on the page are selected
	Indeterminate,
}

/// ID-based multi-selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
	selected: BTreeSet<String>,
}

impl Selection {
	/// Create a new empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Selected ids in sorted order.
	pub fn selected(&self) -> Vec<String> {
		self.selected.iter().cloned().collect()
	}

	/// Check if an id is selected.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.contains(id)
	}

	/// Number of selected rows.
	pub fn len(&self) -> usize {
		self.selected.len()
	}

	/// Check if nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	/// Select an id. Returns false if it was already selected.
	pub fn insert(&mut self, id: &str) -> bool {
		self.selected.insert(id.to_string())
	}

	/// Deselect an id. Returns false if it was not selected.
	pub fn remove(&mut self, id: &str) -> bool {
		self.selected.remove(id)
	}

	/// Toggle an id. Returns the new selected state.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.selected.remove(id) {
			false
		} else {
			self.selected.insert(id.to_string());
			true
		}
	}

	/// Clear all selection.
	/// Returns the ids that were deselected.
	pub fn clear(&mut self) -> Vec<String> {
		let removed: Vec<_> = std::mem::take(&mut self.selected).into_iter().collect();
		removed
	}

	/// Drop every id that is not in `visible`.
	/// Returns the ids that were deselected.
	pub fn retain_visible(&mut self, visible: &[String]) -> Vec<String> {
		let visible: BTreeSet<&str> = visible.iter().map(String::as_str).collect();
		let removed: Vec<String> = self
			.selected
			.iter()
			.filter(|id| !visible.contains(id.as_str()))
			.cloned()
			.collect();
		for id in &removed {
			self.selected.remove(id);
		}
		removed
	}

	/// Header checkbox state for the given page
	pub fn header_state(&self, page_ids: &[String]) -> CheckState {
		let selected = page_ids.iter().filter(|id| self.is_selected(id)).count();
		if selected == 0 {
			CheckState::Unchecked
		} else if selected == page_ids.len() {
			CheckState::Checked
		} else {
			CheckState::Indeterminate
		}
	}

	/// Header checkbox click
	///
	/// Selects every row on the page unless all are already selected, in
	/// which case the page is deselected. Returns the resulting state.
	pub fn toggle_all(&mut self, page_ids: &[String]) -> CheckState {
		if self.header_state(page_ids) == CheckState::Checked {
			for id in page_ids {
				self.selected.remove(id);
			}
		} else {
			self.selected.extend(page_ids.iter().cloned());
		}
		self.header_state(page_ids)
	}
}
