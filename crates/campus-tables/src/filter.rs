//! Filtering functionality for tables
//!
//! Three kinds of filters combine with logical AND:
//! - free-text search over the visible columns
//! - column text filters (`?name=li`)
//! - structured filters from the filter sidebar ([`FilterSelection`])

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Selected option values per filter section
///
/// Sections without any selected value are not stored, so two selections are
/// equal exactly when they constrain the same values.
///
/// # Examples
///
/// ```
/// use campus_tables::FilterSelection;
///
/// let mut selection = FilterSelection::new();
/// selection.insert("level", "beginner");
/// selection.insert("level", "advanced");
/// assert!(selection.contains("level", "advanced"));
///
/// selection.toggle("level", "advanced");
/// assert_eq!(selection.active_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	from = "BTreeMap<String, BTreeSet<String>>",
	into = "BTreeMap<String, BTreeSet<String>>"
)]
pub struct FilterSelection(BTreeMap<String, BTreeSet<String>>);

impl From<BTreeMap<String, BTreeSet<String>>> for FilterSelection {
	fn from(mut sections: BTreeMap<String, BTreeSet<String>>) -> Self {
		sections.retain(|_, values| !values.is_empty());
		Self(sections)
	}
}

impl From<FilterSelection> for BTreeMap<String, BTreeSet<String>> {
	fn from(selection: FilterSelection) -> Self {
		selection.0
	}
}

impl FilterSelection {
	/// Creates an empty selection
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the values of one section; an empty set removes the section
	pub fn set<I, S>(&mut self, section: impl Into<String>, values: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let section = section.into();
		let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
		if values.is_empty() {
			self.0.remove(&section);
		} else {
			self.0.insert(section, values);
		}
	}

	/// Adds one value. Returns false if it was already selected.
	pub fn insert(&mut self, section: impl Into<String>, value: impl Into<String>) -> bool {
		self.0
			.entry(section.into())
			.or_default()
			.insert(value.into())
	}

	/// Removes one value. Returns false if it was not selected.
	pub fn remove(&mut self, section: &str, value: &str) -> bool {
		let Some(values) = self.0.get_mut(section) else {
			return false;
		};
		let removed = values.remove(value);
		if values.is_empty() {
			self.0.remove(section);
		}
		removed
	}

	/// Flips one value. Returns the new selected state.
	pub fn toggle(&mut self, section: &str, value: &str) -> bool {
		if self.remove(section, value) {
			false
		} else {
			self.insert(section, value)
		}
	}

	/// Selected values of a section
	pub fn values(&self, section: &str) -> Option<&BTreeSet<String>> {
		self.0.get(section)
	}

	/// Whether a value is selected
	pub fn contains(&self, section: &str, value: &str) -> bool {
		self.0
			.get(section)
			.is_some_and(|values| values.contains(value))
	}

	/// Clears one section
	pub fn clear_section(&mut self, section: &str) {
		self.0.remove(section);
	}

	/// Clears every section
	pub fn clear(&mut self) {
		self.0.clear();
	}

	/// True when nothing is selected
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Total number of selected values across sections
	pub fn active_count(&self) -> usize {
		self.0.values().map(BTreeSet::len).sum()
	}

	/// Iterates sections in key order
	pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
		self.0.iter()
	}
}

/// Case-insensitive substring test; `needle_lower` must already be lowercase
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
	needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
