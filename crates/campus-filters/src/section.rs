//! Filter sections and their options

use serde::{Deserialize, Serialize};

/// One checkbox in a filter section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
	/// Value stored in the selection and the query string
	pub value: String,
	/// Display label
	pub label: String,
	/// Number of matching items, when the backend reports it
	pub count: Option<usize>,
}

impl FilterOption {
	/// Creates an option without a count
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			count: None,
		}
	}

	/// Attaches a count badge
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = Some(count);
		self
	}
}

/// A collapsible group of options, e.g. "Category" or "Level"
///
/// # Examples
///
/// ```
/// use campus_filters::{FilterOption, FilterSection};
///
/// let section = FilterSection::new("level", "Level")
///     .option(FilterOption::new("beginner", "Beginner"))
///     .option(FilterOption::new("advanced", "Advanced").with_count(4))
///     .searchable();
///
/// assert!(section.has_option("advanced"));
/// assert_eq!(section.options.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSection {
	/// Key used in the selection and the query string
	pub key: String,
	/// Heading
	pub title: String,
	/// Options in display order
	pub options: Vec<FilterOption>,
	/// Whether the section shows a search box
	#[serde(default)]
	pub searchable: bool,
}

impl FilterSection {
	/// Creates an empty section
	pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			title: title.into(),
			options: Vec::new(),
			searchable: false,
		}
	}

	/// Appends an option
	pub fn option(mut self, option: FilterOption) -> Self {
		self.options.push(option);
		self
	}

	/// Replaces the options
	pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
		self.options = options;
		self
	}

	/// Enables the search box
	pub fn searchable(mut self) -> Self {
		self.searchable = true;
		self
	}

	/// Whether an option with this value exists
	pub fn has_option(&self, value: &str) -> bool {
		self.options.iter().any(|o| o.value == value)
	}

	/// Options whose label contains `query`, ignoring case
	pub fn matching_options<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a FilterOption> {
		let needle = query.trim().to_lowercase();
		self.options
			.iter()
			.filter(move |o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", 3)]
	#[case("  ", 3)]
	#[case("SCI", 2)]
	#[case("art", 1)]
	#[case("history", 0)]
	fn test_matching_options(#[case] query: &str, #[case] expected: usize) {
		let section = FilterSection::new("category", "Category").with_options(vec![
			FilterOption::new("cs", "Computer Science"),
			FilterOption::new("ds", "Data Science"),
			FilterOption::new("art", "Art"),
		]);

		assert_eq!(section.matching_options(query).count(), expected);
	}
}
