//! URL query-string codec for list page state
//!
//! A list page's visible state (filters, layout, sort, search, page and tab)
//! lives entirely in its query string, so a reload or a shared link
//! reproduces it. Each filter section is one repeated parameter; the keys in
//! [`RESERVED_KEYS`] carry the rest.
//!
//! ```text
//! ?type=video&level=advanced&level=beginner&view=list&sort=-created_at&q=react&page=2
//! ```

use campus_tables::{FilterSelection, SimpleTable, SortConfig, TableRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::form_urlencoded;

/// Query parameters that never name a filter section
pub const RESERVED_KEYS: [&str; 5] = ["view", "sort", "q", "page", "type"];

/// Sort parameter; `-field` is descending
pub type SortParam = SortConfig;

/// Layout of a list page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
	/// Card grid
	#[default]
	Grid,
	/// Table rows
	List,
}

impl ViewMode {
	/// Query parameter value
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Grid => "grid",
			Self::List => "list",
		}
	}

	/// Parses a query parameter value
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"grid" => Some(Self::Grid),
			"list" => Some(Self::List),
			_ => None,
		}
	}
}

/// Everything a list page keeps in its URL
///
/// # Examples
///
/// ```
/// use campus_filters::{ViewMode, ViewState};
///
/// let state = ViewState::from_query_string("?level=advanced&view=list&sort=-price&page=2");
/// assert_eq!(state.view, ViewMode::List);
/// assert_eq!(state.page, 2);
/// assert!(state.filters.contains("level", "advanced"));
///
/// assert_eq!(
///     state.to_query_string(),
///     "level=advanced&view=list&sort=-price&page=2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
	/// Sidebar selection
	pub filters: FilterSelection,
	/// Layout
	pub view: ViewMode,
	/// Active sort
	pub sort: Option<SortParam>,
	/// Free-text search
	pub q: Option<String>,
	/// Current page, 1-indexed
	pub page: usize,
	/// Selected tab (`type` parameter)
	pub category: Option<String>,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			filters: FilterSelection::new(),
			view: ViewMode::Grid,
			sort: None,
			q: None,
			page: 1,
			category: None,
		}
	}
}

impl ViewState {
	/// Default state: no filters, grid layout, first page
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filters
	pub fn with_filters(mut self, filters: FilterSelection) -> Self {
		self.filters = filters;
		self
	}

	/// Sets the layout
	pub fn with_view(mut self, view: ViewMode) -> Self {
		self.view = view;
		self
	}

	/// Sets the sort
	pub fn with_sort(mut self, sort: SortParam) -> Self {
		self.sort = Some(sort);
		self
	}

	/// Sets the search; blank text clears it
	pub fn with_search(mut self, q: &str) -> Self {
		self.q = non_blank(q);
		self
	}

	/// Sets the page; 0 becomes 1
	pub fn with_page(mut self, page: usize) -> Self {
		self.page = page.max(1);
		self
	}

	/// Sets the tab
	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = non_blank(&category.into());
		self
	}

	/// Encodes the state as `application/x-www-form-urlencoded`
	///
	/// Defaults (grid layout, page 1, no sort, no search) are omitted, so the
	/// default state encodes to an empty string.
	pub fn to_query_string(&self) -> String {
		let mut query = form_urlencoded::Serializer::new(String::new());
		if let Some(category) = &self.category {
			query.append_pair("type", category);
		}
		for (section, values) in self.filters.iter() {
			for value in values {
				query.append_pair(section, value);
			}
		}
		if self.view != ViewMode::default() {
			query.append_pair("view", self.view.as_str());
		}
		if let Some(sort) = &self.sort {
			query.append_pair("sort", &sort.to_query());
		}
		if let Some(q) = &self.q {
			query.append_pair("q", q);
		}
		if self.page > 1 {
			query.append_pair("page", &self.page.to_string());
		}
		query.finish()
	}

	/// Decodes a query string, with or without the leading `?`
	///
	/// Malformed reserved values are logged and replaced by their defaults;
	/// decoding never fails.
	pub fn from_query_string(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let mut state = Self::default();

		for (key, value) in form_urlencoded::parse(query.as_bytes()) {
			match &*key {
				"view" => match ViewMode::parse(&value) {
					Some(view) => state.view = view,
					None => warn!(value = %value, "ignoring unknown view mode"),
				},
				"sort" => match SortParam::parse_from_query(&value) {
					Some(sort) => state.sort = Some(sort),
					None => warn!(value = %value, "ignoring malformed sort parameter"),
				},
				"q" => state.q = non_blank(&value),
				"page" => match value.parse::<usize>() {
					Ok(page) if page >= 1 => state.page = page,
					_ => warn!(value = %value, "ignoring malformed page number"),
				},
				"type" => state.category = non_blank(&value),
				"" => debug!("ignoring query parameter without a name"),
				section => {
					if !value.is_empty() {
						state.filters.insert(section, &*value);
					}
				}
			}
		}
		state
	}

	/// Pushes filters, search, sort and page into a table
	///
	/// A sort on a column the table cannot sort by is logged and cleared. The
	/// category is a page-level tab and is left to the caller.
	pub fn apply_to_table<R: TableRow>(&self, table: &mut SimpleTable<R>) {
		table.apply_selection(&self.filters);
		table.search(self.q.as_deref().unwrap_or_default());
		match &self.sort {
			Some(sort) => {
				if let Err(e) = table.sort_by(&sort.field, sort.order) {
					warn!(error = %e, "ignoring sort from view state");
					table.clear_sort();
				}
			}
			None => table.clear_sort(),
		}
		table.set_page(self.page);
	}
}

fn non_blank(s: &str) -> Option<String> {
	let s = s.trim();
	(!s.is_empty()).then(|| s.to_string())
}
