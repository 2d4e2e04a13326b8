//! Table definition and state
//!
//! [`SimpleTable`] owns the rows, the column definitions and the per-instance
//! view state (sort key, search text, filters, page, column visibility,
//! selected rows). Every state change re-derives the matching rows, re-clamps
//! the page and prunes the selection to the rows on the current page.

use crate::column::Column;
use crate::error::{Result, TableError};
use crate::export::{self, ExportOptions, ExportResult, ExportScope};
use crate::filter::{FilterSelection, contains_ignore_case};
use crate::pagination::{PageInfo, PageRequest, PageResponse, Pagination};
use crate::selection::{CheckState, Selection};
use crate::settings::TableSettings;
use crate::sorting::{SortConfig, SortOrder, next_sort};
use crate::view::{EmptyState, HeaderView, RowView, TableBody, TableView};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A record displayed by a table
///
/// The engine never looks at a row beyond its id and what the column
/// accessors read.
pub trait TableRow {
	/// Unique identifier used for selection
	fn row_id(&self) -> String;
}

/// Read-only table interface
pub trait Table {
	/// The type of rows in the table
	type Row;

	/// All column definitions, visible or not
	fn columns(&self) -> &[Box<dyn Column<Row = Self::Row>>];

	/// The full dataset in insertion order
	fn rows(&self) -> &[Self::Row];

	/// Number of rows in the dataset
	fn total_rows(&self) -> usize;

	/// Number of rows matching search and filters
	fn filtered_rows_count(&self) -> usize;

	/// Rows of the current page, sorted
	fn visible_rows(&self) -> Vec<&Self::Row>;

	/// Number of pages for the matching rows
	fn total_pages(&self) -> usize;

	/// Render output
	fn render(&self) -> TableView;
}

/// In-memory table with client-side sorting, filtering and pagination
///
/// Rows can also come from a server-paged response through
/// [`SimpleTable::load_page`], in which case the page state is taken from the
/// response and the received rows form the current page.
pub struct SimpleTable<R> {
	rows: Vec<R>,
	columns: Vec<Box<dyn Column<Row = R>>>,
	hidden: HashSet<String>,
	sort: Option<SortConfig>,
	search: Option<String>,
	filters: HashMap<String, String>,
	selection_filters: FilterSelection,
	pagination: Pagination,
	selection: Selection,
	settings: TableSettings,
	empty_state: EmptyState,
	server_paged: bool,
	page_request: Option<PageRequest>,
}

impl<R: TableRow> SimpleTable<R> {
	/// Creates an empty table with default settings
	pub fn new() -> Self {
		Self::with_settings(Vec::new(), TableSettings::default())
	}

	/// Creates a table over `rows` with default settings
	pub fn with_rows(rows: Vec<R>) -> Self {
		Self::with_settings(rows, TableSettings::default())
	}

	/// Creates a table over `rows` with explicit settings
	pub fn with_settings(rows: Vec<R>, settings: TableSettings) -> Self {
		let mut table = Self {
			rows,
			columns: Vec::new(),
			hidden: HashSet::new(),
			sort: None,
			search: None,
			filters: HashMap::new(),
			selection_filters: FilterSelection::new(),
			pagination: Pagination::new(settings.page_size),
			selection: Selection::new(),
			settings,
			empty_state: EmptyState::default(),
			server_paged: false,
			page_request: None,
		};
		table.refresh();
		table
	}

	/// Sets the empty state shown when no row matches
	pub fn with_empty_state(mut self, empty_state: EmptyState) -> Self {
		self.empty_state = empty_state;
		self
	}

	/// Replaces the empty state
	pub fn set_empty_state(&mut self, empty_state: EmptyState) {
		self.empty_state = empty_state;
	}

	/// Settings this table was built with
	pub fn settings(&self) -> &TableSettings {
		&self.settings
	}

	/// Adds a column definition
	pub fn add_column(&mut self, column: Box<dyn Column<Row = R>>) {
		self.columns.push(column);
		self.refresh();
	}

	/// Replaces the dataset (client-side paging)
	///
	/// The page is clamped to the new range and selections of rows that are
	/// no longer on the page are dropped.
	pub fn set_rows(&mut self, rows: Vec<R>) {
		self.rows = rows;
		self.server_paged = false;
		self.page_request = None;
		self.refresh();
	}

	/// Loads one page of a server-paged result
	///
	/// The received rows become the current page; page number, page size and
	/// total come from the response.
	pub fn load_page(&mut self, response: PageResponse<R>) {
		let (rows, pagination) = response.into_parts();
		debug!(
			rows = rows.len(),
			page = pagination.current_page,
			total = pagination.total_items,
			"loaded server page"
		);
		self.rows = rows;
		self.pagination = pagination;
		self.server_paged = true;
		self.page_request = None;
		self.refresh();
	}

	/// Page the data source should load next (server paging)
	///
	/// While the table shows a server page, page navigation does not move
	/// the displayed page. It records the target here instead, and the next
	/// [`SimpleTable::load_page`] clears it.
	pub fn page_request(&self) -> Option<PageRequest> {
		self.page_request
	}

	/// The full dataset in insertion order
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Number of rows in the dataset
	pub fn total_rows(&self) -> usize {
		self.rows.len()
	}

	/// All column definitions, visible or not
	pub fn columns(&self) -> &[Box<dyn Column<Row = R>>] {
		&self.columns
	}

	fn column(&self, name: &str) -> Option<&dyn Column<Row = R>> {
		self.columns
			.iter()
			.find(|c| c.name() == name)
			.map(|c| c.as_ref())
	}

	fn require_column(&self, name: &str) -> Result<&dyn Column<Row = R>> {
		self.column(name)
			.ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
	}

	// ---------------------------------------------------------------------
	// Sorting
	// ---------------------------------------------------------------------

	/// Sorts by one column, replacing any previous sort key
	pub fn sort_by(&mut self, field: &str, order: SortOrder) -> Result<()> {
		let column = self.require_column(field)?;
		if !column.sortable() {
			return Err(TableError::ColumnNotSortable(field.to_string()));
		}
		self.sort = Some(SortConfig::new(field, order));
		debug!(field, ?order, "sort changed");
		self.refresh();
		Ok(())
	}

	/// Header click: ascending, then descending, then unsorted
	pub fn toggle_sort(&mut self, field: &str) -> Result<Option<SortConfig>> {
		let column = self.require_column(field)?;
		if !column.sortable() {
			return Err(TableError::ColumnNotSortable(field.to_string()));
		}
		self.sort = next_sort(self.sort.as_ref(), field);
		debug!(field, sort = ?self.sort, "sort toggled");
		self.refresh();
		Ok(self.sort.clone())
	}

	/// Removes the sort key, restoring insertion order
	pub fn clear_sort(&mut self) {
		self.sort = None;
		self.refresh();
	}

	/// Active sort key
	pub fn sort_config(&self) -> Option<&SortConfig> {
		self.sort.as_ref()
	}

	// ---------------------------------------------------------------------
	// Search and filters
	// ---------------------------------------------------------------------

	/// Sets the free-text search and returns to the first page
	///
	/// A row matches when any visible column's rendered text contains the
	/// query, ignoring case. A blank query clears the search.
	pub fn search(&mut self, query: &str) {
		let query = query.trim();
		self.search = if query.is_empty() {
			None
		} else {
			Some(query.to_string())
		};
		debug!(query, "search changed");
		self.reset_to_first_page();
	}

	/// Clears the free-text search
	pub fn clear_search(&mut self) {
		self.search("");
	}

	/// Active search text
	pub fn search_query(&self) -> Option<&str> {
		self.search.as_deref()
	}

	/// Replaces the column text filters and returns to the first page
	///
	/// Each entry keeps rows whose rendered cell contains the value, ignoring
	/// case. Every named column must exist and be filterable.
	pub fn filter(&mut self, filters: HashMap<String, String>) -> Result<()> {
		for field in filters.keys() {
			let column = self.require_column(field)?;
			if !column.filterable() {
				return Err(TableError::ColumnNotFilterable(field.clone()));
			}
		}
		self.filters = filters;
		debug!(filters = self.filters.len(), "column filters changed");
		self.reset_to_first_page();
		Ok(())
	}

	/// Removes all column text filters
	pub fn clear_filters(&mut self) {
		self.filters.clear();
		self.reset_to_first_page();
	}

	/// Active column text filters
	pub fn filters(&self) -> &HashMap<String, String> {
		&self.filters
	}

	/// Applies structured filters from the filter sidebar
	///
	/// A section whose key names a filterable column keeps rows whose
	/// rendered cell equals one of the selected values. Sections without a
	/// matching column, or naming a non-filterable one, are left to the data
	/// source and ignored here. An empty section imposes no constraint.
	pub fn apply_selection(&mut self, selection: &FilterSelection) {
		for (section, _) in selection.iter() {
			match self.column(section) {
				None => debug!(section = %section, "no column for filter section, ignoring"),
				Some(column) if !column.filterable() => {
					debug!(section = %section, "column is not filterable, ignoring section")
				}
				Some(_) => {}
			}
		}
		self.selection_filters = selection.clone();
		self.reset_to_first_page();
	}

	/// Active structured filters
	pub fn filter_selection(&self) -> &FilterSelection {
		&self.selection_filters
	}

	// ---------------------------------------------------------------------
	// Pagination
	// ---------------------------------------------------------------------

	/// Moves to `page` with `per_page` rows per page
	///
	/// The page is clamped to the available range. On a server-paged table
	/// this only records a [`PageRequest`].
	pub fn paginate(&mut self, page: usize, per_page: usize) -> Result<()> {
		if page == 0 || per_page == 0 || per_page > self.settings.max_page_size {
			return Err(TableError::InvalidPagination { page, per_page });
		}
		if self.server_paged {
			let mut target = self.pagination.clone();
			target.per_page = per_page;
			target.set_page(page);
			self.request_page(target.current_page, per_page);
			return Ok(());
		}
		self.pagination.per_page = per_page;
		let total = self.pagination.total_items;
		self.pagination.set_total_items(total);
		self.pagination.set_page(page);
		self.refresh();
		Ok(())
	}

	/// Changes the page size and returns to the first page
	pub fn set_page_size(&mut self, per_page: usize) -> Result<()> {
		if per_page == 0 || per_page > self.settings.max_page_size {
			return Err(TableError::InvalidPagination { page: 1, per_page });
		}
		if self.server_paged {
			self.request_page(1, per_page);
			return Ok(());
		}
		self.pagination.set_per_page(per_page);
		self.refresh();
		Ok(())
	}

	/// Moves to a page, clamped to the valid range
	pub fn set_page(&mut self, page: usize) {
		if self.server_paged {
			let mut target = self.pagination.clone();
			target.set_page(page);
			self.request_page(target.current_page, target.per_page);
			return;
		}
		self.pagination.set_page(page);
		self.refresh();
	}

	/// Moves to the next page; false at the last page
	pub fn next_page(&mut self) -> bool {
		if self.server_paged {
			let has_next = self.pagination.has_next();
			if has_next {
				self.request_page(self.pagination.current_page + 1, self.pagination.per_page);
			}
			return has_next;
		}
		let moved = self.pagination.next_page();
		if moved {
			self.refresh();
		}
		moved
	}

	/// Moves to the previous page; false at the first page
	pub fn prev_page(&mut self) -> bool {
		if self.server_paged {
			let has_previous = self.pagination.has_previous();
			if has_previous {
				self.request_page(self.pagination.current_page - 1, self.pagination.per_page);
			}
			return has_previous;
		}
		let moved = self.pagination.prev_page();
		if moved {
			self.refresh();
		}
		moved
	}

	/// Current pagination state
	pub fn pagination_config(&self) -> &Pagination {
		&self.pagination
	}

	/// Page controls snapshot
	pub fn page_info(&self) -> PageInfo {
		self.pagination.info()
	}

	/// Number of pages for the matching rows
	pub fn total_pages(&self) -> usize {
		self.pagination.total_pages()
	}

	fn reset_to_first_page(&mut self) {
		if self.server_paged {
			self.request_page(1, self.pagination.per_page);
		} else {
			self.pagination.current_page = 1;
		}
		self.refresh();
	}

	fn request_page(&mut self, page: usize, limit: usize) {
		debug!(page, limit, "server page requested");
		self.page_request = Some(PageRequest { page, limit });
	}

	// ---------------------------------------------------------------------
	// Column visibility
	// ---------------------------------------------------------------------

	/// Shows or hides a column
	///
	/// Hidden columns keep their position and renderer; they are only skipped
	/// when rendering, searching and exporting.
	pub fn set_column_visible(&mut self, name: &str, visible: bool) -> Result<()> {
		self.require_column(name)?;
		if visible {
			self.hidden.remove(name);
		} else {
			self.hidden.insert(name.to_string());
		}
		debug!(column = name, visible, "column visibility changed");
		self.refresh();
		Ok(())
	}

	/// Flips a column's visibility and returns the new state
	pub fn toggle_column(&mut self, name: &str) -> Result<bool> {
		let visible = !self.is_column_visible(name);
		self.set_column_visible(name, visible)?;
		Ok(visible)
	}

	/// Whether a column is shown
	pub fn is_column_visible(&self, name: &str) -> bool {
		!self.hidden.contains(name)
	}

	/// Visible columns in definition order
	pub fn visible_columns(&self) -> Vec<&dyn Column<Row = R>> {
		self.columns
			.iter()
			.filter(|c| self.is_column_visible(c.name()))
			.map(|c| c.as_ref())
			.collect()
	}

	// ---------------------------------------------------------------------
	// Selection
	// ---------------------------------------------------------------------

	/// Ids of the rows on the current page
	pub fn page_ids(&self) -> Vec<String> {
		self.visible_rows().iter().map(|row| row.row_id()).collect()
	}

	fn require_on_page(&self, id: &str) -> Result<()> {
		if self.page_ids().iter().any(|page_id| page_id == id) {
			Ok(())
		} else {
			Err(TableError::RowNotVisible(id.to_string()))
		}
	}

	/// Flips one row checkbox and returns the new state
	pub fn toggle_row(&mut self, id: &str) -> Result<bool> {
		self.require_on_page(id)?;
		Ok(self.selection.toggle(id))
	}

	/// Checks one row on the current page
	pub fn select_row(&mut self, id: &str) -> Result<()> {
		self.require_on_page(id)?;
		self.selection.insert(id);
		Ok(())
	}

	/// Unchecks one row
	pub fn deselect_row(&mut self, id: &str) {
		self.selection.remove(id);
	}

	/// Header checkbox click for the current page
	pub fn toggle_select_all(&mut self) -> CheckState {
		let page_ids = self.page_ids();
		self.selection.toggle_all(&page_ids)
	}

	/// Unchecks every row
	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Checked row ids, sorted
	pub fn selected_ids(&self) -> Vec<String> {
		self.selection.selected()
	}

	/// Header checkbox state for the current page
	pub fn header_checkbox(&self) -> CheckState {
		self.selection.header_state(&self.page_ids())
	}

	// ---------------------------------------------------------------------
	// Derived rows
	// ---------------------------------------------------------------------

	fn matches(&self, row: &R, query: Option<&str>, visible: &[&dyn Column<Row = R>]) -> bool {
		if let Some(query) = query
			&& !visible
				.iter()
				.any(|column| contains_ignore_case(&column.render(row), query))
		{
			return false;
		}

		for (field, needle) in &self.filters {
			let Some(column) = self.column(field) else {
				continue;
			};
			if !contains_ignore_case(&column.render(row), &needle.to_lowercase()) {
				return false;
			}
		}

		for (section, values) in self.selection_filters.iter() {
			if values.is_empty() {
				continue;
			}
			let Some(column) = self.column(section) else {
				continue;
			};
			if !column.filterable() {
				continue;
			}
			if !values.contains(&column.render(row)) {
				return false;
			}
		}

		true
	}

	/// Indices of matching rows, sorted
	fn matching_indices(&self) -> Vec<usize> {
		let query = self.search.as_ref().map(|q| q.to_lowercase());
		let visible = self.visible_columns();

		let mut indices: Vec<usize> = self
			.rows
			.iter()
			.enumerate()
			.filter(|(_, row)| self.matches(row, query.as_deref(), &visible))
			.map(|(index, _)| index)
			.collect();

		if let Some(sort) = &self.sort
			&& let Some(column) = self.column(&sort.field)
		{
			let keys: Vec<_> = indices
				.iter()
				.map(|&index| column.value(&self.rows[index]))
				.collect();
			let mut order: Vec<usize> = (0..indices.len()).collect();
			// sort_by is stable: equal keys keep insertion order in both directions
			order.sort_by(|&a, &b| {
				let ordering = keys[a].compare(&keys[b]);
				match sort.order {
					SortOrder::Ascending => ordering,
					SortOrder::Descending => ordering.reverse(),
				}
			});
			indices = order.into_iter().map(|k| indices[k]).collect();
		}

		indices
	}

	fn page_slice(&self, matching: &[usize]) -> Vec<usize> {
		if self.server_paged {
			return matching.to_vec();
		}
		let start = self.pagination.start_index().min(matching.len());
		let end = self.pagination.end_index().min(matching.len()).max(start);
		matching[start..end].to_vec()
	}

	fn refresh(&mut self) {
		let matching = self.matching_indices();
		if !self.server_paged {
			self.pagination.set_total_items(matching.len());
		}
		let page_ids: Vec<String> = self
			.page_slice(&matching)
			.into_iter()
			.map(|index| self.rows[index].row_id())
			.collect();
		let dropped = self.selection.retain_visible(&page_ids);
		if !dropped.is_empty() {
			debug!(dropped = dropped.len(), "selection pruned to current page");
		}
	}

	/// Number of rows matching search and filters
	pub fn filtered_rows_count(&self) -> usize {
		self.matching_indices().len()
	}

	/// Rows of the current page, sorted
	pub fn visible_rows(&self) -> Vec<&R> {
		let matching = self.matching_indices();
		self.page_slice(&matching)
			.into_iter()
			.map(|index| &self.rows[index])
			.collect()
	}

	// ---------------------------------------------------------------------
	// Export and render
	// ---------------------------------------------------------------------

	/// Exports visible columns of the matching rows
	///
	/// Sort and filters always apply. The scope in `options` (or, when unset,
	/// the table's configured scope) decides between all matching rows and
	/// the current page.
	pub fn export(&self, options: &ExportOptions) -> Result<ExportResult> {
		let scope = options.scope.unwrap_or(self.settings.export_scope);
		let matching = self.matching_indices();
		let indices = match scope {
			ExportScope::AllMatching => matching,
			ExportScope::CurrentPage => self.page_slice(&matching),
		};

		let columns = self.visible_columns();
		let headers: Vec<String> = columns.iter().map(|c| c.header().to_string()).collect();
		let cells: Vec<Vec<String>> = indices
			.iter()
			.map(|&index| {
				let row = &self.rows[index];
				columns.iter().map(|c| c.render(row)).collect()
			})
			.collect();

		let result = export::write(options, &headers, &cells)?;
		info!(
			format = ?options.format,
			?scope,
			rows = result.row_count,
			columns = headers.len(),
			"table exported"
		);
		Ok(result)
	}

	/// Render output for the current state
	pub fn render(&self) -> TableView {
		let columns = self.visible_columns();
		let headers = columns
			.iter()
			.map(|column| HeaderView {
				name: column.name().to_string(),
				label: column.header().to_string(),
				sortable: column.sortable(),
				sort: self
					.sort
					.as_ref()
					.filter(|sort| sort.field == column.name())
					.map(|sort| sort.order),
				width: column.width(),
				align: column.align(),
				css_classes: column.css_classes().to_string(),
			})
			.collect();

		let matching = self.matching_indices();
		let rows: Vec<RowView> = self
			.page_slice(&matching)
			.into_iter()
			.map(|index| {
				let row = &self.rows[index];
				let id = row.row_id();
				RowView {
					selected: self.selection.is_selected(&id),
					cells: columns.iter().map(|c| c.render(row)).collect(),
					id,
				}
			})
			.collect();

		let page_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
		let body = if rows.is_empty() {
			TableBody::Empty(self.empty_state.clone())
		} else {
			TableBody::Rows(rows)
		};

		TableView {
			headers,
			body,
			select_all: self.selection.header_state(&page_ids),
			page: self.pagination.info(),
			sort: self.sort.clone(),
			search: self.search.clone(),
		}
	}
}

impl<R: TableRow> Default for SimpleTable<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: TableRow> Table for SimpleTable<R> {
	type Row = R;

	fn columns(&self) -> &[Box<dyn Column<Row = R>>] {
		SimpleTable::columns(self)
	}

	fn rows(&self) -> &[R] {
		SimpleTable::rows(self)
	}

	fn total_rows(&self) -> usize {
		SimpleTable::total_rows(self)
	}

	fn filtered_rows_count(&self) -> usize {
		SimpleTable::filtered_rows_count(self)
	}

	fn visible_rows(&self) -> Vec<&R> {
		SimpleTable::visible_rows(self)
	}

	fn total_pages(&self) -> usize {
		SimpleTable::total_pages(self)
	}

	fn render(&self) -> TableView {
		SimpleTable::render(self)
	}
}

impl<R> std::fmt::Debug for SimpleTable<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SimpleTable")
			.field("rows", &self.rows.len())
			.field("columns", &self.columns)
			.field("hidden", &self.hidden)
			.field("sort", &self.sort)
			.field("search", &self.search)
			.field("pagination", &self.pagination)
			.field("selected", &self.selection.len())
			.finish_non_exhaustive()
	}
}
