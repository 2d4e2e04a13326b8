//! Pagination functionality for tables

use serde::{Deserialize, Serialize};

/// Pagination state
///
/// Pages are 1-indexed. The current page is kept within
/// `1..=max(total_pages, 1)` whenever the item count changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// Number of items per page
	pub per_page: usize,
	/// Current page number (1-indexed)
	pub current_page: usize,
	/// Total number of items
	pub total_items: usize,
}

impl Pagination {
	/// Creates a new pagination configuration
	///
	/// # Arguments
	///
	/// * `per_page` - Number of items per page (0 is treated as 1)
	pub fn new(per_page: usize) -> Self {
		Self {
			per_page: per_page.max(1),
			current_page: 1,
			total_items: 0,
		}
	}

	/// Returns the total number of pages
	pub fn total_pages(&self) -> usize {
		if self.total_items == 0 {
			0
		} else {
			self.total_items.div_ceil(self.per_page)
		}
	}

	/// Returns the start index for the current page (0-indexed)
	pub fn start_index(&self) -> usize {
		(self.current_page.saturating_sub(1)) * self.per_page
	}

	/// Returns the end index for the current page (exclusive, 0-indexed)
	pub fn end_index(&self) -> usize {
		(self.start_index() + self.per_page).min(self.total_items)
	}

	/// Returns true when a previous page exists
	pub fn has_previous(&self) -> bool {
		self.current_page > 1
	}

	/// Returns true when a next page exists
	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages()
	}

	/// Moves to the next page if available
	pub fn next_page(&mut self) -> bool {
		if self.has_next() {
			self.current_page += 1;
			true
		} else {
			false
		}
	}

	/// Moves to the previous page if available
	pub fn prev_page(&mut self) -> bool {
		if self.has_previous() {
			self.current_page -= 1;
			true
		} else {
			false
		}
	}

	/// Sets the current page, clamped to the valid range
	pub fn set_page(&mut self, page: usize) {
		self.current_page = page.max(1).min(self.total_pages().max(1));
	}

	/// Updates the item count and re-clamps the current page
	pub fn set_total_items(&mut self, total_items: usize) {
		self.total_items = total_items;
		let page = self.current_page;
		self.set_page(page);
	}

	/// Changes the page size and returns to the first page
	pub fn set_per_page(&mut self, per_page: usize) {
		self.per_page = per_page.max(1);
		self.current_page = 1;
	}

	/// Snapshot for page controls
	pub fn info(&self) -> PageInfo {
		let first_item = if self.total_items == 0 {
			0
		} else {
			self.start_index() + 1
		};
		PageInfo {
			page: self.current_page,
			per_page: self.per_page,
			total_items: self.total_items,
			total_pages: self.total_pages(),
			has_previous: self.has_previous(),
			has_next: self.has_next(),
			first_item,
			last_item: self.end_index(),
		}
	}
}

impl Default for Pagination {
	fn default() -> Self {
		Self::new(crate::settings::DEFAULT_PAGE_SIZE)
	}
}

/// Page controls snapshot
///
/// `has_previous` and `has_next` drive the disabled state of the
/// previous/next buttons at the range boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
	/// Current page (1-indexed)
	pub page: usize,
	/// Page size
	pub per_page: usize,
	/// Number of matching items
	pub total_items: usize,
	/// Number of pages
	pub total_pages: usize,
	/// Whether the previous control is enabled
	pub has_previous: bool,
	/// Whether the next control is enabled
	pub has_next: bool,
	/// 1-based index of the first item shown (0 when empty)
	pub first_item: usize,
	/// 1-based index of the last item shown (0 when empty)
	pub last_item: usize,
}

/// A server-paged API response: `{ data, total, page, limit }`
///
/// # Examples
///
/// ```
/// use campus_tables::PageResponse;
///
/// let response: PageResponse<String> = serde_json::from_str(
///     r#"{"data": ["a", "b"], "total": 12, "page": 2, "limit": 2}"#,
/// ).unwrap();
/// let pagination = response.pagination();
/// assert_eq!(pagination.current_page, 2);
/// assert_eq!(pagination.total_pages(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
	/// Rows of the current page
	pub data: Vec<T>,
	/// Total number of matching rows on the server
	pub total: usize,
	/// Current page (1-indexed)
	pub page: usize,
	/// Page size used by the server
	pub limit: usize,
}

impl<T> PageResponse<T> {
	/// Maps the server paging fields onto [`Pagination`]
	pub fn pagination(&self) -> Pagination {
		let mut pagination = Pagination::new(self.limit);
		pagination.set_total_items(self.total);
		pagination.set_page(self.page);
		pagination
	}

	/// Splits the response into rows and pagination state
	pub fn into_parts(self) -> (Vec<T>, Pagination) {
		let pagination = self.pagination();
		(self.data, pagination)
	}
}

/// Page a server-paged table wants from its data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
	/// Requested page (1-indexed)
	pub page: usize,
	/// Requested page size
	pub limit: usize,
}
