//! The column trait and the text-accessor column

use crate::cell::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Horizontal alignment of a column's cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
	/// Left aligned (text)
	#[default]
	Left,
	/// Centered (flags, icons)
	Center,
	/// Right aligned (amounts, counts)
	Right,
}

/// One column of an admin table
///
/// The rendered text is what the cell shows, what search and column filters
/// match against, and what exports write. [`Column::value`] is only used for
/// ordering.
pub trait Column: Debug {
	/// Row type the column reads
	type Row;

	/// Key used by sort, filter, visibility and the query string
	fn name(&self) -> &str;

	/// Header label
	fn header(&self) -> &str;

	/// Cell text for `row`
	fn render(&self, row: &Self::Row) -> String;

	/// Sort key for `row`; text columns sort by their cell text
	fn value(&self, row: &Self::Row) -> CellValue {
		CellValue::Text(self.render(row))
	}

	/// Whether clicking the header sorts
	fn sortable(&self) -> bool {
		true
	}

	/// Whether the column accepts text and sidebar filters
	fn filterable(&self) -> bool {
		true
	}

	/// Extra classes for the cells, space separated
	fn css_classes(&self) -> &str {
		""
	}

	/// Fixed width in pixels, if any
	fn width(&self) -> Option<u16> {
		None
	}

	/// Cell alignment
	fn align(&self) -> Alignment {
		Alignment::Left
	}
}

/// Column whose cell text comes from a closure
///
/// # Example
///
/// ```rust
/// use campus_tables::column::{Alignment, BaseColumn, Column};
///
/// #[derive(Debug)]
/// struct Instructor {
///     email: String,
/// }
///
/// let email = BaseColumn::new("email", "Email", |i: &Instructor| i.email.clone())
///     .sortable(false)
///     .align(Alignment::Left);
/// assert!(!Column::sortable(&email));
/// ```
pub struct BaseColumn<R, F>
where
	F: Fn(&R) -> String,
{
	name: String,
	header: String,
	extractor: F,
	sortable: bool,
	filterable: bool,
	css_classes: String,
	width: Option<u16>,
	align: Alignment,
	_phantom: std::marker::PhantomData<R>,
}

impl<R, F> BaseColumn<R, F>
where
	F: Fn(&R) -> String,
{
	/// Column named `name` with header label `header`
	pub fn new(name: impl Into<String>, header: impl Into<String>, extractor: F) -> Self {
		Self {
			name: name.into(),
			header: header.into(),
			extractor,
			sortable: true,
			filterable: true,
			css_classes: String::new(),
			width: None,
			align: Alignment::Left,
			_phantom: std::marker::PhantomData,
		}
	}

	/// Enables or disables header sorting
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Enables or disables filtering
	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = filterable;
		self
	}

	/// Cell classes
	pub fn css_classes(mut self, css_classes: impl Into<String>) -> Self {
		self.css_classes = css_classes.into();
		self
	}

	/// Fixed width in pixels
	pub fn width(mut self, width: u16) -> Self {
		self.width = Some(width);
		self
	}

	/// Cell alignment
	pub fn align(mut self, align: Alignment) -> Self {
		self.align = align;
		self
	}
}

impl<R, F> Debug for BaseColumn<R, F>
where
	F: Fn(&R) -> String,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BaseColumn")
			.field("name", &self.name)
			.field("header", &self.header)
			.field("sortable", &self.sortable)
			.field("filterable", &self.filterable)
			.field("width", &self.width)
			.field("align", &self.align)
			.finish_non_exhaustive()
	}
}

impl<R, F> Column for BaseColumn<R, F>
where
	R: Debug,
	F: Fn(&R) -> String,
{
	type Row = R;

	fn name(&self) -> &str {
		&self.name
	}

	fn header(&self) -> &str {
		&self.header
	}

	fn render(&self, row: &Self::Row) -> String {
		(self.extractor)(row)
	}

	fn sortable(&self) -> bool {
		self.sortable
	}

	fn filterable(&self) -> bool {
		self.filterable
	}

	fn css_classes(&self) -> &str {
		&self.css_classes
	}

	fn width(&self) -> Option<u16> {
		self.width
	}

	fn align(&self) -> Alignment {
		self.align
	}
}
