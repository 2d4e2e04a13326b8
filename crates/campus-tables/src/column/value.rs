//! Typed columns with optional custom renderers

use super::base::{Alignment, Column};
use crate::cell::CellValue;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Debug;

type Accessor<R> = Box<dyn Fn(&R) -> CellValue>;
type Renderer<R> = Box<dyn Fn(&R, &CellValue) -> String>;

/// A column that extracts a typed [`CellValue`]
///
/// Sorting uses the typed value (numbers numerically, dates chronologically);
/// display, search and export use the renderer, which defaults to
/// [`CellValue::display`].
///
/// # Example
///
/// ```rust
/// use campus_tables::column::ValueColumn;
/// use campus_tables::Column;
///
/// #[derive(Debug)]
/// struct Plan {
///     price_cents: i64,
/// }
///
/// let price = ValueColumn::number("price", "Price", |p: &Plan| p.price_cents)
///     .render_with(|_, value| match value {
///         campus_tables::CellValue::Number(cents) => format!("${:.2}", cents / 100.0),
///         _ => String::new(),
///     });
///
/// assert_eq!(price.render(&Plan { price_cents: 4999 }), "$49.99");
/// ```
pub struct ValueColumn<R> {
	name: String,
	header: String,
	accessor: Accessor<R>,
	renderer: Option<Renderer<R>>,
	sortable: bool,
	filterable: bool,
	css_classes: String,
	width: Option<u16>,
	align: Alignment,
}

impl<R> ValueColumn<R> {
	/// Creates a column from an accessor returning any [`CellValue`]
	pub fn new<F>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> CellValue + 'static,
	{
		Self {
			name: name.into(),
			header: header.into(),
			accessor: Box::new(accessor),
			renderer: None,
			sortable: true,
			filterable: true,
			css_classes: String::new(),
			width: None,
			align: Alignment::Left,
		}
	}

	/// Text column (collated comparison)
	pub fn text<F>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> String + 'static,
	{
		Self::new(name, header, move |row| CellValue::Text(accessor(row)))
	}

	/// Numeric column, right aligned
	pub fn number<F, N>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> N + 'static,
		N: Into<CellValue>,
	{
		Self::new(name, header, move |row| accessor(row).into()).align(Alignment::Right)
	}

	/// Date column; `None` renders empty and sorts first
	pub fn date<F>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> Option<NaiveDate> + 'static,
	{
		Self::new(name, header, move |row| accessor(row).into())
	}

	/// Date-time column; `None` renders empty and sorts first
	pub fn datetime<F>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> Option<NaiveDateTime> + 'static,
	{
		Self::new(name, header, move |row| accessor(row).into())
	}

	/// Boolean column, centered
	pub fn boolean<F>(name: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&R) -> bool + 'static,
	{
		Self::new(name, header, move |row| CellValue::Bool(accessor(row))).align(Alignment::Center)
	}

	/// Replaces the default renderer
	pub fn render_with<F>(mut self, renderer: F) -> Self
	where
		F: Fn(&R, &CellValue) -> String + 'static,
	{
		self.renderer = Some(Box::new(renderer));
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column is filterable
	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = filterable;
		self
	}

	/// Sets CSS classes for this column
	pub fn css_classes(mut self, css_classes: impl Into<String>) -> Self {
		self.css_classes = css_classes.into();
		self
	}

	/// Sets the preferred width in pixels
	pub fn width(mut self, width: u16) -> Self {
		self.width = Some(width);
		self
	}

	/// Sets the cell alignment
	pub fn align(mut self, align: Alignment) -> Self {
		self.align = align;
		self
	}
}

impl<R> Debug for ValueColumn<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ValueColumn")
			.field("name", &self.name)
			.field("header", &self.header)
			.field("custom_renderer", &self.renderer.is_some())
			.field("sortable", &self.sortable)
			.field("filterable", &self.filterable)
			.field("align", &self.align)
			.finish_non_exhaustive()
	}
}

impl<R> Column for ValueColumn<R> {
	type Row = R;

	fn name(&self) -> &str {
		&self.name
	}

	fn header(&self) -> &str {
		&self.header
	}

	fn render(&self, row: &Self::Row) -> String {
		let value = (self.accessor)(row);
		match &self.renderer {
			Some(renderer) => renderer(row, &value),
			None => value.display(),
		}
	}

	fn value(&self, row: &Self::Row) -> CellValue {
		(self.accessor)(row)
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

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug)]
	struct Enrollment {
		seats: u32,
		starts_on: Option<NaiveDate>,
		published: bool,
	}

	fn enrollment() -> Enrollment {
		Enrollment {
			seats: 120,
			starts_on: NaiveDate::from_ymd_opt(2025, 3, 1),
			published: true,
		}
	}

	#[rstest]
	fn test_number_column_is_right_aligned() {
		let column = ValueColumn::number("seats", "Seats", |e: &Enrollment| e.seats);
		assert_eq!(Column::align(&column), Alignment::Right);
		assert_eq!(column.value(&enrollment()), CellValue::Number(120.0));
		assert_eq!(column.render(&enrollment()), "120");
	}

	#[rstest]
	fn test_date_column_renders_iso_date() {
		let column = ValueColumn::date("starts_on", "Starts", |e: &Enrollment| e.starts_on);
		assert_eq!(column.render(&enrollment()), "2025-03-01");
	}

	#[rstest]
	fn test_missing_date_renders_empty() {
		let column = ValueColumn::date("starts_on", "Starts", |e: &Enrollment| e.starts_on);
		let row = Enrollment {
			starts_on: None,
			..enrollment()
		};
		assert_eq!(column.render(&row), "");
		assert_eq!(column.value(&row), CellValue::Empty);
	}

	#[rstest]
	fn test_custom_renderer_keeps_typed_value() {
		let column = ValueColumn::boolean("published", "Published", |e: &Enrollment| e.published)
			.render_with(|_, value| match value {
				CellValue::Bool(true) => "Yes".to_string(),
				_ => "No".to_string(),
			});

		assert_eq!(column.render(&enrollment()), "Yes");
		assert_eq!(column.value(&enrollment()), CellValue::Bool(true));
		assert_eq!(Column::align(&column), Alignment::Center);
	}
}
