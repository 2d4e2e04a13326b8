//! Common test fixtures for campus-filters tests

#![allow(dead_code)]

use campus_filters::{FilterOption, FilterSection, FilterSidebar};
use campus_tables::column::{BaseColumn, ValueColumn};
use campus_tables::{FilterSelection, SimpleTable, TableRow};
use rstest::*;

/// Sections of the course catalogue sidebar
#[fixture]
pub fn course_sections() -> Vec<FilterSection> {
	vec![
		FilterSection::new("category", "Category")
			.with_options(vec![
				FilterOption::new("web", "Web Development").with_count(12),
				FilterOption::new("data", "Data Science").with_count(7),
				FilterOption::new("design", "Design").with_count(3),
				FilterOption::new("mobile", "Mobile Development").with_count(5),
			])
			.searchable(),
		FilterSection::new("level", "Level").with_options(vec![
			FilterOption::new("beginner", "Beginner"),
			FilterOption::new("intermediate", "Intermediate"),
			FilterOption::new("advanced", "Advanced"),
		]),
		FilterSection::new("price", "Price").with_options(vec![
			FilterOption::new("free", "Free"),
			FilterOption::new("paid", "Paid"),
		]),
	]
}

/// Fixture providing a sidebar with nothing selected
#[fixture]
pub fn sidebar(course_sections: Vec<FilterSection>) -> FilterSidebar {
	FilterSidebar::new(course_sections, FilterSelection::new()).unwrap()
}

/// Course row used by the table round-trip tests
#[derive(Debug, Clone)]
pub struct CatalogCourse {
	pub id: u32,
	pub title: String,
	pub level: String,
	pub price: f64,
}

impl TableRow for CatalogCourse {
	fn row_id(&self) -> String {
		self.id.to_string()
	}
}

/// Fixture providing a table of 30 courses with 10 per page
///
/// Levels rotate beginner, intermediate, advanced by id.
#[fixture]
pub fn catalog_table() -> SimpleTable<CatalogCourse> {
	let levels = ["beginner", "intermediate", "advanced"];
	let rows = (1..=30)
		.map(|id| CatalogCourse {
			id,
			title: format!("Course {id:02}"),
			level: levels[(id as usize - 1) % 3].to_string(),
			price: f64::from(id) * 10.0,
		})
		.collect();

	let mut table = SimpleTable::with_rows(rows);
	table.add_column(Box::new(ValueColumn::text("title", "Title", |c: &CatalogCourse| {
		c.title.clone()
	})));
	table.add_column(Box::new(BaseColumn::new("level", "Level", |c: &CatalogCourse| {
		c.level.clone()
	})));
	table.add_column(Box::new(ValueColumn::number("price", "Price", |c: &CatalogCourse| {
		c.price
	})));
	table.paginate(1, 10).unwrap();
	table
}
