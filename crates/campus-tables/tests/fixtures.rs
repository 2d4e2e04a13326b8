//! Common test fixtures for campus-tables tests

#![allow(dead_code)]

use campus_tables::column::{BaseColumn, ValueColumn};
use campus_tables::{SimpleTable, TableRow};
use chrono::NaiveDate;
use rstest::*;

/// Course row used across table tests
#[derive(Debug, Clone, PartialEq)]
pub struct TestCourse {
	pub id: u32,
	pub title: String,
	pub instructor: String,
	pub level: String,
	pub price: f64,
	pub published: bool,
	pub created_at: Option<NaiveDate>,
}

impl TableRow for TestCourse {
	fn row_id(&self) -> String {
		self.id.to_string()
	}
}

/// Builds a course with derived defaults
pub fn course(id: u32, title: &str, level: &str, price: f64) -> TestCourse {
	TestCourse {
		id,
		title: title.to_string(),
		instructor: format!("Instructor {}", id),
		level: level.to_string(),
		price,
		published: id % 2 == 1,
		created_at: NaiveDate::from_ymd_opt(2024, 1, id.clamp(1, 28)),
	}
}

/// Fixture providing sample courses for testing
#[fixture]
pub fn sample_courses() -> Vec<TestCourse> {
	vec![
		TestCourse {
			id: 1,
			title: "Advanced React".to_string(),
			instructor: "Alice".to_string(),
			level: "advanced".to_string(),
			price: 49.0,
			published: true,
			created_at: NaiveDate::from_ymd_opt(2024, 1, 15),
		},
		TestCourse {
			id: 2,
			title: "Node.js Masterclass".to_string(),
			instructor: "Bob".to_string(),
			level: "intermediate".to_string(),
			price: 120.5,
			published: false,
			created_at: NaiveDate::from_ymd_opt(2024, 2, 20),
		},
		TestCourse {
			id: 3,
			title: "Rust, the \"fun\" way".to_string(),
			instructor: "Charlie".to_string(),
			level: "beginner".to_string(),
			price: 9.99,
			published: true,
			created_at: None,
		},
	]
}

/// Twenty-five courses with ids 1..=25 in insertion order
#[fixture]
pub fn many_courses() -> Vec<TestCourse> {
	(1..=25)
		.map(|id| course(id, &format!("Lesson {}", id), "beginner", f64::from(id)))
		.collect()
}

/// Adds the standard column set to a table
pub fn add_course_columns(table: &mut SimpleTable<TestCourse>) {
	// Add ID column
	table.add_column(Box::new(BaseColumn::new("id", "ID", |c: &TestCourse| {
		c.id.to_string()
	})));

	// Add title column (collated text)
	table.add_column(Box::new(ValueColumn::text("title", "Title", |c: &TestCourse| {
		c.title.clone()
	})));

	// Add instructor column
	table.add_column(Box::new(BaseColumn::new(
		"instructor",
		"Instructor",
		|c: &TestCourse| c.instructor.clone(),
	)));

	// Add level column (structured filter target)
	table.add_column(Box::new(BaseColumn::new("level", "Level", |c: &TestCourse| {
		c.level.clone()
	})));

	// Add price column (numeric)
	table.add_column(Box::new(ValueColumn::number("price", "Price", |c: &TestCourse| {
		c.price
	})));

	// Add published column (boolean, not filterable)
	table.add_column(Box::new(
		ValueColumn::boolean("published", "Published", |c: &TestCourse| c.published)
			.filterable(false),
	));

	// Add created_at column (date)
	table.add_column(Box::new(ValueColumn::date(
		"created_at",
		"Created At",
		|c: &TestCourse| c.created_at,
	)));
}

/// Fixture providing a table with columns configured
#[fixture]
pub fn course_table(sample_courses: Vec<TestCourse>) -> SimpleTable<TestCourse> {
	let mut table = SimpleTable::with_rows(sample_courses);
	add_course_columns(&mut table);
	table
}

/// Fixture providing a 25-row table with the default page size
#[fixture]
pub fn paged_table(many_courses: Vec<TestCourse>) -> SimpleTable<TestCourse> {
	let mut table = SimpleTable::with_rows(many_courses);
	add_course_columns(&mut table);
	table
}

/// Fixture providing empty table
#[fixture]
pub fn empty_table() -> SimpleTable<TestCourse> {
	SimpleTable::new()
}
