//! Common test fixtures for campus-forms tests

#![allow(dead_code)]

use campus_forms::{FieldDescriptor, FieldEffect, FieldKind, GridSpan, Rule, SelectOption};
use rstest::*;

/// Countries offered by the course form
pub fn countries() -> Vec<SelectOption> {
	vec![
		SelectOption::new("US", "United States"),
		SelectOption::new("EG", "Egypt"),
		SelectOption::new("FR", "France"),
	]
}

/// Fixture providing the course create/edit fields
#[fixture]
pub fn course_fields() -> Vec<FieldDescriptor> {
	vec![
		FieldDescriptor::new("title", "Course Title", FieldKind::Text)
			.required()
			.rule(Rule::MinLength(3))
			.rule(Rule::MaxLength(80))
			.grid(GridSpan::half()),
		FieldDescriptor::new(
			"price",
			"Price",
			FieldKind::Number {
				min: Some(0.0),
				max: None,
				step: Some(0.01),
			},
		)
		.grid(GridSpan::half()),
		FieldDescriptor::new(
			"level",
			"Level",
			FieldKind::select(vec![
				SelectOption::new("beginner", "Beginner"),
				SelectOption::new("advanced", "Advanced"),
			]),
		)
		.on_change(|value, _| {
			if value == "beginner" {
				vec![FieldEffect::Hide("prerequisites".to_string())]
			} else {
				vec![FieldEffect::Show("prerequisites".to_string())]
			}
		}),
		FieldDescriptor::new("prerequisites", "Prerequisites", FieldKind::MultiText),
		FieldDescriptor::new("location.country", "Country", FieldKind::select(countries())),
		FieldDescriptor::new("location.state", "State", FieldKind::Text)
			.required()
			.depends_on("location.country"),
		FieldDescriptor::new("website", "Website", FieldKind::Text).rule(Rule::Url),
		FieldDescriptor::new(
			"syllabus",
			"Syllabus",
			FieldKind::File {
				max_files: 1,
				max_size_kb: Some(1024),
				accept: vec![".pdf".to_string(), ".docx".to_string()],
			},
		),
		FieldDescriptor::new("publish", "Publish now", FieldKind::Checkbox),
	]
}
