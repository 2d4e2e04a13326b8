mod fixtures;

use async_trait::async_trait;
use campus_forms::payload::{flatten, nest};
use campus_forms::{
	AfterSubmit, FieldDescriptor, FieldKind, Form, FormError, FormExt, FormValues, SubmitHandler,
	SubmitOutcome, handler_fn,
};
use fixtures::*;
use rstest::*;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every payload it receives
#[derive(Default)]
struct RecordingHandler {
	payloads: Mutex<Vec<Value>>,
}

#[async_trait]
impl SubmitHandler for RecordingHandler {
	async fn submit(&self, payload: Value) -> anyhow::Result<()> {
		self.payloads.lock().unwrap().push(payload);
		Ok(())
	}
}

fn new_form(fields: Vec<FieldDescriptor>) -> Form {
	Form::from_descriptors(fields, FormValues::new()).unwrap()
}

fn fill_valid(form: &mut Form) {
	form.set_value("title", json!("Advanced React")).unwrap();
	form.set_value("price", json!(19.99)).unwrap();
	form.set_value("location.country", json!("US")).unwrap();
	form.set_value("location.state", json!("CA")).unwrap();
}

#[rstest]
#[tokio::test]
async fn test_empty_required_field_blocks_submission(course_fields: Vec<FieldDescriptor>) {
	// Arrange
	let mut form = new_form(course_fields);
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let handler = handler_fn(move |_payload| {
		let counter = counter.clone();
		async move {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(())
		}
	});

	// Act
	let outcome = form.submit(&handler).await;

	// Assert
	assert_eq!(outcome, SubmitOutcome::Invalid);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert_eq!(form.field_errors("title"), ["Course Title is required".to_string()]);
	assert!(form.is_touched("title"));
	assert!(form.submit_error().is_none());
}

#[rstest]
fn test_clearing_country_hides_and_resets_state(course_fields: Vec<FieldDescriptor>) {
	// Arrange
	let mut form = new_form(course_fields);
	assert!(!form.is_visible("location.state"));
	form.set_value("location.country", json!("US")).unwrap();
	form.set_value("location.state", json!("CA")).unwrap();
	assert!(form.is_visible("location.state"));

	// Act
	form.set_value("location.country", json!("")).unwrap();

	// Assert
	assert!(!form.is_visible("location.state"));
	assert_eq!(form.value("location.state"), Some(&json!("")));
	assert!(form.field_errors("location.state").is_empty());
}

#[rstest]
fn test_hidden_required_field_is_not_validated(course_fields: Vec<FieldDescriptor>) {
	let mut form = new_form(course_fields);
	form.set_value("title", json!("Rust")).unwrap();

	// location.state is required but hidden while no country is chosen
	assert!(form.validate());
	assert!(form.blur("location.state").unwrap());
	assert!(form.check_field("location.state").is_ok());
}

#[rstest]
fn test_on_change_effect_hides_field(course_fields: Vec<FieldDescriptor>) {
	let mut form = new_form(course_fields);
	form.set_value("prerequisites", json!(["HTML", "CSS"])).unwrap();

	form.set_value("level", json!("beginner")).unwrap();
	assert!(!form.is_visible("prerequisites"));
	assert_eq!(form.value("prerequisites"), Some(&json!([])));

	form.set_value("level", json!("advanced")).unwrap();
	assert!(form.is_visible("prerequisites"));
}

#[rstest]
fn test_blur_validates_single_field(course_fields: Vec<FieldDescriptor>) {
	let mut form = new_form(course_fields);
	form.set_value("title", json!("JS")).unwrap();
	form.set_value("website", json!("not a url")).unwrap();

	assert!(!form.blur("title").unwrap());
	assert_eq!(
		form.field_errors("title"),
		["Course Title must have at least 3 characters".to_string()]
	);
	assert!(form.field_errors("website").is_empty());

	assert!(!form.blur("website").unwrap());
	assert_eq!(form.field_errors("website"), ["Enter a valid URL".to_string()]);
}

#[rstest]
#[case(json!({"filename": "syllabus.PDF", "size": 2048}), None)]
#[case(json!({"filename": "syllabus.exe", "size": 10}), Some("syllabus.exe is not an accepted file type (.pdf, .docx)"))]
#[case(json!({"filename": "syllabus.pdf", "size": 5_000_000}), Some("syllabus.pdf exceeds the maximum size of 1024 KB"))]
#[case(json!([{"filename": "a.pdf"}, {"filename": "b.pdf"}]), Some("Syllabus accepts at most 1 file"))]
fn test_file_constraints(
	course_fields: Vec<FieldDescriptor>,
	#[case] value: Value,
	#[case] error: Option<&str>,
) {
	let mut form = new_form(course_fields);
	form.set_value("syllabus", value).unwrap();

	let valid = form.blur("syllabus").unwrap();

	assert_eq!(valid, error.is_none());
	assert_eq!(
		form.field_errors("syllabus").first().map(String::as_str),
		error
	);
}

#[rstest]
#[tokio::test]
async fn test_submit_builds_nested_payload_without_hidden_fields(
	course_fields: Vec<FieldDescriptor>,
) {
	// Arrange
	let mut form = new_form(course_fields).with_after_submit(AfterSubmit::Keep);
	fill_valid(&mut form);
	form.set_value("prerequisites", json!(["HTML"])).unwrap();
	form.set_value("level", json!("beginner")).unwrap();
	let handler = RecordingHandler::default();

	// Act
	let outcome = form.submit(&handler).await;

	// Assert
	assert_eq!(outcome, SubmitOutcome::Submitted(AfterSubmit::Keep));
	let payloads = handler.payloads.lock().unwrap();
	let payload = &payloads[0];
	assert_eq!(payload["location"], json!({"country": "US", "state": "CA"}));
	assert_eq!(payload["title"], json!("Advanced React"));
	assert!(payload.get("prerequisites").is_none());
	assert_eq!(payload["publish"], json!(false));
	assert!(!form.is_dirty());
	assert!(!form.is_closed());
}

#[rstest]
#[tokio::test]
async fn test_handler_failure_sets_banner_and_keeps_values(course_fields: Vec<FieldDescriptor>) {
	// Arrange
	let mut form = new_form(course_fields);
	fill_valid(&mut form);
	let failing = handler_fn(|_payload| async { Err::<(), _>(anyhow::anyhow!("Server unavailable")) });

	// Act
	let outcome = form.submit(&failing).await;

	// Assert
	assert_eq!(outcome, SubmitOutcome::Failed("Server unavailable".to_string()));
	assert_eq!(form.submit_error(), Some("Server unavailable"));
	assert_eq!(form.value("title"), Some(&json!("Advanced React")));
	assert_eq!(form.render().banner.as_deref(), Some("Server unavailable"));

	// Retrying with a working handler clears the banner and closes the form
	let outcome = form.submit(&RecordingHandler::default()).await;
	assert!(outcome.is_submitted());
	assert!(form.submit_error().is_none());
	assert!(form.is_closed());
	assert_eq!(form.value("title"), Some(&json!("")));
	assert!(!form.render().can_submit);
}

#[rstest]
#[tokio::test]
async fn test_closed_form_does_not_resubmit(course_fields: Vec<FieldDescriptor>) {
	// Arrange
	let mut form = new_form(course_fields);
	fill_valid(&mut form);
	let handler = RecordingHandler::default();
	assert!(form.submit(&handler).await.is_submitted());
	assert!(form.is_closed());
	fill_valid(&mut form);

	// Act
	let outcome = form.submit(&handler).await;

	// Assert
	assert_eq!(outcome, SubmitOutcome::Invalid);
	assert_eq!(handler.payloads.lock().unwrap().len(), 1);

	form.reopen();
	assert!(form.submit(&handler).await.is_submitted());
	assert_eq!(handler.payloads.lock().unwrap().len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_after_submit_reset(course_fields: Vec<FieldDescriptor>) {
	let mut form = new_form(course_fields).with_after_submit(AfterSubmit::Reset);
	fill_valid(&mut form);

	let outcome = form.submit(&RecordingHandler::default()).await;

	assert_eq!(outcome, SubmitOutcome::Submitted(AfterSubmit::Reset));
	assert!(!form.is_closed());
	assert_eq!(form.value("title"), Some(&json!("")));
	assert!(!form.is_visible("location.state"));
	assert!(form.errors().is_empty());
}

#[rstest]
fn test_edit_mode_flattens_entity(course_fields: Vec<FieldDescriptor>) {
	// Arrange
	let entity = json!({
		"id": 42,
		"title": "Node.js Masterclass",
		"price": 120.5,
		"location": {"country": "EG", "state": "Cairo"}
	});

	// Act
	let mut form = Form::for_entity(course_fields, &entity).unwrap();

	// Assert
	assert!(form.is_visible("location.state"));
	assert_eq!(form.value("location.state"), Some(&json!("Cairo")));
	assert!(!form.is_dirty());

	form.set_value("price", json!(99)).unwrap();
	assert!(form.is_dirty());
	form.set_value("price", json!(120.5)).unwrap();
	assert!(!form.is_dirty());
}

#[rstest]
fn test_metadata_reflects_state(course_fields: Vec<FieldDescriptor>) {
	let mut form = new_form(course_fields);
	form.validate();

	let metadata = form.to_metadata();
	let state = metadata
		.fields
		.iter()
		.find(|f| f.name == "location.state")
		.unwrap();
	assert!(!state.visible);
	assert!(state.required);
	assert_eq!(
		metadata.errors.get("title"),
		Some(&vec!["Course Title is required".to_string()])
	);
	assert!(!metadata.is_dirty);
}

#[rstest]
#[case(
	vec![
		FieldDescriptor::new("location", "Location", FieldKind::Text),
		FieldDescriptor::new("location.city", "City", FieldKind::Text),
	],
	FormError::PathConflict { path: "location.city".to_string(), other: "location".to_string() }
)]
#[case(
	vec![FieldDescriptor::new("state", "State", FieldKind::Text).depends_on("country")],
	FormError::UnknownDependency { field: "state".to_string(), target: "country".to_string() }
)]
#[case(
	vec![
		FieldDescriptor::new("a", "A", FieldKind::Text).depends_on("b"),
		FieldDescriptor::new("b", "B", FieldKind::Text).depends_on("a"),
	],
	FormError::DependencyCycle(vec!["a".to_string(), "b".to_string()])
)]
fn test_build_errors(#[case] fields: Vec<FieldDescriptor>, #[case] expected: FormError) {
	let result = Form::from_descriptors(fields, FormValues::new());
	assert_eq!(result.unwrap_err(), expected);
}

mod properties {
	use super::*;
	use proptest::prelude::*;

	fn leaf() -> impl Strategy<Value = Value> {
		prop_oneof![
			"[a-z ]{0,8}".prop_map(Value::String),
			any::<i32>().prop_map(|n| json!(n)),
			any::<bool>().prop_map(Value::Bool),
		]
	}

	fn entity() -> impl Strategy<Value = Value> {
		let inner = prop::collection::btree_map("[a-d]{1,3}", leaf(), 1..4)
			.prop_map(|m| Value::Object(m.into_iter().collect()));
		prop::collection::btree_map("[e-h]{1,3}", prop_oneof![leaf(), inner], 0..6)
			.prop_map(|m| Value::Object(m.into_iter().collect()))
	}

	proptest! {
		#[test]
		fn nest_undoes_flatten(entity in entity()) {
			let flat = flatten(&entity);
			let rebuilt = nest(flat.iter().map(|(k, v)| (k.as_str(), v))).unwrap();
			prop_assert_eq!(rebuilt, entity);
		}
	}
}
