//! Serializable form state for client-side rendering
//!
//! ```mermaid
//! flowchart LR
//!     Form["Form<br/>(descriptors, callbacks)"] -->|"to_metadata()"| FormMetadata["FormMetadata<br/>(plain data)"]
//!     Form -->|"render()"| FormView["FormView<br/>(visible fields only)"]
//!     FormMetadata --> Client["Client renderer"]
//!     FormView --> Client
//! ```

use crate::field::{GridSpan, Widget};
use crate::form::Form;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One field as the client sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
	/// Field name
	pub name: String,
	/// Label
	pub label: String,
	/// Widget
	pub widget: Widget,
	/// Whether the field is required
	pub required: bool,
	/// Help text
	pub help_text: Option<String>,
	/// Placeholder
	pub placeholder: Option<String>,
	/// Grid span
	pub grid: GridSpan,
	/// Whether the field is shown
	pub visible: bool,
	/// Current value
	pub value: Value,
	/// Recorded errors
	#[serde(default)]
	pub errors: Vec<String>,
}

/// Full form state including hidden fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
	/// Every field in declaration order
	pub fields: Vec<FieldMetadata>,
	/// Starting values
	pub initial: HashMap<String, Value>,
	/// Recorded errors keyed by field name
	pub errors: HashMap<String, Vec<String>>,
	/// Submission error banner
	pub banner: Option<String>,
	/// Whether any visible value changed
	pub is_dirty: bool,
}

/// What a modal draws: visible fields and the banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormView {
	/// Visible fields in declaration order
	pub fields: Vec<FieldMetadata>,
	/// Submission error banner
	pub banner: Option<String>,
	/// Whether the submit button should be enabled
	pub can_submit: bool,
}

/// Extension trait for Form to extract metadata
pub trait FormExt {
	/// Extract serializable metadata from the form
	///
	/// # Examples
	///
	/// ```
	/// use campus_forms::{FieldDescriptor, FieldKind, Form, FormExt};
	/// use std::collections::HashMap;
	///
	/// let form = Form::from_descriptors(
	///     vec![FieldDescriptor::new("email", "Email", FieldKind::Email)],
	///     HashMap::new(),
	/// )
	/// .unwrap();
	///
	/// let metadata = form.to_metadata();
	/// assert_eq!(metadata.fields.len(), 1);
	/// assert_eq!(metadata.fields[0].name, "email");
	/// ```
	fn to_metadata(&self) -> FormMetadata;
}

fn field_metadata(form: &Form) -> impl Iterator<Item = FieldMetadata> + '_ {
	form.fields().iter().map(|field| FieldMetadata {
		name: field.name.clone(),
		label: field.label.clone(),
		widget: field.widget(),
		required: field.required,
		help_text: field.help_text.clone(),
		placeholder: field.placeholder.clone(),
		grid: field.grid,
		visible: form.is_visible(&field.name),
		value: form.value(&field.name).cloned().unwrap_or(Value::Null),
		errors: form.field_errors(&field.name).to_vec(),
	})
}

impl FormExt for Form {
	fn to_metadata(&self) -> FormMetadata {
		FormMetadata {
			fields: field_metadata(self).collect(),
			initial: self.initial().clone(),
			errors: self.errors().clone(),
			banner: self.submit_error().map(str::to_string),
			is_dirty: self.is_dirty(),
		}
	}
}

impl Form {
	/// Render output for the current state
	pub fn render(&self) -> FormView {
		FormView {
			fields: field_metadata(self).filter(|f| f.visible).collect(),
			banner: self.submit_error().map(str::to_string),
			can_submit: !self.is_closed(),
		}
	}
}
