//! Field descriptors
//!
//! A [`FieldDescriptor`] is plain configuration: what kind of input to show,
//! how to validate it and which other field it depends on. The [`Form`]
//! owns the values.
//!
//! [`Form`]: crate::form::Form

use crate::rules::{ConfiguredRule, Rule};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Current values keyed by field name
pub type FormValues = HashMap<String, Value>;

/// Callback run after a field's value changes
///
/// Receives the new value and all current values and returns the effects to
/// apply to other fields.
pub type OnChange = Arc<dyn Fn(&Value, &FormValues) -> Vec<FieldEffect> + Send + Sync>;

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	/// Submitted value
	pub value: String,
	/// Displayed label
	pub label: String,
}

impl SelectOption {
	/// Creates an option
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// Widget used to render a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
	/// Single-line text input
	TextInput,
	/// Email input
	EmailInput,
	/// Masked password input
	PasswordInput,
	/// Multi-line text area
	TextArea,
	/// Numeric input
	NumberInput {
		/// Lower bound
		min: Option<f64>,
		/// Upper bound
		max: Option<f64>,
		/// Step
		step: Option<f64>,
	},
	/// Date picker (`YYYY-MM-DD`)
	DatePicker,
	/// Time picker (`HH:MM[:SS]`)
	TimePicker,
	/// Select box
	Select {
		/// Choices
		choices: Vec<SelectOption>,
		/// Multi-select
		multiple: bool,
	},
	/// Checkbox
	CheckboxInput,
	/// File upload
	FileInput {
		/// Whether more than one file is accepted
		multiple: bool,
		/// Accepted extensions
		accept: Vec<String>,
	},
	/// Rich-text editor
	RichTextEditor,
	/// Repeatable tag input
	TagInput,
}

/// Kind of a field; decides the widget, the empty value and the implied checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
	/// Free text
	Text,
	/// Email address
	Email,
	/// Password
	Password,
	/// Multi-line text
	TextArea,
	/// Number with optional bounds and step
	Number {
		/// Lower bound
		min: Option<f64>,
		/// Upper bound
		max: Option<f64>,
		/// Step from `min` (or zero)
		step: Option<f64>,
	},
	/// Calendar date
	Date,
	/// Time of day
	Time,
	/// One or many values from a fixed list
	Select {
		/// Choices
		options: Vec<SelectOption>,
		/// Multi-select
		multiple: bool,
	},
	/// Boolean flag
	Checkbox,
	/// Uploaded files, as `{ "filename", "size" }` objects
	File {
		/// Maximum number of files
		max_files: usize,
		/// Maximum size of each file in KiB
		max_size_kb: Option<u64>,
		/// Accepted extensions (`.pdf`, `png`); empty accepts all
		accept: Vec<String>,
	},
	/// Rich text (HTML produced by an external editor)
	TextEditor,
	/// List of short strings
	MultiText,
}

impl FieldKind {
	/// Number field without constraints
	pub fn number() -> Self {
		Self::Number {
			min: None,
			max: None,
			step: None,
		}
	}

	/// Single-select field
	pub fn select(options: Vec<SelectOption>) -> Self {
		Self::Select {
			options,
			multiple: false,
		}
	}

	/// Multi-select field
	pub fn multi_select(options: Vec<SelectOption>) -> Self {
		Self::Select {
			options,
			multiple: true,
		}
	}

	/// Single-file upload without constraints
	pub fn file() -> Self {
		Self::File {
			max_files: 1,
			max_size_kb: None,
			accept: Vec::new(),
		}
	}

	/// Widget for this kind
	pub fn widget(&self) -> Widget {
		match self {
			Self::Text => Widget::TextInput,
			Self::Email => Widget::EmailInput,
			Self::Password => Widget::PasswordInput,
			Self::TextArea => Widget::TextArea,
			Self::Number { min, max, step } => Widget::NumberInput {
				min: *min,
				max: *max,
				step: *step,
			},
			Self::Date => Widget::DatePicker,
			Self::Time => Widget::TimePicker,
			Self::Select { options, multiple } => Widget::Select {
				choices: options.clone(),
				multiple: *multiple,
			},
			Self::Checkbox => Widget::CheckboxInput,
			Self::File {
				max_files, accept, ..
			} => Widget::FileInput {
				multiple: *max_files > 1,
				accept: accept.clone(),
			},
			Self::TextEditor => Widget::RichTextEditor,
			Self::MultiText => Widget::TagInput,
		}
	}

	/// Value of an untouched field of this kind
	pub fn empty_value(&self) -> Value {
		match self {
			Self::Checkbox => Value::Bool(false),
			Self::Number { .. } => Value::Null,
			Self::Select { multiple: true, .. } | Self::MultiText => json!([]),
			Self::File { max_files, .. } if *max_files > 1 => json!([]),
			Self::File { .. } => Value::Null,
			_ => Value::String(String::new()),
		}
	}

	/// Whether a value counts as "not filled in" for this kind
	///
	/// An unchecked checkbox is empty, so a required checkbox must be ticked.
	pub fn is_empty(&self, value: &Value) -> bool {
		match value {
			Value::Null => true,
			Value::Bool(checked) => matches!(self, Self::Checkbox) && !checked,
			Value::String(s) => s.trim().is_empty(),
			Value::Array(items) => items.is_empty(),
			Value::Object(map) => map.is_empty(),
			Value::Number(_) => false,
		}
	}
}

/// Column span of a field in the form grid (1 to 12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridSpan(u8);

impl GridSpan {
	/// Number of grid columns
	pub const COLUMNS: u8 = 12;

	/// Span clamped to `1..=12`
	pub fn new(columns: u8) -> Self {
		Self(columns.clamp(1, Self::COLUMNS))
	}

	/// Full row
	pub fn full() -> Self {
		Self(Self::COLUMNS)
	}

	/// Half row
	pub fn half() -> Self {
		Self(Self::COLUMNS / 2)
	}

	/// Third of a row
	pub fn third() -> Self {
		Self(Self::COLUMNS / 3)
	}

	/// Columns spanned
	pub fn columns(&self) -> u8 {
		self.0
	}
}

impl Default for GridSpan {
	fn default() -> Self {
		Self::full()
	}
}

/// Effect of one field's change on another field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "field", rename_all = "snake_case")]
pub enum FieldEffect {
	/// Hide the named field
	Hide(String),
	/// Undo an earlier `Hide`
	Show(String),
	/// Reset the named field to its empty value
	Reset(String),
}

/// Declarative description of one form field
///
/// # Examples
///
/// ```
/// use campus_forms::{FieldDescriptor, FieldKind, GridSpan, Rule};
///
/// let field = FieldDescriptor::new("title", "Title", FieldKind::Text)
///     .required()
///     .rule(Rule::MinLength(3))
///     .grid(GridSpan::half())
///     .placeholder("e.g. Advanced React");
///
/// assert!(field.required);
/// assert_eq!(field.rules.len(), 1);
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
	/// Field name; dots build nested payload objects
	pub name: String,
	/// Label used in the UI and in messages
	pub label: String,
	/// Kind
	pub kind: FieldKind,
	/// Whether an empty value blocks submission
	pub required: bool,
	/// Rules checked on non-empty values, in order
	pub rules: Vec<ConfiguredRule>,
	/// Field that must be visible and filled for this one to show
	pub depends_on: Option<String>,
	/// Effects to run after this field changes
	pub on_change: Option<OnChange>,
	/// Grid span
	pub grid: GridSpan,
	/// Starting value in create mode
	pub default: Option<Value>,
	/// Help text shown under the input
	pub help_text: Option<String>,
	/// Placeholder text
	pub placeholder: Option<String>,
}

impl FieldDescriptor {
	/// Creates an optional field with no rules
	pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			kind,
			required: false,
			rules: Vec::new(),
			depends_on: None,
			on_change: None,
			grid: GridSpan::default(),
			default: None,
			help_text: None,
			placeholder: None,
		}
	}

	/// Marks the field required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Adds a rule with its default message
	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(ConfiguredRule::new(rule));
		self
	}

	/// Adds a rule with a custom message
	pub fn rule_with_message(mut self, rule: Rule, message: impl Into<String>) -> Self {
		self.rules.push(ConfiguredRule::new(rule).with_message(message));
		self
	}

	/// Shows this field only while `target` is visible and filled
	pub fn depends_on(mut self, target: impl Into<String>) -> Self {
		self.depends_on = Some(target.into());
		self
	}

	/// Sets the change callback
	pub fn on_change<F>(mut self, callback: F) -> Self
	where
		F: Fn(&Value, &FormValues) -> Vec<FieldEffect> + Send + Sync + 'static,
	{
		self.on_change = Some(Arc::new(callback));
		self
	}

	/// Sets the grid span
	pub fn grid(mut self, grid: GridSpan) -> Self {
		self.grid = grid;
		self
	}

	/// Sets the create-mode default
	pub fn default_value(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	/// Sets help text
	pub fn help_text(mut self, text: impl Into<String>) -> Self {
		self.help_text = Some(text.into());
		self
	}

	/// Sets placeholder text
	pub fn placeholder(mut self, text: impl Into<String>) -> Self {
		self.placeholder = Some(text.into());
		self
	}

	/// Widget for this field
	pub fn widget(&self) -> Widget {
		self.kind.widget()
	}

	/// Value the field starts with in create mode
	pub fn initial_value(&self) -> Value {
		self.default
			.clone()
			.unwrap_or_else(|| self.kind.empty_value())
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("kind", &self.kind)
			.field("required", &self.required)
			.field("rules", &self.rules)
			.field("depends_on", &self.depends_on)
			.field("on_change", &self.on_change.is_some())
			.field("grid", &self.grid)
			.finish_non_exhaustive()
	}
}
