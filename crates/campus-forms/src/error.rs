//! Error types for form definition and field validation

use thiserror::Error;

/// Result type alias for field checks
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type alias for form operations
pub type FormResult<T> = Result<T, FormError>;

/// A single field-level validation failure
///
/// The display text is the message shown under the field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
	/// A required field is empty; carries the field label
	#[error("{0} is required")]
	Required(String),

	/// The value has the wrong shape for the field kind
	#[error("{0}")]
	Invalid(String),

	/// The value failed a rule
	#[error("{0}")]
	Validation(String),
}

impl FieldError {
	/// Required-field error for a label
	pub fn required(label: &str) -> Self {
		Self::Required(label.to_string())
	}
}

/// Errors raised while building or driving a form
///
/// Validation failures are not errors at this level: they are stored per
/// field and block submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
	/// A field failed validation
	#[error("Field error in {field}: {error}")]
	Field {
		/// Field name
		field: String,
		/// The failure
		error: FieldError,
	},

	/// No field with this name
	#[error("Unknown field: {0}")]
	UnknownField(String),

	/// Two descriptors share a name
	#[error("Duplicate field: {0}")]
	DuplicateField(String),

	/// `depends_on` names a field that does not exist
	#[error("Field {field} depends on unknown field {target}")]
	UnknownDependency {
		/// Dependent field
		field: String,
		/// Missing target
		target: String,
	},

	/// `depends_on` edges form a cycle
	#[error("Dependency cycle between fields: {}", .0.join(", "))]
	DependencyCycle(Vec<String>),

	/// One field name is a path prefix of another (`a` and `a.b`)
	#[error("Field path {path} conflicts with {other}")]
	PathConflict {
		/// The longer path
		path: String,
		/// The conflicting prefix
		other: String,
	},

	/// A dotted name with an empty segment
	#[error("Invalid field path: {0}")]
	InvalidPath(String),

	/// A pattern rule failed to compile
	#[error("Invalid pattern {pattern}: {message}")]
	InvalidPattern {
		/// Source pattern
		pattern: String,
		/// Compiler message
		message: String,
	},
}
