//! Validation rules
//!
//! Rules run only on non-empty values; emptiness is handled by the
//! `required` flag (or [`Rule::Required`]). Kind-implied checks run before
//! the configured rules and stop them when the value has the wrong shape.

use crate::error::{FieldError, FieldResult, FormError, FormResult};
use crate::field::{FieldKind, FormValues, SelectOption};
use crate::file;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock};

// Pragmatic email shape: local part, "@", domain with at least one dot.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// HTTP/HTTPS URL with optional port, path, query and fragment.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// Cross-field check: receives the field value and all current values
pub type CustomCheck = Arc<dyn Fn(&Value, &FormValues) -> Result<(), String> + Send + Sync>;

/// A declarative validation rule
#[derive(Clone)]
pub enum Rule {
	/// Value must not be empty
	Required,
	/// Numeric lower bound (inclusive)
	Min(f64),
	/// Numeric upper bound (inclusive)
	Max(f64),
	/// Minimum characters (text) or items (lists)
	MinLength(usize),
	/// Maximum characters (text) or items (lists)
	MaxLength(usize),
	/// Text must match a regular expression
	Pattern {
		/// Compiled expression
		regex: Regex,
		/// Message on mismatch
		message: String,
	},
	/// Text must look like an email address
	Email,
	/// Text must be an http(s) URL
	Url,
	/// Arbitrary check returning an error message
	Custom(CustomCheck),
}

impl Rule {
	/// Compiles a pattern rule
	///
	/// # Examples
	///
	/// ```
	/// use campus_forms::Rule;
	///
	/// assert!(Rule::pattern(r"^[A-Z]{3}\d{3}$", "Use a course code like ABC123").is_ok());
	/// assert!(Rule::pattern("(", "never").is_err());
	/// ```
	pub fn pattern(pattern: &str, message: impl Into<String>) -> FormResult<Self> {
		let regex = Regex::new(pattern).map_err(|e| FormError::InvalidPattern {
			pattern: pattern.to_string(),
			message: e.to_string(),
		})?;
		Ok(Self::Pattern {
			regex,
			message: message.into(),
		})
	}

	/// Wraps a closure as a custom rule
	pub fn custom<F>(check: F) -> Self
	where
		F: Fn(&Value, &FormValues) -> Result<(), String> + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(check))
	}

	fn check(&self, label: &str, value: &Value, values: &FormValues) -> FieldResult<()> {
		match self {
			Self::Required => Ok(()),
			Self::Min(min) => {
				let n = as_number(label, value)?;
				if n < *min {
					return Err(FieldError::Validation(format!(
						"{} must be at least {}",
						label,
						format_number(*min)
					)));
				}
				Ok(())
			}
			Self::Max(max) => {
				let n = as_number(label, value)?;
				if n > *max {
					return Err(FieldError::Validation(format!(
						"{} must be at most {}",
						label,
						format_number(*max)
					)));
				}
				Ok(())
			}
			Self::MinLength(min) => match length(value) {
				Some((len, unit)) if len < *min => Err(FieldError::Validation(format!(
					"{} must have at least {} {}",
					label, min, unit
				))),
				_ => Ok(()),
			},
			Self::MaxLength(max) => match length(value) {
				Some((len, unit)) if len > *max => Err(FieldError::Validation(format!(
					"{} must have at most {} {}",
					label, max, unit
				))),
				_ => Ok(()),
			},
			Self::Pattern { regex, message } => {
				let text = as_text(label, value)?;
				if regex.is_match(text) {
					Ok(())
				} else {
					Err(FieldError::Validation(message.clone()))
				}
			}
			Self::Email => {
				let text = as_text(label, value)?;
				if EMAIL_REGEX.is_match(text.trim()) {
					Ok(())
				} else {
					Err(FieldError::Validation("Enter a valid email address".to_string()))
				}
			}
			Self::Url => {
				let text = as_text(label, value)?;
				if URL_REGEX.is_match(text.trim()) {
					Ok(())
				} else {
					Err(FieldError::Validation("Enter a valid URL".to_string()))
				}
			}
			Self::Custom(check) => check(value, values).map_err(FieldError::Validation),
		}
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Required => f.write_str("Required"),
			Self::Min(n) => f.debug_tuple("Min").field(n).finish(),
			Self::Max(n) => f.debug_tuple("Max").field(n).finish(),
			Self::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
			Self::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
			Self::Pattern { regex, message } => f
				.debug_struct("Pattern")
				.field("regex", &regex.as_str())
				.field("message", message)
				.finish(),
			Self::Email => f.write_str("Email"),
			Self::Url => f.write_str("Url"),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// A rule plus an optional message overriding its default
#[derive(Debug, Clone)]
pub struct ConfiguredRule {
	/// The rule
	pub rule: Rule,
	/// Custom message
	pub message: Option<String>,
}

impl ConfiguredRule {
	/// Rule with its default message
	pub fn new(rule: Rule) -> Self {
		Self {
			rule,
			message: None,
		}
	}

	/// Overrides the message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	fn check(&self, label: &str, value: &Value, values: &FormValues) -> FieldResult<()> {
		self.rule
			.check(label, value, values)
			.map_err(|error| match &self.message {
				Some(message) => FieldError::Validation(message.clone()),
				None => error,
			})
	}

	fn is_required(&self) -> bool {
		matches!(self.rule, Rule::Required)
	}
}

/// Validates one field value
///
/// Returns every failure so the UI can list them; an empty list means valid.
/// An empty value only fails when the field is required.
pub(crate) fn validate_value(
	label: &str,
	kind: &FieldKind,
	required: bool,
	rules: &[ConfiguredRule],
	value: &Value,
	values: &FormValues,
) -> Vec<FieldError> {
	if kind.is_empty(value) {
		let required_rule = rules.iter().find(|r| r.is_required());
		return match (required, required_rule) {
			(_, Some(rule)) => match &rule.message {
				Some(message) => vec![FieldError::Validation(message.clone())],
				None => vec![FieldError::required(label)],
			},
			(true, None) => vec![FieldError::required(label)],
			(false, None) => Vec::new(),
		};
	}

	if let Err(error) = check_kind(label, kind, value) {
		return vec![error];
	}

	rules
		.iter()
		.filter_map(|rule| rule.check(label, value, values).err())
		.collect()
}

/// Checks implied by the field kind
fn check_kind(label: &str, kind: &FieldKind, value: &Value) -> FieldResult<()> {
	match kind {
		FieldKind::Text | FieldKind::Password | FieldKind::TextArea | FieldKind::TextEditor => {
			as_text(label, value).map(|_| ())
		}
		FieldKind::Email => Rule::Email.check(label, value, &FormValues::new()),
		FieldKind::Number { min, max, step } => {
			let n = as_number(label, value)?;
			if let Some(min) = min
				&& n < *min
			{
				return Err(FieldError::Validation(format!(
					"{} must be at least {}",
					label,
					format_number(*min)
				)));
			}
			if let Some(max) = max
				&& n > *max
			{
				return Err(FieldError::Validation(format!(
					"{} must be at most {}",
					label,
					format_number(*max)
				)));
			}
			if let Some(step) = step
				&& *step > 0.0
			{
				let steps = (n - min.unwrap_or(0.0)) / step;
				if (steps - steps.round()).abs() > 1e-9 {
					return Err(FieldError::Validation(format!(
						"{} must be a multiple of {}",
						label,
						format_number(*step)
					)));
				}
			}
			Ok(())
		}
		FieldKind::Date => {
			let text = as_text(label, value)?;
			NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
				.map(|_| ())
				.map_err(|_| FieldError::Invalid(format!("{} must be a date (YYYY-MM-DD)", label)))
		}
		FieldKind::Time => {
			let text = as_text(label, value)?.trim();
			NaiveTime::parse_from_str(text, "%H:%M")
				.or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
				.map(|_| ())
				.map_err(|_| FieldError::Invalid(format!("{} must be a time (HH:MM)", label)))
		}
		FieldKind::Select { options, multiple } => check_select(label, options, *multiple, value),
		FieldKind::Checkbox => match value {
			Value::Bool(_) => Ok(()),
			_ => Err(FieldError::Invalid(format!("{} must be checked or unchecked", label))),
		},
		FieldKind::File {
			max_files,
			max_size_kb,
			accept,
		} => {
			let files = file::parse_files(label, value)?;
			file::check_files(label, &files, *max_files, *max_size_kb, accept)
		}
		FieldKind::MultiText => match value {
			Value::Array(items) if items.iter().all(Value::is_string) => Ok(()),
			_ => Err(FieldError::Invalid(format!("{} must be a list of text values", label))),
		},
	}
}

fn check_select(
	label: &str,
	options: &[SelectOption],
	multiple: bool,
	value: &Value,
) -> FieldResult<()> {
	let is_option = |v: &Value| {
		let candidate = match v {
			Value::String(s) => s.clone(),
			Value::Number(n) => n.to_string(),
			Value::Bool(b) => b.to_string(),
			_ => return false,
		};
		options.iter().any(|o| o.value == candidate)
	};
	let invalid = || FieldError::Invalid(format!("Select a valid choice for {}", label));

	match value {
		Value::Array(items) if multiple => {
			if items.iter().all(is_option) {
				Ok(())
			} else {
				Err(invalid())
			}
		}
		Value::Array(_) => Err(invalid()),
		single if is_option(single) => Ok(()),
		_ => Err(invalid()),
	}
}

fn as_text<'a>(label: &str, value: &'a Value) -> FieldResult<&'a str> {
	value
		.as_str()
		.ok_or_else(|| FieldError::Invalid(format!("{} must be text", label)))
}

fn as_number(label: &str, value: &Value) -> FieldResult<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
		_ => None,
	}
	.ok_or_else(|| FieldError::Invalid(format!("{} must be a number", label)))
}

fn length(value: &Value) -> Option<(usize, &'static str)> {
	match value {
		Value::String(s) => Some((s.chars().count(), "characters")),
		Value::Array(items) => Some((items.len(), "items")),
		_ => None,
	}
}

fn format_number(n: f64) -> String {
	if n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{:.0}", n)
	} else {
		n.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn check(kind: FieldKind, rules: Vec<ConfiguredRule>, value: Value) -> Vec<String> {
		validate_value("Title", &kind, false, &rules, &value, &FormValues::new())
			.into_iter()
			.map(|e| e.to_string())
			.collect()
	}

	#[rstest]
	fn test_required_message_uses_label() {
		let errors = validate_value(
			"Course Title",
			&FieldKind::Text,
			true,
			&[],
			&json!(""),
			&FormValues::new(),
		);
		assert_eq!(errors, vec![FieldError::required("Course Title")]);
		assert_eq!(errors[0].to_string(), "Course Title is required");
	}

	#[rstest]
	fn test_required_rule_custom_message() {
		let rules = vec![ConfiguredRule::new(Rule::Required).with_message("Give it a name")];
		assert_eq!(check(FieldKind::Text, rules, json!(" ")), vec!["Give it a name"]);
	}

	#[rstest]
	fn test_optional_empty_skips_rules() {
		let rules = vec![ConfiguredRule::new(Rule::MinLength(3))];
		assert!(check(FieldKind::Text, rules, json!("")).is_empty());
	}

	#[rstest]
	#[case(Rule::MinLength(3), json!("ab"), "Title must have at least 3 characters")]
	#[case(Rule::MaxLength(2), json!("añb"), "Title must have at most 2 characters")]
	#[case(Rule::Min(5.0), json!(4), "Title must be at least 5")]
	#[case(Rule::Max(9.5), json!("10"), "Title must be at most 9.5")]
	#[case(Rule::Email, json!("not-an-email"), "Enter a valid email address")]
	#[case(Rule::Url, json!("ftp://example.com"), "Enter a valid URL")]
	fn test_rule_default_messages(#[case] rule: Rule, #[case] value: Value, #[case] message: &str) {
		let kind = match value {
			Value::Number(_) => FieldKind::number(),
			_ => FieldKind::Text,
		};
		assert_eq!(check(kind, vec![ConfiguredRule::new(rule)], value), vec![message]);
	}

	#[rstest]
	fn test_length_counts_list_items() {
		let rules = vec![ConfiguredRule::new(Rule::MinLength(2))];
		assert_eq!(
			check(FieldKind::MultiText, rules, json!(["rust"])),
			vec!["Title must have at least 2 items"]
		);
	}

	#[rstest]
	fn test_pattern_and_custom() {
		let pattern = Rule::pattern(r"^[A-Z]{3}\d{3}$", "Use a code like ABC123").unwrap();
		assert_eq!(
			check(FieldKind::Text, vec![ConfiguredRule::new(pattern)], json!("abc")),
			vec!["Use a code like ABC123"]
		);

		let custom = Rule::custom(|value, values| {
			let floor = values.get("min_price").and_then(Value::as_str).unwrap_or("0");
			let parse = |s: &str| s.parse::<f64>().unwrap_or(0.0);
			if parse(value.as_str().unwrap_or("0")) < parse(floor) {
				Err("Must not be below the minimum price".to_string())
			} else {
				Ok(())
			}
		});
		let mut values = FormValues::new();
		values.insert("min_price".to_string(), json!("9"));
		let errors = validate_value(
			"Price",
			&FieldKind::Text,
			false,
			&[ConfiguredRule::new(custom)],
			&json!("5"),
			&values,
		);
		assert_eq!(errors.len(), 1);
	}

	#[rstest]
	#[case(json!(7), true)]
	#[case(json!(-1), false)]
	#[case(json!(101), false)]
	#[case(json!(7.5), false)]
	#[case(json!("abc"), false)]
	fn test_number_kind_bounds_and_step(#[case] value: Value, #[case] ok: bool) {
		let kind = FieldKind::Number {
			min: Some(0.0),
			max: Some(100.0),
			step: Some(1.0),
		};
		assert_eq!(check(kind, vec![], value).is_empty(), ok);
	}

	#[rstest]
	#[case(FieldKind::Date, json!("2025-02-28"), true)]
	#[case(FieldKind::Date, json!("2025-02-30"), false)]
	#[case(FieldKind::Time, json!("09:30"), true)]
	#[case(FieldKind::Time, json!("09:30:15"), true)]
	#[case(FieldKind::Time, json!("9h30"), false)]
	fn test_date_and_time_parsing(#[case] kind: FieldKind, #[case] value: Value, #[case] ok: bool) {
		assert_eq!(check(kind, vec![], value).is_empty(), ok);
	}

	#[rstest]
	fn test_select_membership() {
		let options = vec![SelectOption::new("us", "United States"), SelectOption::new("fr", "France")];
		assert!(check(FieldKind::select(options.clone()), vec![], json!("fr")).is_empty());
		assert_eq!(
			check(FieldKind::select(options.clone()), vec![], json!("de")),
			vec!["Select a valid choice for Title"]
		);
		assert!(check(FieldKind::multi_select(options.clone()), vec![], json!(["us", "fr"])).is_empty());
		assert!(!check(FieldKind::select(options), vec![], json!(["us"])).is_empty());
	}
}
