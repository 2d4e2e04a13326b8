use crate::error::{FormError, FormResult};
use crate::field::{FieldDescriptor, FieldEffect, FormValues};
use crate::graph::topological_order;
use crate::payload::{check_paths, flatten, nest};
use crate::rules::validate_value;
use crate::settings::FormSettings;
use crate::submit::{AfterSubmit, SubmitHandler, SubmitOutcome};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace, warn};

/// A form instance: descriptors plus live values, errors and visibility
///
/// All state changes are synchronous. After [`Form::set_value`] returns, the
/// changed field's effects have been applied and every conditional field has
/// been re-evaluated, so the next render is consistent.
pub struct Form {
	fields: Vec<FieldDescriptor>,
	index: HashMap<String, usize>,
	order: Vec<usize>,
	values: FormValues,
	initial: FormValues,
	errors: HashMap<String, Vec<String>>,
	touched: HashSet<String>,
	hidden: HashSet<String>,
	forced_hidden: HashSet<String>,
	banner: Option<String>,
	after_submit: AfterSubmit,
	closed: bool,
}

impl Form {
	/// Builds a form from descriptors and starting values
	///
	/// Fields missing from `initial` start from their default (or empty)
	/// value. Fails on duplicate names, unknown or cyclic dependencies and
	/// conflicting dotted paths.
	///
	/// # Examples
	///
	/// ```
	/// use campus_forms::{FieldDescriptor, FieldKind, Form};
	/// use std::collections::HashMap;
	///
	/// let form = Form::from_descriptors(
	///     vec![FieldDescriptor::new("title", "Title", FieldKind::Text).required()],
	///     HashMap::new(),
	/// )
	/// .unwrap();
	///
	/// assert_eq!(form.value("title"), Some(&serde_json::json!("")));
	/// assert!(!form.is_dirty());
	/// ```
	pub fn from_descriptors(fields: Vec<FieldDescriptor>, initial: FormValues) -> FormResult<Self> {
		let mut index = HashMap::with_capacity(fields.len());
		for (i, field) in fields.iter().enumerate() {
			if index.insert(field.name.clone(), i).is_some() {
				return Err(FormError::DuplicateField(field.name.clone()));
			}
		}
		check_paths(fields.iter().map(|f| f.name.as_str()))?;
		let order = topological_order(&fields)?;

		for key in initial.keys() {
			if !index.contains_key(key) {
				debug!(key = %key, "initial value has no matching field, ignoring");
			}
		}

		let values: FormValues = fields
			.iter()
			.map(|f| {
				let value = initial
					.get(&f.name)
					.cloned()
					.unwrap_or_else(|| f.initial_value());
				(f.name.clone(), value)
			})
			.collect();

		let mut form = Self {
			fields,
			index,
			order,
			values,
			initial: FormValues::new(),
			errors: HashMap::new(),
			touched: HashSet::new(),
			hidden: HashSet::new(),
			forced_hidden: HashSet::new(),
			banner: None,
			after_submit: AfterSubmit::default(),
			closed: false,
		};
		form.evaluate_visibility();
		form.initial = form.values.clone();

		debug!(
			fields = form.fields.len(),
			hidden = form.hidden.len(),
			"form built"
		);
		Ok(form)
	}

	/// Builds an edit form from an existing entity
	///
	/// Nested objects are flattened to dotted names, so a field named
	/// `country.code` starts from `entity["country"]["code"]`.
	pub fn for_entity(fields: Vec<FieldDescriptor>, entity: &Value) -> FormResult<Self> {
		Self::from_descriptors(fields, flatten(entity))
	}

	/// Applies form settings
	pub fn with_settings(mut self, settings: FormSettings) -> Self {
		self.after_submit = settings.after_submit;
		self
	}

	/// Sets the action after a successful submission
	pub fn with_after_submit(mut self, after_submit: AfterSubmit) -> Self {
		self.after_submit = after_submit;
		self
	}

	fn position(&self, name: &str) -> FormResult<usize> {
		self.index
			.get(name)
			.copied()
			.ok_or_else(|| FormError::UnknownField(name.to_string()))
	}

	// ---------------------------------------------------------------------
	// Accessors
	// ---------------------------------------------------------------------

	/// Descriptors in declaration order
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Descriptor by name
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.index.get(name).map(|&i| &self.fields[i])
	}

	/// Current value of a field
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// All current values, visible or not
	pub fn values(&self) -> &FormValues {
		&self.values
	}

	/// Values the form started from
	pub fn initial(&self) -> &FormValues {
		&self.initial
	}

	/// Recorded errors keyed by field name
	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	/// Recorded errors of one field
	pub fn field_errors(&self, name: &str) -> &[String] {
		self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Whether a field is shown
	pub fn is_visible(&self, name: &str) -> bool {
		self.index.contains_key(name) && !self.hidden.contains(name)
	}

	/// Shown fields in declaration order
	pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields
			.iter()
			.filter(|f| !self.hidden.contains(&f.name))
	}

	/// Whether the user has left the field (or submitted)
	pub fn is_touched(&self, name: &str) -> bool {
		self.touched.contains(name)
	}

	/// Banner message of the last failed submission
	pub fn submit_error(&self) -> Option<&str> {
		self.banner.as_deref()
	}

	/// Whether the form closed after a successful submission
	pub fn is_closed(&self) -> bool {
		self.closed
	}

	/// Re-opens a closed form
	pub fn reopen(&mut self) {
		self.closed = false;
	}

	/// Configured after-submit action
	pub fn after_submit(&self) -> AfterSubmit {
		self.after_submit
	}

	/// True when any visible value differs from its starting value
	pub fn is_dirty(&self) -> bool {
		self.visible_fields().any(|f| {
			let current = self.values.get(&f.name);
			let start = self.initial.get(&f.name);
			current != start
		})
	}

	// ---------------------------------------------------------------------
	// Changes
	// ---------------------------------------------------------------------

	/// Commits a new value
	///
	/// A touched field is re-validated immediately. The field's `on_change`
	/// effects are applied next, then conditional visibility is re-evaluated.
	pub fn set_value(&mut self, name: &str, value: Value) -> FormResult<()> {
		let i = self.position(name)?;
		self.values.insert(name.to_string(), value.clone());

		if self.touched.contains(name) {
			self.validate_index(i);
		}

		if let Some(on_change) = self.fields[i].on_change.clone() {
			let effects = on_change(&value, &self.values);
			for effect in effects {
				self.apply_effect(effect);
			}
		}

		self.evaluate_visibility();
		Ok(())
	}

	fn apply_effect(&mut self, effect: FieldEffect) {
		let name = match &effect {
			FieldEffect::Hide(name) | FieldEffect::Show(name) | FieldEffect::Reset(name) => name,
		};
		let Some(&i) = self.index.get(name) else {
			warn!(field = %name, ?effect, "effect targets unknown field, ignoring");
			return;
		};
		trace!(?effect, "applying field effect");
		match effect {
			FieldEffect::Hide(name) => {
				self.forced_hidden.insert(name);
			}
			FieldEffect::Show(name) => {
				self.forced_hidden.remove(&name);
			}
			FieldEffect::Reset(_) => self.reset_field(i),
		}
	}

	fn reset_field(&mut self, i: usize) {
		let field = &self.fields[i];
		self.values
			.insert(field.name.clone(), field.kind.empty_value());
		self.errors.remove(&field.name);
		self.touched.remove(&field.name);
	}

	fn compute_visible(&self, i: usize) -> bool {
		let field = &self.fields[i];
		if self.forced_hidden.contains(&field.name) {
			return false;
		}
		let Some(target) = &field.depends_on else {
			return true;
		};
		if self.hidden.contains(target) {
			return false;
		}
		match self.field(target) {
			Some(target_field) => {
				let value = self.values.get(target).unwrap_or(&Value::Null);
				!target_field.kind.is_empty(value)
			}
			None => false,
		}
	}

	/// Re-evaluates visibility in dependency order
	fn evaluate_visibility(&mut self) {
		for pos in 0..self.order.len() {
			let i = self.order[pos];
			let visible = self.compute_visible(i);
			let name = self.fields[i].name.clone();
			let was_hidden = self.hidden.contains(&name);

			if visible && was_hidden {
				self.hidden.remove(&name);
				trace!(field = %name, "field shown");
			} else if !visible && !was_hidden {
				self.hidden.insert(name.clone());
				self.reset_field(i);
				trace!(field = %name, "field hidden and reset");
			}
		}
	}

	// ---------------------------------------------------------------------
	// Validation
	// ---------------------------------------------------------------------

	fn check_index(&self, i: usize) -> Vec<String> {
		let field = &self.fields[i];
		let value = self.values.get(&field.name).unwrap_or(&Value::Null);
		validate_value(
			&field.label,
			&field.kind,
			field.required,
			&field.rules,
			value,
			&self.values,
		)
		.into_iter()
		.map(|e| e.to_string())
		.collect()
	}

	fn validate_index(&mut self, i: usize) -> bool {
		let messages = self.check_index(i);
		let name = self.fields[i].name.clone();
		if messages.is_empty() {
			self.errors.remove(&name);
			true
		} else {
			self.errors.insert(name, messages);
			false
		}
	}

	/// Field left: marks it touched and validates it
	///
	/// Hidden fields are never validated and report valid.
	pub fn blur(&mut self, name: &str) -> FormResult<bool> {
		let i = self.position(name)?;
		if self.hidden.contains(name) {
			return Ok(true);
		}
		self.touched.insert(name.to_string());
		Ok(self.validate_index(i))
	}

	/// Validates every visible field and records the errors
	pub fn validate(&mut self) -> bool {
		let mut valid = true;
		for i in 0..self.fields.len() {
			let name = self.fields[i].name.clone();
			if self.hidden.contains(&name) {
				self.errors.remove(&name);
				continue;
			}
			self.touched.insert(name);
			valid &= self.validate_index(i);
		}
		valid
	}

	/// Whether every visible field currently passes, without recording errors
	pub fn is_valid(&self) -> bool {
		(0..self.fields.len())
			.filter(|&i| !self.hidden.contains(&self.fields[i].name))
			.all(|i| self.check_index(i).is_empty())
	}

	/// Checks one field and returns its first failure
	pub fn check_field(&self, name: &str) -> FormResult<()> {
		let i = self.position(name)?;
		if self.hidden.contains(name) {
			return Ok(());
		}
		let field = &self.fields[i];
		let value = self.values.get(name).unwrap_or(&Value::Null);
		let errors = validate_value(
			&field.label,
			&field.kind,
			field.required,
			&field.rules,
			value,
			&self.values,
		);
		match errors.into_iter().next() {
			Some(error) => Err(FormError::Field {
				field: name.to_string(),
				error,
			}),
			None => Ok(()),
		}
	}

	// ---------------------------------------------------------------------
	// Submission
	// ---------------------------------------------------------------------

	/// Nested payload of the visible fields
	pub fn payload(&self) -> FormResult<Value> {
		nest(
			self.visible_fields()
				.filter_map(|f| self.values.get(&f.name).map(|v| (f.name.as_str(), v))),
		)
	}

	/// Validates and hands the payload to `handler`
	///
	/// The handler is not called while any visible field is invalid, nor
	/// while the form is closed. A handler error becomes the banner
	/// ([`Form::submit_error`]) and leaves the values untouched for a retry.
	pub async fn submit<H>(&mut self, handler: &H) -> SubmitOutcome
	where
		H: SubmitHandler + ?Sized,
	{
		if self.closed {
			warn!("submit on a closed form ignored");
			return SubmitOutcome::Invalid;
		}
		self.banner = None;

		if !self.validate() {
			debug!(invalid = self.errors.len(), "submission blocked by validation");
			return SubmitOutcome::Invalid;
		}

		let payload = match self.payload() {
			Ok(payload) => payload,
			Err(error) => {
				let message = error.to_string();
				self.banner = Some(message.clone());
				return SubmitOutcome::Failed(message);
			}
		};

		debug!("submitting form");
		match handler.submit(payload).await {
			Ok(()) => {
				info!(after_submit = ?self.after_submit, "form submitted");
				self.apply_after_submit();
				SubmitOutcome::Submitted(self.after_submit)
			}
			Err(error) => {
				let message = error.to_string();
				warn!(error = %message, "form submission failed");
				self.banner = Some(message.clone());
				SubmitOutcome::Failed(message)
			}
		}
	}

	fn apply_after_submit(&mut self) {
		match self.after_submit {
			AfterSubmit::Close => {
				self.reset();
				self.closed = true;
			}
			AfterSubmit::Reset => self.reset(),
			AfterSubmit::Keep => {
				self.initial = self.values.clone();
				self.touched.clear();
			}
		}
	}

	/// Returns to the starting values and clears errors, effects and banner
	pub fn reset(&mut self) {
		self.values = self.initial.clone();
		self.errors.clear();
		self.touched.clear();
		self.forced_hidden.clear();
		self.hidden.clear();
		self.banner = None;
		self.evaluate_visibility();
	}
}

impl std::fmt::Debug for Form {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Form")
			.field("fields", &self.fields.len())
			.field("values", &self.values)
			.field("errors", &self.errors)
			.field("hidden", &self.hidden)
			.field("banner", &self.banner)
			.finish_non_exhaustive()
	}
}
