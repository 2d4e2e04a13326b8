//! Dynamic form engine for Campus admin modals
//!
//! Create/edit modals (courses, quizzes, plans, notifications, ...) are
//! declared as lists of [`FieldDescriptor`]s. The engine keeps the values,
//! validates them, shows or hides conditional fields and assembles the
//! submission payload.
//!
//! - **Field kinds**: text, email, password, textarea, number, date, time,
//!   select, checkbox, file, rich text, multi-text
//! - **Validation**: declarative [`Rule`]s plus checks implied by the kind,
//!   run on blur, on demand and before submission
//! - **Conditional fields**: `depends_on` edges form a graph checked for
//!   cycles at build time and re-evaluated in dependency order on every change
//! - **Payload**: dotted names (`country.code`) nest into objects; hidden
//!   fields are left out
//! - **Submission**: async [`SubmitHandler`]; failures become a banner and
//!   keep the entered values
//!
//! # Example
//!
//! ```
//! use campus_forms::{FieldDescriptor, FieldKind, Form, SelectOption};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let fields = vec![
//!     FieldDescriptor::new("country", "Country", FieldKind::select(vec![
//!         SelectOption::new("US", "United States"),
//!         SelectOption::new("FR", "France"),
//!     ])),
//!     FieldDescriptor::new("address.state", "State", FieldKind::Text)
//!         .required()
//!         .depends_on("country"),
//! ];
//! let mut form = Form::from_descriptors(fields, HashMap::new()).unwrap();
//! assert!(!form.is_visible("address.state"));
//!
//! form.set_value("country", json!("US")).unwrap();
//! form.set_value("address.state", json!("CA")).unwrap();
//! assert!(form.validate());
//! assert_eq!(
//!     form.payload().unwrap(),
//!     json!({"country": "US", "address": {"state": "CA"}})
//! );
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod field;
pub mod file;
pub mod form;
mod graph;
pub mod metadata;
pub mod payload;
pub mod rules;
pub mod settings;
pub mod submit;

pub use error::{FieldError, FieldResult, FormError, FormResult};
pub use field::{FieldDescriptor, FieldEffect, FieldKind, FormValues, GridSpan, SelectOption, Widget};
pub use file::UploadedFile;
pub use form::Form;
pub use metadata::{FieldMetadata, FormExt, FormMetadata, FormView};
pub use rules::{ConfiguredRule, Rule};
pub use settings::FormSettings;
pub use submit::{AfterSubmit, FnHandler, SubmitHandler, SubmitOutcome, handler_fn};
