//! File upload values
//!
//! The upload itself happens outside the form; the form only sees a
//! description of each chosen file: `{ "filename": "syllabus.pdf", "size":
//! 52311 }`, or an array of those for multi-file fields.

use crate::error::{FieldError, FieldResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description of one chosen file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
	/// Original file name
	pub filename: String,
	/// Size in bytes
	#[serde(default)]
	pub size: u64,
}

impl UploadedFile {
	/// Lowercased extension without the dot
	pub fn extension(&self) -> Option<String> {
		let (stem, ext) = self.filename.rsplit_once('.')?;
		if stem.is_empty() || ext.is_empty() {
			None
		} else {
			Some(ext.to_lowercase())
		}
	}
}

/// Reads a file value (object or array of objects)
pub(crate) fn parse_files(label: &str, value: &Value) -> FieldResult<Vec<UploadedFile>> {
	let invalid = |reason: &str| FieldError::Invalid(format!("{}: {}", label, reason));
	let parse_one = |v: &Value| -> FieldResult<UploadedFile> {
		let file: UploadedFile =
			serde_json::from_value(v.clone()).map_err(|_| invalid("expected a file"))?;
		if file.filename.is_empty() {
			return Err(invalid("missing filename"));
		}
		Ok(file)
	};

	match value {
		Value::Array(items) => items.iter().map(parse_one).collect(),
		Value::Object(_) => parse_one(value).map(|file| vec![file]),
		_ => Err(invalid("expected a file")),
	}
}

fn normalize_extension(ext: &str) -> String {
	ext.trim().trim_start_matches('.').to_lowercase()
}

/// Enforces count, size and extension constraints
pub(crate) fn check_files(
	label: &str,
	files: &[UploadedFile],
	max_files: usize,
	max_size_kb: Option<u64>,
	accept: &[String],
) -> FieldResult<()> {
	if files.len() > max_files.max(1) {
		return Err(FieldError::Validation(format!(
			"{} accepts at most {} file{}",
			label,
			max_files.max(1),
			if max_files > 1 { "s" } else { "" }
		)));
	}

	let accepted: Vec<String> = accept.iter().map(|e| normalize_extension(e)).collect();

	for file in files {
		if let Some(max_kb) = max_size_kb
			&& file.size > max_kb.saturating_mul(1024)
		{
			return Err(FieldError::Validation(format!(
				"{} exceeds the maximum size of {} KB",
				file.filename, max_kb
			)));
		}

		if !accepted.is_empty() {
			let ok = file
				.extension()
				.is_some_and(|ext| accepted.iter().any(|a| *a == ext));
			if !ok {
				let list: Vec<String> = accepted.iter().map(|a| format!(".{}", a)).collect();
				return Err(FieldError::Validation(format!(
					"{} is not an accepted file type ({})",
					file.filename,
					list.join(", ")
				)));
			}
		}
	}

	Ok(())
}
