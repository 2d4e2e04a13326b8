//! Dotted-path payload assembly
//!
//! Field names may contain dots (`country.code`). Submission nests them into
//! objects; edit mode flattens an entity back into dotted names.

use crate::error::{FormError, FormResult};
use crate::field::FormValues;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Flattens nested objects into dotted names
///
/// Arrays and scalars are leaves. An empty object is kept as a leaf so that
/// it survives a round trip through [`nest`].
///
/// # Examples
///
/// ```
/// use campus_forms::payload::flatten;
/// use serde_json::json;
///
/// let values = flatten(&json!({"title": "Rust", "country": {"code": "FR"}}));
/// assert_eq!(values["country.code"], json!("FR"));
/// ```
pub fn flatten(value: &Value) -> FormValues {
	let mut values = FormValues::new();
	if let Value::Object(map) = value {
		flatten_into(&mut values, None, map);
	}
	values
}

fn flatten_into(values: &mut FormValues, prefix: Option<&str>, map: &Map<String, Value>) {
	for (key, value) in map {
		let path = match prefix {
			Some(prefix) => format!("{}.{}", prefix, key),
			None => key.clone(),
		};
		match value {
			Value::Object(inner) if !inner.is_empty() => flatten_into(values, Some(&path), inner),
			leaf => {
				values.insert(path, leaf.clone());
			}
		}
	}
}

/// Nests dotted names into one object
///
/// Entries are applied in iteration order. A name that is a prefix of
/// another (`a` and `a.b`) is a [`FormError::PathConflict`].
pub fn nest<'a, I>(entries: I) -> FormResult<Value>
where
	I: IntoIterator<Item = (&'a str, &'a Value)>,
{
	let mut root = Map::new();
	for (path, value) in entries {
		insert_path(&mut root, path, value.clone())?;
	}
	Ok(Value::Object(root))
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) -> FormResult<()> {
	let segments = split_path(path)?;
	let (last, parents) = segments
		.split_last()
		.ok_or_else(|| FormError::InvalidPath(path.to_string()))?;

	let mut current = root;
	for (depth, segment) in parents.iter().enumerate() {
		let entry = current
			.entry(segment.to_string())
			.or_insert_with(|| Value::Object(Map::new()));
		current = match entry {
			Value::Object(map) => map,
			_ => {
				return Err(FormError::PathConflict {
					path: path.to_string(),
					other: segments[..=depth].join("."),
				});
			}
		};
	}

	if current.contains_key(*last) {
		return Err(FormError::PathConflict {
			path: path.to_string(),
			other: path.to_string(),
		});
	}
	current.insert(last.to_string(), value);
	Ok(())
}

fn split_path(path: &str) -> FormResult<Vec<&str>> {
	let segments: Vec<&str> = path.split('.').collect();
	if segments.iter().any(|s| s.is_empty()) {
		return Err(FormError::InvalidPath(path.to_string()));
	}
	Ok(segments)
}

/// Rejects empty segments and names that prefix other names
pub(crate) fn check_paths<'a, I>(names: I) -> FormResult<()>
where
	I: IntoIterator<Item = &'a str>,
{
	let names: Vec<&str> = names.into_iter().collect();
	let known: HashSet<&str> = names.iter().copied().collect();

	for name in &names {
		split_path(name)?;
		let mut end = 0;
		while let Some(offset) = name[end..].find('.') {
			end += offset;
			let prefix = &name[..end];
			if known.contains(prefix) {
				return Err(FormError::PathConflict {
					path: name.to_string(),
					other: prefix.to_string(),
				});
			}
			end += 1;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_nest_builds_objects() {
		let code = json!("FR");
		let title = json!("Rust");
		let payload = nest([("country.code", &code), ("title", &title)]).unwrap();
		assert_eq!(payload, json!({"country": {"code": "FR"}, "title": "Rust"}));
	}

	#[rstest]
	fn test_nest_conflict() {
		let a = json!(1);
		let b = json!(2);
		let err = nest([("a", &a), ("a.b", &b)]).unwrap_err();
		assert_eq!(
			err,
			FormError::PathConflict {
				path: "a.b".to_string(),
				other: "a".to_string()
			}
		);
	}

	#[rstest]
	#[case(&["title", "country.code", "country.name"], true)]
	#[case(&["country", "country.code"], false)]
	#[case(&["a.b.c", "a.b"], false)]
	#[case(&["a..b"], false)]
	#[case(&["ab", "a.b"], true)]
	fn test_check_paths(#[case] names: &[&str], #[case] ok: bool) {
		assert_eq!(check_paths(names.iter().copied()).is_ok(), ok);
	}

	#[rstest]
	fn test_flatten_keeps_arrays_and_empty_objects() {
		let values = flatten(&json!({"tags": ["a"], "meta": {}, "seo": {"slug": "rust"}}));
		assert_eq!(values["tags"], json!(["a"]));
		assert_eq!(values["meta"], json!({}));
		assert_eq!(values["seo.slug"], json!("rust"));
		assert!(flatten(&json!("scalar")).is_empty());
	}
}
