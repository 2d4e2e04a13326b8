//! Table settings

use crate::export::ExportScope;
use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default upper bound accepted for a page size
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Per-table configuration
///
/// Deserializable so it can live in the `[tables]` section of the admin
/// settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
	/// Rows per page
	pub page_size: usize,
	/// Largest page size a caller may request
	pub max_page_size: usize,
	/// Which rows an export includes unless overridden per call
	pub export_scope: ExportScope,
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
			max_page_size: DEFAULT_MAX_PAGE_SIZE,
			export_scope: ExportScope::AllMatching,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = TableSettings::default();
		assert_eq!(settings.page_size, 10);
		assert_eq!(settings.export_scope, ExportScope::AllMatching);
	}

	#[test]
	fn test_partial_deserialization_keeps_defaults() {
		let settings: TableSettings =
			serde_json::from_str(r#"{"export_scope": "current_page"}"#).unwrap();
		assert_eq!(settings.page_size, 10);
		assert_eq!(settings.export_scope, ExportScope::CurrentPage);
	}
}
