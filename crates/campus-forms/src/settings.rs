//! Form engine settings

use crate::submit::AfterSubmit;
use serde::{Deserialize, Serialize};

/// Settings shared by every form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Action after a successful submission
	pub after_submit: AfterSubmit,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_to_close() {
		let settings: FormSettings = serde_json::from_str("{}").unwrap();
		assert_eq!(settings.after_submit, AfterSubmit::Close);

		let settings: FormSettings = serde_json::from_str(r#"{"after_submit": "keep"}"#).unwrap();
		assert_eq!(settings.after_submit, AfterSubmit::Keep);
	}
}
