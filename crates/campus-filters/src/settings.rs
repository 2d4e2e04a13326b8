//! Sidebar settings

use serde::{Deserialize, Serialize};

/// Default number of sections expanded when a sidebar is built
pub const DEFAULT_EXPANDED_SECTIONS: usize = 2;

/// Sidebar configuration
///
/// # Examples
///
/// ```
/// use campus_filters::SidebarSettings;
///
/// let settings = SidebarSettings::default();
/// assert_eq!(settings.expanded_sections, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSettings {
	/// How many leading sections start expanded
	pub expanded_sections: usize,
}

impl Default for SidebarSettings {
	fn default() -> Self {
		Self {
			expanded_sections: DEFAULT_EXPANDED_SECTIONS,
		}
	}
}
