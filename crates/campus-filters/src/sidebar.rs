//! Filter sidebar state
//!
//! The sidebar owns the [`FilterSelection`] for one admin screen. Every
//! mutation that changes the selection notifies the registered listeners
//! with a [`SelectionChange`] so the page can re-query its table.
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Idle
//!     Idle --> Idle: toggle_section / set_search
//!     Idle --> Changed: toggle_option / toggle_select_all / clear_*
//!     Changed --> Idle: listeners notified
//! ```

use crate::error::{FilterError, FilterResult};
use crate::section::{FilterOption, FilterSection};
use crate::settings::SidebarSettings;
use crate::view_state::RESERVED_KEYS;
use campus_tables::{CheckState, FilterSelection};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Selection of one section after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
	/// Section key
	pub section: String,
	/// Selected values after the change, sorted
	pub values: Vec<String>,
}

type Listener = Arc<dyn Fn(&SelectionChange) + Send + Sync>;

/// One option as drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
	/// Option value
	pub value: String,
	/// Label
	pub label: String,
	/// Count badge
	pub count: Option<usize>,
	/// Whether the checkbox is ticked
	pub selected: bool,
}

/// One section as drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
	/// Section key
	pub key: String,
	/// Heading
	pub title: String,
	/// Whether the options are shown
	pub expanded: bool,
	/// Search box text, for searchable sections
	pub search: Option<String>,
	/// State of the section's "select all" checkbox
	pub select_all: CheckState,
	/// Options that match the search, in display order
	pub options: Vec<OptionView>,
}

/// Render output of the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarView {
	/// Sections in declaration order
	pub sections: Vec<SectionView>,
	/// Total number of selected values
	pub active_count: usize,
}

/// Headless filter sidebar
///
/// # Examples
///
/// ```
/// use campus_filters::{FilterOption, FilterSection, FilterSidebar};
/// use campus_tables::FilterSelection;
///
/// let sections = vec![
///     FilterSection::new("level", "Level")
///         .option(FilterOption::new("beginner", "Beginner"))
///         .option(FilterOption::new("advanced", "Advanced")),
/// ];
/// let mut sidebar = FilterSidebar::new(sections, FilterSelection::new()).unwrap();
///
/// sidebar.toggle_option("level", "advanced").unwrap();
/// assert_eq!(sidebar.active_count(), 1);
/// assert!(sidebar.toggle_option("level", "expert").is_err());
/// ```
pub struct FilterSidebar {
	sections: Vec<FilterSection>,
	selection: FilterSelection,
	expanded: HashSet<String>,
	searches: HashMap<String, String>,
	listeners: Vec<Listener>,
}

impl FilterSidebar {
	/// Builds a sidebar from its sections and a starting selection
	///
	/// Selected values that no section offers are dropped. Section keys must
	/// be unique and must not collide with the reserved query parameters.
	pub fn new(sections: Vec<FilterSection>, selection: FilterSelection) -> FilterResult<Self> {
		let mut seen = HashSet::new();
		for section in &sections {
			if RESERVED_KEYS.contains(&section.key.as_str()) {
				return Err(FilterError::ReservedKey(section.key.clone()));
			}
			if !seen.insert(section.key.as_str()) {
				return Err(FilterError::DuplicateSection(section.key.clone()));
			}
		}

		let mut sidebar = Self {
			sections,
			selection: FilterSelection::new(),
			expanded: HashSet::new(),
			searches: HashMap::new(),
			listeners: Vec::new(),
		};
		sidebar.expand_leading(SidebarSettings::default().expanded_sections);
		sidebar.selection = sidebar.known_values(selection);
		Ok(sidebar)
	}

	/// Applies settings; resets which sections are expanded
	pub fn with_settings(mut self, settings: &SidebarSettings) -> Self {
		self.expand_leading(settings.expanded_sections);
		self
	}

	/// Registers a listener for selection changes
	pub fn on_change<F>(&mut self, listener: F)
	where
		F: Fn(&SelectionChange) + Send + Sync + 'static,
	{
		self.listeners.push(Arc::new(listener));
	}

	/// Sections in declaration order
	pub fn sections(&self) -> &[FilterSection] {
		&self.sections
	}

	/// Looks up a section by key
	pub fn section(&self, key: &str) -> Option<&FilterSection> {
		self.sections.iter().find(|s| s.key == key)
	}

	/// Current selection
	pub fn selection(&self) -> &FilterSelection {
		&self.selection
	}

	/// Total number of selected values
	pub fn active_count(&self) -> usize {
		self.selection.active_count()
	}

	/// Whether a section's options are shown
	pub fn is_expanded(&self, section: &str) -> bool {
		self.expanded.contains(section)
	}

	/// Expands or collapses a section. Returns the new expanded state.
	pub fn toggle_section(&mut self, section: &str) -> FilterResult<bool> {
		self.require_section(section)?;
		if self.expanded.remove(section) {
			Ok(false)
		} else {
			self.expanded.insert(section.to_string());
			Ok(true)
		}
	}

	/// Flips one option. Returns the new selected state.
	pub fn toggle_option(&mut self, section: &str, value: &str) -> FilterResult<bool> {
		let known = self.require_section(section)?.has_option(value);
		if !known {
			return Err(FilterError::UnknownOption {
				section: section.to_string(),
				value: value.to_string(),
			});
		}
		let selected = self.selection.toggle(section, value);
		self.notify(section);
		Ok(selected)
	}

	/// Selects every option of a section, or clears it when all are selected
	///
	/// Listeners are notified once. Returns the section's new
	/// "select all" state.
	pub fn toggle_select_all(&mut self, section: &str) -> FilterResult<CheckState> {
		let state = self.select_all_state(self.require_section(section)?);
		if state == CheckState::Checked {
			self.selection.clear_section(section);
		} else {
			let values: Vec<String> = self
				.require_section(section)?
				.options
				.iter()
				.map(|o| o.value.clone())
				.collect();
			self.selection.set(section, values);
		}
		self.notify(section);
		Ok(self.select_all_state(self.require_section(section)?))
	}

	/// Sets the search text of a searchable section
	///
	/// Only the displayed options change; the selection is untouched.
	pub fn set_search(&mut self, section: &str, text: &str) -> FilterResult<()> {
		if !self.require_section(section)?.searchable {
			return Err(FilterError::NotSearchable(section.to_string()));
		}
		if text.trim().is_empty() {
			self.searches.remove(section);
		} else {
			self.searches.insert(section.to_string(), text.to_string());
		}
		Ok(())
	}

	/// Search text of a section
	pub fn search(&self, section: &str) -> Option<&str> {
		self.searches.get(section).map(String::as_str)
	}

	/// Options currently shown for a section
	pub fn visible_options(&self, section: &str) -> FilterResult<Vec<&FilterOption>> {
		let query = self.search(section).unwrap_or_default();
		Ok(self.require_section(section)?.matching_options(query).collect())
	}

	/// Clears one section
	pub fn clear_section(&mut self, section: &str) -> FilterResult<()> {
		self.require_section(section)?;
		if self.selection.values(section).is_some() {
			self.selection.clear_section(section);
			self.notify(section);
		}
		Ok(())
	}

	/// Clears every section; each section that had values is reported once
	pub fn clear_all(&mut self) {
		let cleared: Vec<String> = self.selection.iter().map(|(key, _)| key.clone()).collect();
		self.selection.clear();
		for section in &cleared {
			self.notify(section);
		}
	}

	/// Replaces the whole selection, e.g. after decoding a URL
	///
	/// Unknown values are dropped. Listeners are not notified.
	pub fn restore(&mut self, selection: FilterSelection) {
		self.selection = self.known_values(selection);
	}

	/// Render output for the current state
	pub fn render(&self) -> SidebarView {
		let sections = self
			.sections
			.iter()
			.map(|section| {
				let search = self.searches.get(&section.key).cloned();
				let options = section
					.matching_options(search.as_deref().unwrap_or_default())
					.map(|o| OptionView {
						value: o.value.clone(),
						label: o.label.clone(),
						count: o.count,
						selected: self.selection.contains(&section.key, &o.value),
					})
					.collect();
				SectionView {
					key: section.key.clone(),
					title: section.title.clone(),
					expanded: self.expanded.contains(&section.key),
					search,
					select_all: self.select_all_state(section),
					options,
				}
			})
			.collect();

		SidebarView {
			sections,
			active_count: self.active_count(),
		}
	}

	fn require_section(&self, key: &str) -> FilterResult<&FilterSection> {
		self.section(key)
			.ok_or_else(|| FilterError::UnknownSection(key.to_string()))
	}

	fn select_all_state(&self, section: &FilterSection) -> CheckState {
		let selected = self
			.selection
			.values(&section.key)
			.map_or(0, |values| values.len());
		if selected == 0 {
			CheckState::Unchecked
		} else if selected == section.options.len() {
			CheckState::Checked
		} else {
			CheckState::Indeterminate
		}
	}

	fn expand_leading(&mut self, count: usize) {
		self.expanded = self
			.sections
			.iter()
			.take(count)
			.map(|s| s.key.clone())
			.collect();
	}

	fn known_values(&self, selection: FilterSelection) -> FilterSelection {
		let mut known = FilterSelection::new();
		for (key, values) in selection.iter() {
			let Some(section) = self.section(key) else {
				warn!(section = %key, "dropping selection for unknown filter section");
				continue;
			};
			for value in values {
				if section.has_option(value) {
					known.insert(key.as_str(), value.as_str());
				} else {
					warn!(section = %key, value = %value, "dropping unknown filter option");
				}
			}
		}
		known
	}

	fn notify(&self, section: &str) {
		let change = SelectionChange {
			section: section.to_string(),
			values: self
				.selection
				.values(section)
				.map(|values| values.iter().cloned().collect())
				.unwrap_or_default(),
		};
		debug!(section = %change.section, selected = change.values.len(), "filter selection changed");
		for listener in &self.listeners {
			listener(&change);
		}
	}
}

impl fmt::Debug for FilterSidebar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterSidebar")
			.field("sections", &self.sections)
			.field("selection", &self.selection)
			.field("expanded", &self.expanded)
			.field("searches", &self.searches)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}
