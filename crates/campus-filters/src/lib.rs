//! Filter sidebar and URL view state for Campus admin list pages
//!
//! - [`FilterSidebar`]: collapsible sections of checkbox options with
//!   per-section search, "select all" and change notifications
//! - [`ViewState`]: the query-string form of a list page (filters, layout,
//!   sort, search, page, tab) with a pure encode/decode pair
//!
//! The selection type is shared with `campus-tables`, so a decoded view state
//! can be pushed straight into a table.
//!
//! # Example
//!
//! ```
//! use campus_filters::{FilterOption, FilterSection, FilterSidebar, ViewState};
//! use campus_tables::FilterSelection;
//!
//! let state = ViewState::from_query_string("level=advanced&q=react");
//! let sections = vec![
//!     FilterSection::new("level", "Level")
//!         .option(FilterOption::new("beginner", "Beginner"))
//!         .option(FilterOption::new("advanced", "Advanced")),
//! ];
//! let mut sidebar = FilterSidebar::new(sections, state.filters.clone()).unwrap();
//! sidebar.toggle_option("level", "beginner").unwrap();
//!
//! let next = state.with_filters(sidebar.selection().clone());
//! assert_eq!(next.to_query_string(), "level=advanced&level=beginner&q=react");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod section;
pub mod settings;
pub mod sidebar;
pub mod view_state;

pub use error::{FilterError, FilterResult};
pub use section::{FilterOption, FilterSection};
pub use settings::SidebarSettings;
pub use sidebar::{FilterSidebar, OptionView, SectionView, SelectionChange, SidebarView};
pub use view_state::{RESERVED_KEYS, SortParam, ViewMode, ViewState};
