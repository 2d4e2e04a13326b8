mod fixtures;

use campus_filters::{
	FilterError, FilterSidebar, SelectionChange, SidebarSettings, SidebarView, ViewMode, ViewState,
};
use campus_tables::{CheckState, FilterSelection, SimpleTable, SortConfig, SortOrder};
use fixtures::*;
use rstest::*;
use std::sync::{Arc, Mutex};

fn record_changes(sidebar: &mut FilterSidebar) -> Arc<Mutex<Vec<SelectionChange>>> {
	let changes = Arc::new(Mutex::new(Vec::new()));
	let sink = changes.clone();
	sidebar.on_change(move |change| sink.lock().unwrap().push(change.clone()));
	changes
}

#[rstest]
fn test_toggle_option_notifies_listener(mut sidebar: FilterSidebar) {
	// Arrange
	let changes = record_changes(&mut sidebar);

	// Act
	assert!(sidebar.toggle_option("level", "advanced").unwrap());
	assert!(sidebar.toggle_option("level", "beginner").unwrap());
	assert!(!sidebar.toggle_option("level", "advanced").unwrap());

	// Assert
	let changes = changes.lock().unwrap();
	assert_eq!(changes.len(), 3);
	assert_eq!(changes[1].values, vec!["advanced", "beginner"]);
	assert_eq!(
		changes[2],
		SelectionChange {
			section: "level".to_string(),
			values: vec!["beginner".to_string()],
		}
	);
	assert_eq!(sidebar.active_count(), 1);
}

#[rstest]
#[case("unknown", "x", FilterError::UnknownSection("unknown".to_string()))]
#[case("level", "expert", FilterError::UnknownOption { section: "level".to_string(), value: "expert".to_string() })]
fn test_unknown_keys_are_rejected(
	mut sidebar: FilterSidebar,
	#[case] section: &str,
	#[case] value: &str,
	#[case] expected: FilterError,
) {
	let changes = record_changes(&mut sidebar);

	assert_eq!(sidebar.toggle_option(section, value).unwrap_err(), expected);
	assert!(changes.lock().unwrap().is_empty());
	assert_eq!(sidebar.active_count(), 0);
}

#[rstest]
fn test_select_all_is_one_change(mut sidebar: FilterSidebar) {
	// Arrange
	sidebar.toggle_option("category", "web").unwrap();
	let changes = record_changes(&mut sidebar);

	// Act
	let state = sidebar.toggle_select_all("category").unwrap();

	// Assert
	assert_eq!(state, CheckState::Checked);
	assert_eq!(changes.lock().unwrap().len(), 1);
	assert_eq!(changes.lock().unwrap()[0].values.len(), 4);
	assert_eq!(sidebar.active_count(), 4);

	// All selected: the same action clears the section
	assert_eq!(sidebar.toggle_select_all("category").unwrap(), CheckState::Unchecked);
	assert_eq!(changes.lock().unwrap().len(), 2);
	assert!(changes.lock().unwrap()[1].values.is_empty());
	assert_eq!(sidebar.active_count(), 0);
}

#[rstest]
fn test_select_all_state_in_render(mut sidebar: FilterSidebar) {
	sidebar.toggle_option("price", "free").unwrap();
	let view = sidebar.render();
	let price = view.sections.iter().find(|s| s.key == "price").unwrap();
	assert_eq!(price.select_all, CheckState::Indeterminate);

	sidebar.toggle_option("price", "paid").unwrap();
	let view = sidebar.render();
	let price = view.sections.iter().find(|s| s.key == "price").unwrap();
	assert_eq!(price.select_all, CheckState::Checked);
	assert!(price.options.iter().all(|o| o.selected));
}

#[rstest]
fn test_search_filters_visible_options_only(mut sidebar: FilterSidebar) {
	// Arrange
	sidebar.toggle_option("category", "design").unwrap();

	// Act
	sidebar.set_search("category", "DEVELOP").unwrap();

	// Assert
	let visible: Vec<&str> = sidebar
		.visible_options("category")
		.unwrap()
		.into_iter()
		.map(|o| o.value.as_str())
		.collect();
	assert_eq!(visible, vec!["web", "mobile"]);
	assert!(sidebar.selection().contains("category", "design"));

	let view = sidebar.render();
	assert_eq!(view.sections[0].search.as_deref(), Some("DEVELOP"));
	assert_eq!(view.sections[0].options.len(), 2);
	assert_eq!(view.sections[0].options[0].count, Some(12));

	sidebar.set_search("category", "").unwrap();
	assert_eq!(sidebar.visible_options("category").unwrap().len(), 4);
}

#[rstest]
fn test_search_requires_searchable_section(mut sidebar: FilterSidebar) {
	assert_eq!(
		sidebar.set_search("level", "adv").unwrap_err(),
		FilterError::NotSearchable("level".to_string())
	);
}

#[rstest]
fn test_sections_expand_independently(mut sidebar: FilterSidebar) {
	assert!(sidebar.is_expanded("category"));
	assert!(sidebar.is_expanded("level"));
	assert!(!sidebar.is_expanded("price"));

	assert!(sidebar.toggle_section("price").unwrap());
	assert!(!sidebar.toggle_section("category").unwrap());

	assert!(!sidebar.is_expanded("category"));
	assert!(sidebar.is_expanded("level"));
	assert!(sidebar.is_expanded("price"));
}

#[rstest]
fn test_expanded_sections_setting(course_sections: Vec<campus_filters::FilterSection>) {
	let sidebar = FilterSidebar::new(course_sections, FilterSelection::new())
		.unwrap()
		.with_settings(&SidebarSettings {
			expanded_sections: 3,
		});

	assert!(sidebar.render().sections.iter().all(|s| s.expanded));
}

#[rstest]
fn test_clear_section_and_clear_all(mut sidebar: FilterSidebar) {
	// Arrange
	sidebar.toggle_option("category", "web").unwrap();
	sidebar.toggle_option("level", "advanced").unwrap();
	sidebar.toggle_option("price", "paid").unwrap();
	let changes = record_changes(&mut sidebar);

	// Act
	sidebar.clear_section("level").unwrap();
	sidebar.clear_section("level").unwrap();
	sidebar.clear_all();

	// Assert
	let sections: Vec<String> = changes
		.lock()
		.unwrap()
		.iter()
		.map(|c| c.section.clone())
		.collect();
	assert_eq!(sections, vec!["level", "category", "price"]);
	assert!(sidebar.selection().is_empty());
	assert_eq!(sidebar.render().active_count, 0);
}

#[rstest]
fn test_restore_from_url_drops_unknown_values(mut sidebar: FilterSidebar) {
	let changes = record_changes(&mut sidebar);
	let state = ViewState::from_query_string("level=advanced&level=expert&color=red");

	sidebar.restore(state.filters);

	assert_eq!(sidebar.active_count(), 1);
	assert!(sidebar.selection().contains("level", "advanced"));
	assert!(changes.lock().unwrap().is_empty());
}

#[rstest]
fn test_view_state_applies_to_table(mut catalog_table: SimpleTable<CatalogCourse>) {
	// Arrange
	catalog_table.set_page_size(5).unwrap();
	let state = ViewState::from_query_string("level=advanced&sort=-price&view=list&page=2&q=course");

	// Act
	state.apply_to_table(&mut catalog_table);

	// Assert
	assert_eq!(state.view, ViewMode::List);
	assert_eq!(catalog_table.filtered_rows_count(), 10);
	assert_eq!(
		catalog_table.sort_config(),
		Some(&SortConfig::new("price", SortOrder::Descending))
	);
	assert_eq!(catalog_table.page_info().page, 2);
	let ids: Vec<u32> = catalog_table.visible_rows().iter().map(|c| c.id).collect();
	assert_eq!(ids, vec![15, 12, 9, 6, 3]);
}

#[rstest]
fn test_unsortable_sort_is_cleared(mut catalog_table: SimpleTable<CatalogCourse>) {
	catalog_table
		.sort_by("price", SortOrder::Ascending)
		.unwrap();

	ViewState::from_query_string("sort=missing&page=9").apply_to_table(&mut catalog_table);

	assert!(catalog_table.sort_config().is_none());
	assert_eq!(catalog_table.page_info().page, 3);
}

#[rstest]
fn test_reload_reproduces_state(mut sidebar: FilterSidebar) {
	// Arrange
	sidebar.toggle_option("level", "beginner").unwrap();
	sidebar.toggle_option("category", "data").unwrap();
	let state = ViewState::new()
		.with_filters(sidebar.selection().clone())
		.with_view(ViewMode::List)
		.with_category("video")
		.with_page(2);

	// Act
	let reloaded = ViewState::from_query_string(&format!("?{}", state.to_query_string()));

	// Assert
	assert_eq!(reloaded, state);
	assert_eq!(&reloaded.filters, sidebar.selection());
}

#[rstest]
fn test_view_state_and_sidebar_view_serde_round_trip(mut sidebar: FilterSidebar) {
	// Arrange
	sidebar.toggle_option("level", "advanced").unwrap();
	sidebar.set_search("category", "da").unwrap();
	let state = ViewState::new()
		.with_filters(sidebar.selection().clone())
		.with_view(ViewMode::List)
		.with_sort(SortConfig::new("price", SortOrder::Descending))
		.with_search("react")
		.with_page(3);
	let view = sidebar.render();

	// Act
	let state_json = serde_json::to_value(&state).unwrap();
	let view_json = serde_json::to_string(&view).unwrap();

	// Assert
	assert_eq!(state_json["view"], "list");
	assert_eq!(state_json["filters"]["level"][0], "advanced");
	assert_eq!(serde_json::from_value::<ViewState>(state_json).unwrap(), state);
	assert_eq!(serde_json::from_str::<SidebarView>(&view_json).unwrap(), view);
}

mod properties {
	use super::*;
	use campus_filters::RESERVED_KEYS;
	use proptest::prelude::*;

	fn selection() -> impl Strategy<Value = FilterSelection> {
		let key = "[a-z_]{1,8}".prop_filter("reserved", |k| !RESERVED_KEYS.contains(&k.as_str()));
		let values = prop::collection::btree_set("[ -~]{1,12}", 1..4);
		prop::collection::btree_map(key, values, 0..4).prop_map(|sections| {
			let mut selection = FilterSelection::new();
			for (key, values) in sections {
				selection.set(key, values);
			}
			selection
		})
	}

	fn view_state() -> impl Strategy<Value = ViewState> {
		(
			selection(),
			any::<bool>(),
			proptest::option::of(("[a-z]{1,6}", any::<bool>())),
			"[a-z ]{0,10}",
			1usize..50,
		)
			.prop_map(|(filters, list, sort, q, page)| {
				let mut state = ViewState::new()
					.with_filters(filters)
					.with_search(&q)
					.with_page(page);
				if list {
					state = state.with_view(ViewMode::List);
				}
				if let Some((field, descending)) = sort {
					let order = if descending {
						SortOrder::Descending
					} else {
						SortOrder::Ascending
					};
					state = state.with_sort(SortConfig::new(field, order));
				}
				state
			})
	}

	proptest! {
		#[test]
		fn selection_survives_query_string(filters in selection()) {
			let state = ViewState::new().with_filters(filters.clone());
			let decoded = ViewState::from_query_string(&state.to_query_string());
			prop_assert_eq!(decoded.filters, filters);
		}

		#[test]
		fn encode_decode_is_identity(state in view_state()) {
			let decoded = ViewState::from_query_string(&state.to_query_string());
			prop_assert_eq!(decoded, state);
		}

		#[test]
		fn decode_then_encode_is_stable(raw in "[a-z=&%+0-9-]{0,40}") {
			let once = ViewState::from_query_string(&raw).to_query_string();
			let twice = ViewState::from_query_string(&once).to_query_string();
			prop_assert_eq!(once, twice);
		}
	}
}
