use pretty_assertions::assert_eq;
use rentio_query::{FilterSet, FilterValue, SearchState, MECHANISM_KEYS, SEARCH_HISTORY_LIMIT};
use std::collections::BTreeSet;

/// active_filter_names must always equal keys(filters) minus the
/// mechanism keys.
fn assert_active_invariant(state: &SearchState) {
    let expected: BTreeSet<String> = state
        .filters()
        .names()
        .filter(|name| !MECHANISM_KEYS.contains(name))
        .map(String::from)
        .collect();
    assert_eq!(state.active_filter_names(), &expected);
}

// ── Query and search history ──────────────────────────────────────

#[test]
fn new_state_is_empty() {
    let state = SearchState::new();
    assert_eq!(state.query(), "");
    assert!(state.filters().is_empty());
    assert!(state.active_filter_names().is_empty());
    assert!(!state.is_searching());
    assert!(state.search_history().is_empty());
    assert!(!state.has_active_filters());
}

#[test]
fn set_query_records_history_front_first() {
    let mut state = SearchState::new();
    state.set_query("flat");
    state.set_query("studio");

    assert_eq!(state.query(), "studio");
    assert_eq!(state.search_history(), vec!["studio", "flat"]);
}

#[test]
fn empty_query_is_not_recorded() {
    let mut state = SearchState::new();
    state.set_query("flat");
    state.set_query("");

    assert_eq!(state.query(), "");
    assert_eq!(state.search_history(), vec!["flat"]);
}

#[test]
fn repeating_most_recent_query_leaves_history_untouched() {
    let mut state = SearchState::new();
    state.set_query("flat");
    state.set_query("flat");
    assert_eq!(state.search_history(), vec!["flat"]);
}

#[test]
fn re_searching_old_query_moves_it_to_front() {
    let mut state = SearchState::new();
    state.set_query("flat");
    state.set_query("studio");
    state.set_query("flat");
    assert_eq!(state.search_history(), vec!["flat", "studio"]);
}

#[test]
fn history_is_capped() {
    let mut state = SearchState::new();
    for i in 0..15 {
        state.set_query(format!("query {i}"));
    }
    let history = state.search_history();
    assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
    assert_eq!(history[0], "query 14");
    assert_eq!(history[SEARCH_HISTORY_LIMIT - 1], "query 5");
}

// ── Filter updates and active-filter accounting ───────────────────

#[test]
fn update_filters_merges_and_tracks_active() {
    let mut state = SearchState::new();
    state.update_filters(FilterSet::new().with("city", "Lisbon"));
    assert_active_invariant(&state);

    state.update_filters(FilterSet::new().with("bedrooms", 2i64).with("page", 3i64));
    assert_active_invariant(&state);

    let mut expected = BTreeSet::new();
    expected.insert("bedrooms".to_string());
    expected.insert("city".to_string());
    assert_eq!(state.active_filter_names(), &expected);
}

#[test]
fn mechanism_keys_never_count_as_active() {
    let mut state = SearchState::new();
    state.update_filters(
        FilterSet::new()
            .with("page", 2i64)
            .with("page_size", 50i64)
            .with("ordering", "-price"),
    );
    assert_active_invariant(&state);
    assert!(state.active_filter_names().is_empty());
    assert!(!state.has_active_filters());
}

#[test]
fn set_sort_is_mechanism_not_intent() {
    let mut state = SearchState::new();
    state.set_sort("-created_at");
    assert_active_invariant(&state);
    assert!(!state.has_active_filters());
    assert_eq!(
        state.filters().get("ordering"),
        Some(&FilterValue::Text("-created_at".into()))
    );
}

#[test]
fn clear_filter_removes_one() {
    let mut state = SearchState::new();
    state.update_filters(FilterSet::new().with("city", "Lisbon").with("bedrooms", 2i64));
    state.clear_filter("city");
    assert_active_invariant(&state);
    assert!(!state.filters().contains("city"));
    assert!(state.filters().contains("bedrooms"));
}

#[test]
fn updating_filter_to_empty_value_clears_it() {
    let mut state = SearchState::new();
    state.update_filters(FilterSet::new().with("city", "Lisbon"));
    state.update_filters(FilterSet::new().with("city", ""));
    assert_active_invariant(&state);
    assert!(!state.filters().contains("city"));
}

#[test]
fn clear_all_filters_keeps_history() {
    let mut state = SearchState::new();
    state.set_query("flat");
    state.update_filters(FilterSet::new().with("city", "Lisbon"));
    state.set_sort("-price");

    state.clear_all_filters();
    assert_active_invariant(&state);
    assert_eq!(state.query(), "");
    assert!(state.filters().is_empty());
    assert!(!state.has_active_filters());
    // History survives a filter reset.
    assert_eq!(state.search_history(), vec!["flat"]);
}

#[test]
fn has_active_filters_counts_query() {
    let mut state = SearchState::new();
    state.set_query("flat");
    assert!(state.has_active_filters());
    state.set_query("");
    assert!(!state.has_active_filters());
}

#[test]
fn invariant_holds_across_random_sequence() {
    let mut state = SearchState::new();
    state.update_filters(FilterSet::new().with("a", 1i64).with("page", 2i64));
    assert_active_invariant(&state);
    state.clear_filter("a");
    assert_active_invariant(&state);
    state.set_sort("x");
    assert_active_invariant(&state);
    state.update_filters(FilterSet::new().with("b", "y").with("page_size", 10i64));
    assert_active_invariant(&state);
    state.clear_all_filters();
    assert_active_invariant(&state);
}
