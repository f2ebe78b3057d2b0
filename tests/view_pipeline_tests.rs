//! End-to-end pipeline tests: one ViewState over a document collection,
//! exercising filter, sort, pagination and selection together.

mod pipeline_harness;

use pipeline_harness::*;

use listwise::core::entity::EntityId;
use listwise::pipeline::filter::{FilterState, Operator, Predicate, SearchScope};
use listwise::pipeline::paginate::paginate;
use listwise::pipeline::selection::SelectionMode;
use listwise::pipeline::sort::SortState;
use listwise::view::state::ViewState;

#[test]
fn test_57_documents_scoped_query_and_select_across_pages() {
    // 57 documents; the odd-numbered 29 are invoices keyed "INV-nnn".
    let data = document_set(57);
    let mut view = ViewState::<Document>::with_page_size(25);
    view.set_scope(SearchScope::Field("documentKey".to_string()));
    view.set_query("INV");

    let page = view.apply(&data);
    assert_eq!(page.total_items, 29);
    assert_eq!(page.total_pages, 2);
    assert!(
        page.items
            .iter()
            .all(|d| d.document_key.to_lowercase().contains("inv"))
    );

    // Select all of page 1, then all of page 2.
    view.toggle_select_page(&data);
    assert_eq!(view.selection_mode(&data), SelectionMode::Page);
    assert_eq!(view.selection().len(), 25);

    view.set_page(2);
    view.toggle_select_page(&data);

    // 29 matching documents and 29 selected: everything visible is selected.
    assert_eq!(view.selection().len(), 29);
    assert_eq!(view.selection_mode(&data), SelectionMode::All);
}

#[test]
fn test_pages_partition_the_filtered_set() {
    let data = document_set(57);
    let mut view = ViewState::<Document>::with_page_size(10);
    view.set_query("invoice");

    let first = view.apply(&data);
    let mut seen = Vec::new();
    for page_number in 1..=first.total_pages {
        view.set_page(page_number);
        let page = view.apply(&data);
        assert_eq!(page.current_page, page_number);
        seen.extend(page.items.iter().map(|d| d.id));
    }
    assert_eq!(seen.len(), first.total_items);

    // Union of pages equals the filtered set, order preserved.
    let visible: Vec<i64> = view.visible(&data).iter().map(|d| d.id).collect();
    assert_eq!(seen, visible);
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    let data = document_set(57);
    let mut view = ViewState::<Document>::with_page_size(10);
    view.set_page(4);
    assert_eq!(view.apply(&data).current_page, 4);

    view.set_page_size(25);
    let page = view.apply(&data);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 25);
}

#[test]
fn test_selection_survives_filtering_and_unfiltering() {
    let data = document_set(20);
    let mut view = ViewState::<Document>::with_page_size(50);

    // Select a purchase order, then filter so only invoices are visible.
    view.toggle(EntityId::Number(2));
    view.set_query("INV");
    assert!(!view.visible_ids(&data).contains(&EntityId::Number(2)));
    assert!(view.selection().contains(&EntityId::Number(2)));
    assert_eq!(view.selection_mode(&data), SelectionMode::Mixed);

    // Clear the filter: the hidden selection is visible again.
    view.set_query("");
    assert!(view.page_ids(&data).contains(&EntityId::Number(2)));
    assert_eq!(view.selection().len(), 1);
}

#[test]
fn test_deselecting_one_page_leaves_other_pages_selected() {
    let data = document_set(30);
    let mut view = ViewState::<Document>::with_page_size(10);

    view.toggle_select_page(&data);
    view.set_page(2);
    view.toggle_select_page(&data);
    assert_eq!(view.selection().len(), 20);

    // Page 2 is fully selected; toggling removes exactly its ten ids.
    view.toggle_select_page(&data);
    assert_eq!(view.selection().len(), 10);
    let page1_ids = {
        view.set_page(1);
        view.page_ids(&data)
    };
    assert!(page1_ids.iter().all(|id| view.selection().contains(id)));
}

#[test]
fn test_invert_page_only_touches_the_current_page() {
    let data = document_set(10);
    let mut view = ViewState::<Document>::with_page_size(5);
    view.toggle(EntityId::Number(1));
    view.toggle(EntityId::Number(7)); // page 2

    view.invert_page(&data);
    // Page 1 flipped: 1 deselected, 2..=5 selected. Page 2 untouched.
    assert!(!view.selection().contains(&EntityId::Number(1)));
    for id in 2..=5 {
        assert!(view.selection().contains(&EntityId::Number(id)));
    }
    assert!(view.selection().contains(&EntityId::Number(7)));
}

#[test]
fn test_sort_by_dotted_field_with_missing_intermediates() {
    let mut data = document_set(4);
    data[0].centre_code = Some("RC-2".to_string());
    data[2].centre_code = Some("RC-1".to_string());

    let mut view = ViewState::<Document>::with_page_size(10);
    view.set_sort(Some(SortState::ascending("responsibilityCentre.code")));

    let page = view.apply(&data);
    let ids: Vec<i64> = page.items.iter().map(|d| d.id).collect();
    // Missing centres sort earliest, keeping their relative order.
    assert_eq!(ids, vec![2, 4, 3, 1]);
}

#[test]
fn test_structured_predicates_with_text_query() {
    let mut data = document_set(20);
    for doc in data.iter_mut().filter(|d| d.id > 15) {
        doc.status = Some("approved".to_string());
    }

    let mut view = ViewState::<Document>::with_page_size(50);
    view.set_query("inv");
    view.set_predicates(vec![
        Predicate::new("status", Operator::Equals, "approved"),
        Predicate::new("amount", Operator::GreaterThan, 1_000.0),
    ]);

    let page = view.apply(&data);
    // Invoices (odd ids) that are approved (id > 15) with amount > 1000.
    assert_eq!(
        page.items.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![17, 19]
    );
}

#[test]
fn test_stale_persisted_filter_state_degrades_to_noop() {
    // A filter naming a field that no longer exists on the entity.
    let stale = FilterState {
        predicates: vec![Predicate::new("legacyField", Operator::Equals, "x")],
        ..FilterState::default()
    };
    let data = document_set(8);
    let mut view = ViewState::<Document>::with_page_size(10);
    view.set_predicates(stale.predicates);

    assert_eq!(view.apply(&data).total_items, 8);
}

#[test]
fn test_shrinking_filter_clamps_the_current_page() {
    let data = document_set(57);
    let mut view = ViewState::<Document>::with_page_size(10);
    view.apply(&data);
    view.set_page(6); // last page of the unfiltered set

    // Narrowing the filter resets to page 1 outright.
    view.set_query("INV");
    assert_eq!(view.apply(&data).current_page, 1);

    // A later direct page request beyond the new bound clamps on apply.
    view.set_page(9);
    let page = view.apply(&data);
    assert_eq!(page.current_page, page.total_pages);
}

#[test]
fn test_paginate_is_consistent_with_view_page_ids() {
    let data = document_set(23);
    let mut view = ViewState::<Document>::with_page_size(10);
    view.set_page(3);

    let page = view.apply(&data);
    let direct = paginate(&view.visible(&data), 3, 10);
    assert_eq!(page.items, direct.items);
    assert_eq!(
        view.page_ids(&data),
        number_ids(page.items.iter().map(|d| d.id).collect::<Vec<_>>())
    );
}
