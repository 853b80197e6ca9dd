//! Integration tests for the list view driven by the store
//!
//! These tests exercise the full loop: command → mutator → new state →
//! notification → view re-reads state.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use item_list::{ListView, Script, render};
use item_store_core::{InitialState, Item, ItemCode};
use item_store_runtime::{Store, StoreConfig};
use item_store_testing::{ListenerProbe, assertions};

#[test]
fn test_demo_script_end_state() {
    let store = Store::new(InitialState::from_list(Vec::new()));
    let view = ListView::attach(&store);

    let script = Script::parse(Script::DEMO).unwrap();
    script.apply(&store);

    let state = store.state();
    // add x3, select 1, select+ 3, select 2 (clears 1 and 3), delete 3, add, delete 9
    assertions::assert_codes(&state, &[1, 2, 4]);
    assertions::assert_selected(&state, &[2]);
    assertions::assert_selection_count(&state, 1, 1);
    assertions::assert_selection_count(&state, 2, 1);
    assertions::assert_selection_count(&state, 4, 0);
    assert_eq!(state.last_code, ItemCode::new(4));

    assert_eq!(view.renders(), script.commands().len());
    assert_eq!(view.last_frame(), render(&state));
}

#[test]
fn test_view_starts_with_current_state() {
    let store = Store::new(InitialState::from_list(vec![Item::new(ItemCode::new(7), "Seeded")]));
    let view = ListView::attach(&store);

    assert_eq!(view.renders(), 0);
    assert_eq!(view.last_frame(), "[ ] 7  Seeded\n");
}

#[test]
fn test_detached_view_stops_rendering() {
    let store = Store::new(InitialState::from_list(Vec::new()));
    let view = ListView::attach(&store);
    let probe = ListenerProbe::new();
    let _other = probe.attach(&store, "other");

    store.add_item();
    view.detach();
    view.detach();
    store.add_item();

    assert_eq!(view.renders(), 1);
    assert_eq!(probe.count("other"), 2);
}

#[test]
fn test_dropping_view_unsubscribes() {
    let store = Store::new(InitialState::from_list(Vec::new()));
    {
        let _view = ListView::attach(&store);
        assert_eq!(store.listener_count(), 1);
    }
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_store_from_json_with_config() {
    let config = StoreConfig::from_json(r#"{"defaultTitle": "Draft"}"#).unwrap();
    let store: Store = Store::from_json(
        r#"{"list": [{"code": 5, "title": "Five"}, {"code": 2, "title": "Two"}]}"#,
        config,
    )
    .unwrap();
    let view = ListView::attach(&store);

    Script::parse("add").unwrap().apply(&store);

    assert_eq!(
        view.last_frame(),
        "[ ] 5  Five\n[ ] 2  Two\n[ ] 6  Draft\n"
    );
}
