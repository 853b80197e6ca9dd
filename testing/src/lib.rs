//! # Item Store Testing
//!
//! Testing utilities and helpers for the observable item store.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - [`ListenerProbe`], a listener that records every notification
//! - Assertion helpers for item list states
//! - proptest strategies for actions and initial lists
//!
//! ## Example
//!
//! ```
//! use item_store_core::InitialState;
//! use item_store_runtime::Store;
//! use item_store_testing::ListenerProbe;
//!
//! let store = Store::new(InitialState::from_list(Vec::new()));
//! let probe = ListenerProbe::new();
//! let _handle = probe.attach(&store, "view");
//!
//! store.add_item();
//! assert_eq!(probe.calls(), vec!["view"]);
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Notification recorders
pub mod probe {
    use item_store_runtime::{Store, Unsubscribe};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared log of listener invocations
    ///
    /// Several named listeners may record into the same probe, which makes
    /// the relative order of notifications observable.
    #[derive(Debug, Clone, Default)]
    pub struct ListenerProbe {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ListenerProbe {
        /// Create an empty probe
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A callback that records `name` each time it runs
        #[must_use]
        pub fn listener(&self, name: &'static str) -> impl Fn() + 'static {
            let log = Rc::clone(&self.log);
            move || log.borrow_mut().push(name)
        }

        /// Subscribe a recording listener to `store`
        pub fn attach<X: Clone + 'static>(&self, store: &Store<X>, name: &'static str) -> Unsubscribe {
            store.subscribe(self.listener(name))
        }

        /// Every recorded call, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<&'static str> {
            self.log.borrow().clone()
        }

        /// How many times `name` was recorded
        #[must_use]
        pub fn count(&self, name: &str) -> usize {
            self.log.borrow().iter().filter(|n| **n == name).count()
        }

        /// Total number of recorded calls
        #[must_use]
        pub fn total(&self) -> usize {
            self.log.borrow().len()
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.log.borrow_mut().clear();
        }
    }
}

/// Property-based testing utilities
///
/// proptest strategies for the item list domain.
pub mod strategies {
    use item_store_core::{InitialState, Item, ItemAction, ItemCode, SelectionMode};
    use proptest::prelude::*;

    /// Codes used by generated actions; small so they hit existing items
    pub const CODE_RANGE: std::ops::RangeInclusive<u64> = 0..=24;

    /// Any selection mode
    pub fn selection_mode() -> impl Strategy<Value = SelectionMode> {
        prop_oneof![Just(SelectionMode::Exclusive), Just(SelectionMode::Additive)]
    }

    /// Any item action, biased towards `Add` so lists grow
    pub fn item_action() -> impl Strategy<Value = ItemAction> {
        prop_oneof![
            3 => Just(ItemAction::Add),
            1 => CODE_RANGE.prop_map(|c| ItemAction::Delete { code: ItemCode::new(c) }),
            2 => (CODE_RANGE, selection_mode()).prop_map(|(c, mode)| ItemAction::Select {
                code: ItemCode::new(c),
                mode,
            }),
        ]
    }

    /// Only adds and deletes
    pub fn add_or_delete() -> impl Strategy<Value = ItemAction> {
        prop_oneof![
            2 => Just(ItemAction::Add),
            1 => CODE_RANGE.prop_map(|c| ItemAction::Delete { code: ItemCode::new(c) }),
        ]
    }

    /// Initial lists with distinct codes in arbitrary order
    pub fn initial_state() -> impl Strategy<Value = InitialState> {
        proptest::collection::btree_set(1u64..=20, 0..8)
            .prop_flat_map(|codes| {
                let codes: Vec<u64> = codes.into_iter().collect();
                Just(codes).prop_shuffle()
            })
            .prop_map(|codes| {
                InitialState::from_list(
                    codes
                        .into_iter()
                        .map(|c| Item::new(ItemCode::new(c), format!("Item {c}")))
                        .collect(),
                )
            })
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
/// Honours `RUST_LOG`, defaulting to `item_store_runtime=debug`.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_store_runtime=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use probe::ListenerProbe;
