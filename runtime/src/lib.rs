//! # Item Store Runtime
//!
//! The observable store that backs an item list view.
//!
//! ## Core Components
//!
//! - **Store**: Owns the current state snapshot and the listener list
//! - **Listeners**: Zero-argument callbacks run synchronously after every
//!   state replacement, in subscription order
//! - **Mutators**: `add_item`, `delete_item`, `select_item` reduce the
//!   current state into a new one and install it through `set_state`
//!
//! Everything runs on the calling thread. There are no locks and no
//! suspension points; a listener that installs state from inside a
//! notification pass triggers a nested pass.
//!
//! ## Example
//!
//! ```
//! use item_store_core::{InitialState, ItemCode, SelectionMode};
//! use item_store_runtime::Store;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let store = Store::new(InitialState::from_list(Vec::new()));
//! let renders = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&renders);
//! let unsubscribe = store.subscribe(move || counter.set(counter.get() + 1));
//!
//! store.add_item();
//! store.select_item(ItemCode::new(1), SelectionMode::Exclusive);
//! assert_eq!(renders.get(), 2);
//! assert_eq!(store.state().selected_count(), 1);
//!
//! unsubscribe.unsubscribe();
//! store.delete_item(ItemCode::new(1));
//! assert_eq!(renders.get(), 2);
//! ```

use item_store_core::{
    InitialState, ItemAction, ItemCode, ItemEnvironment, ItemListReducer, ItemListState, Reducer,
    SelectionMode,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Metric names recorded by the store
pub mod metrics;

/// Listener registry and unsubscribe handles
pub mod listeners;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur while building a store
    ///
    /// Every domain operation on a built store is infallible. These errors
    /// only arise when decoding external input.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// The initial state could not be decoded
        ///
        /// Typically a missing `list` field or an item without a `code`.
        #[error("Invalid initial state: {0}")]
        InvalidInitialState(#[source] serde_json::Error),

        /// The store configuration could not be decoded
        #[error("Invalid store configuration: {0}")]
        InvalidConfig(#[source] serde_json::Error),
    }
}

pub use error::StoreError;
pub use listeners::{ListenerId, Unsubscribe};

/// Configuration for a Store
///
/// # Example
///
/// ```
/// use item_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_default_title("Untitled");
/// assert_eq!(config.default_title, "Untitled");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Title given to items created by [`Store::add_item`]
    pub default_title: String,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
        }
    }

    /// Set the placeholder title for new items
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Decode a configuration from JSON; absent fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the input is not valid JSON
    /// or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(StoreError::InvalidConfig)
    }

    /// The reducer environment derived from this configuration
    #[must_use]
    pub fn environment(&self) -> ItemEnvironment {
        ItemEnvironment::new(self.default_title.clone())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(item_store_core::DEFAULT_TITLE)
    }
}

/// Store module - the observable state container
pub mod store {
    use super::{
        InitialState, ItemAction, ItemCode, ItemEnvironment, ItemListReducer, ItemListState,
        Rc, Reducer, RefCell, SelectionMode, StoreConfig, StoreError, Unsubscribe,
    };
    use crate::listeners::ListenerRegistry;
    use crate::metrics::{ACTIONS_TOTAL, STATE_REPLACED, counter};

    /// The Store - owns the current state and notifies listeners
    ///
    /// The Store manages:
    /// 1. The current state (an immutable snapshot behind `Rc`)
    /// 2. The listener list
    /// 3. The reducer and its environment
    ///
    /// Cloning a `Store` yields another handle to the **same** state and
    /// listeners. A listener that captures a clone keeps the store alive
    /// until it is unsubscribed.
    ///
    /// # Type Parameters
    ///
    /// - `X`: Extension data carried verbatim in the state
    pub struct Store<X = ()> {
        state: Rc<RefCell<Rc<ItemListState<X>>>>,
        listeners: Rc<ListenerRegistry>,
        reducer: ItemListReducer<X>,
        environment: Rc<ItemEnvironment>,
    }

    impl<X: Clone + 'static> Store<X> {
        /// Create a new store with default configuration
        ///
        /// `last_code` is derived from the initial list (its maximum code, or
        /// zero when empty). No listeners are registered.
        #[must_use]
        pub fn new(initial_state: InitialState<X>) -> Self {
            Self::with_config(initial_state, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: InitialState<X>, config: StoreConfig) -> Self {
            let state = ItemListState::from_initial(initial_state);
            tracing::debug!(
                items = state.len(),
                last_code = %state.last_code,
                "Store created"
            );

            Self {
                state: Rc::new(RefCell::new(Rc::new(state))),
                listeners: Rc::new(ListenerRegistry::default()),
                reducer: ItemListReducer::new(),
                environment: Rc::new(config.environment()),
            }
        }

        /// Create a store from a JSON initial state such as
        /// `{"list": [{"code": 1, "title": "First"}]}`
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::InvalidInitialState`] if the JSON does not
        /// decode, including when `list` is missing.
        pub fn from_json(json: &str, config: StoreConfig) -> Result<Self, StoreError>
        where
            X: serde::de::DeserializeOwned + Default,
        {
            let initial: InitialState<X> =
                serde_json::from_str(json).map_err(StoreError::InvalidInitialState)?;
            Ok(Self::with_config(initial, config))
        }

        /// The current state snapshot
        ///
        /// The returned value never changes; later transitions install a new
        /// snapshot instead.
        #[must_use]
        pub fn state(&self) -> Rc<ItemListState<X>> {
            Rc::clone(&self.state.borrow())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let selected = store.with_state(|s| s.selected_count());
        /// ```
        pub fn with_state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&ItemListState<X>) -> T,
        {
            let state = self.state();
            f(&state)
        }

        /// Replace the state wholesale and notify every listener
        ///
        /// Listeners run synchronously in subscription order. This is the
        /// only operation that notifies.
        #[tracing::instrument(skip_all, name = "store_set_state")]
        pub fn set_state(&self, new_state: ItemListState<X>) {
            let items = new_state.len();
            // release the borrow before any listener runs
            let previous = self.state.replace(Rc::new(new_state));
            drop(previous);
            counter!(STATE_REPLACED).increment(1);
            tracing::debug!(items, "State installed");

            let notified = self.listeners.notify();
            tracing::trace!(notified, "Notification pass completed");
        }

        /// Register a zero-argument listener
        ///
        /// Subscribing the same closure twice registers two independent
        /// entries; each needs its own [`Unsubscribe`].
        pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
        where
            F: Fn() + 'static,
        {
            let id = self.listeners.add(Box::new(listener));
            Unsubscribe::new(&self.listeners, id)
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        /// Reduce an action against the current state and install the result
        #[tracing::instrument(skip(self), name = "store_send")]
        pub fn send(&self, action: ItemAction) {
            counter!(ACTIONS_TOTAL, "action" => action.name()).increment(1);

            let current = self.state();
            let next = self.reducer.reduce(&current, action, &self.environment);
            self.set_state(next);
        }

        /// Append a new item with the next unused code
        ///
        /// Once `last_code` is `u64::MAX` no code is left to issue: the list
        /// stays as it is, but listeners are still notified.
        pub fn add_item(&self) {
            let last_code = self.state().last_code;
            if last_code.next().is_none() {
                tracing::warn!(%last_code, "Item codes exhausted, nothing added");
            }
            self.send(ItemAction::Add);
        }

        /// Remove the item with `code`
        ///
        /// `last_code` is left alone so the code is never handed out again.
        /// Listeners are notified even when no item matches.
        pub fn delete_item(&self, code: ItemCode) {
            self.send(ItemAction::Delete { code });
        }

        /// Toggle the item with `code`
        ///
        /// In [`SelectionMode::Exclusive`] every other item is deselected
        /// without counting a toggle; in [`SelectionMode::Additive`] the
        /// others are left as they are.
        pub fn select_item(&self, code: ItemCode, mode: impl Into<SelectionMode>) {
            self.send(ItemAction::Select {
                code,
                mode: mode.into(),
            });
        }
    }

    impl<X> Clone for Store<X> {
        fn clone(&self) -> Self {
            Self {
                state: Rc::clone(&self.state),
                listeners: Rc::clone(&self.listeners),
                reducer: ItemListReducer::new(),
                environment: Rc::clone(&self.environment),
            }
        }
    }

    impl<X: std::fmt::Debug> std::fmt::Debug for Store<X> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state.borrow())
                .field("listeners", &self.listeners.len())
                .field("environment", &self.environment)
                .finish()
        }
    }
}

// Re-export for convenience
pub use store::Store;
