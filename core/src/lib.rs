//! # Item Store Core
//!
//! State types, actions and the pure reducer behind the observable item store.
//!
//! ## Core Concepts
//!
//! - **State**: [`ItemListState`], the single aggregate the store exposes
//! - **Action**: [`ItemAction`], every transition the list supports
//! - **Reducer**: Pure function `(&State, Action, Environment) → State`
//! - **Environment**: Injected values the reducer needs (the default title)
//!
//! The runtime crate owns the mutable cell and the listeners; nothing here
//! performs I/O or holds shared state.
//!
//! ## Example
//!
//! ```
//! use item_store_core::{
//!     InitialState, ItemAction, ItemEnvironment, ItemListReducer, ItemListState, Reducer,
//! };
//!
//! let state = ItemListState::from_initial(InitialState::from_list(Vec::new()));
//! let reducer = ItemListReducer::new();
//! let env = ItemEnvironment::default();
//!
//! let next = reducer.reduce(&state, ItemAction::Add, &env);
//! assert_eq!(next.last_code.get(), 1);
//! assert!(state.is_empty());
//! ```

pub use serde::{Deserialize, Serialize};

/// Actions accepted by the item list reducer
pub mod action;

/// Domain state types
pub mod state;

/// The item list reducer
pub mod item_list;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(&State, Action, Environment) → State`.
/// The previous state is borrowed immutably so a snapshot handed to an
/// observer can never change underneath it.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected values this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CounterReducer {
    ///     type State = CounterState;
    ///     type Action = CounterAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(&self, state: &CounterState, action: CounterAction, _env: &()) -> CounterState {
    ///         match action {
    ///             CounterAction::Increment => CounterState { count: state.count + 1 },
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected values
        type Environment;

        /// Derive the next state from the current one
        ///
        /// # Arguments
        ///
        /// - `state`: The current state, read only
        /// - `action`: The action to process
        /// - `env`: Reference to injected values
        ///
        /// # Returns
        ///
        /// A new state value. The input is left untouched.
        fn reduce(
            &self,
            state: &Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Self::State;
    }
}

/// Environment module - Values injected into the reducer
pub mod environment {
    /// Title given to items created by [`ItemAction::Add`](crate::ItemAction::Add)
    pub const DEFAULT_TITLE: &str = "New record";

    /// Environment for the item list reducer
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ItemEnvironment {
        /// Placeholder title for new items
        pub default_title: String,
    }

    impl ItemEnvironment {
        /// Creates a new environment with the given placeholder title
        #[must_use]
        pub fn new(default_title: impl Into<String>) -> Self {
            Self {
                default_title: default_title.into(),
            }
        }
    }

    impl Default for ItemEnvironment {
        fn default() -> Self {
            Self::new(DEFAULT_TITLE)
        }
    }
}

// Re-export commonly used items
pub use action::{ItemAction, SelectionMode};
pub use environment::{DEFAULT_TITLE, ItemEnvironment};
pub use item_list::ItemListReducer;
pub use reducer::Reducer;
pub use state::{InitialState, Item, ItemCode, ItemListState};
