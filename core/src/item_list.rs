//! Reducer logic for the item list.
//!
//! Each transition is a pure function of the previous state: the input is
//! only read, and the returned state shares nothing mutable with it.

use crate::action::{ItemAction, SelectionMode};
use crate::environment::ItemEnvironment;
use crate::reducer::Reducer;
use crate::state::{Item, ItemCode, ItemListState};

/// Reducer for the item list
///
/// Generic over the extension type `X` carried by the state.
#[derive(Debug, Clone, Copy)]
pub struct ItemListReducer<X = ()> {
    _phantom: std::marker::PhantomData<X>,
}

impl<X> ItemListReducer<X> {
    /// Creates a new `ItemListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    fn add(state: &ItemListState<X>, env: &ItemEnvironment) -> ItemListState<X>
    where
        X: Clone,
    {
        // code space spent: no new code can be issued
        let Some(code) = state.last_code.next() else {
            return ItemListState {
                list: state.list.clone(),
                last_code: state.last_code,
                extension: state.extension.clone(),
            };
        };
        let mut list = Vec::with_capacity(state.list.len() + 1);
        list.extend(state.list.iter().cloned());
        list.push(Item::new(code, env.default_title.clone()));

        ItemListState {
            list,
            last_code: code,
            extension: state.extension.clone(),
        }
    }

    fn delete(state: &ItemListState<X>, code: ItemCode) -> ItemListState<X>
    where
        X: Clone,
    {
        ItemListState {
            list: state
                .list
                .iter()
                .filter(|item| item.code != code)
                .cloned()
                .collect(),
            last_code: state.last_code,
            extension: state.extension.clone(),
        }
    }

    fn select(state: &ItemListState<X>, code: ItemCode, mode: SelectionMode) -> ItemListState<X>
    where
        X: Clone,
    {
        let list = state
            .list
            .iter()
            .map(|item| {
                if item.code == code {
                    item.toggled()
                } else if mode.is_additive() {
                    item.clone()
                } else {
                    item.cleared()
                }
            })
            .collect();

        ItemListState {
            list,
            last_code: state.last_code,
            extension: state.extension.clone(),
        }
    }
}

impl<X> Default for ItemListReducer<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Clone> Reducer for ItemListReducer<X> {
    type State = ItemListState<X>;
    type Action = ItemAction;
    type Environment = ItemEnvironment;

    fn reduce(
        &self,
        state: &Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Self::State {
        match action {
            ItemAction::Add => Self::add(state, env),
            ItemAction::Delete { code } => Self::delete(state, code),
            ItemAction::Select { code, mode } => Self::select(state, code, mode),
        }
    }
}
