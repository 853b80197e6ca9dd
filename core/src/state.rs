//! Domain state for the item list.
//!
//! The store holds exactly one [`ItemListState`]. Every transition produces a
//! brand-new value; nothing reachable from a previous snapshot is mutated.
//!
//! # Invariants
//!
//! - `code` is unique within `list` and never reused.
//! - `last_code >= max(item.code)` for every live item, and `last_code` never
//!   decreases (it survives deletion of the highest-coded item).

use serde::{Deserialize, Serialize};

/// Unique, monotonically assigned identifier of an item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(u64);

impl ItemCode {
    /// The code reported for an empty list
    pub const ZERO: Self = Self(0);

    /// Creates an `ItemCode` from a raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The code following this one, or `None` once the code space is spent
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl From<u64> for ItemCode {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single record in the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identifier, fixed at creation
    pub code: ItemCode,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Whether the item is currently selected
    #[serde(default)]
    pub selected: bool,
    /// How many times the item itself was toggled, saturating at `u64::MAX`
    #[serde(default)]
    pub selection_count: u64,
}

impl Item {
    /// Creates a fresh, unselected item
    #[must_use]
    pub fn new(code: ItemCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            selected: false,
            selection_count: 0,
        }
    }

    /// Returns a copy with `selected` flipped and the toggle counted
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            selected: !self.selected,
            selection_count: self.selection_count.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns a copy that is deselected, without counting a toggle
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            selected: false,
            ..self.clone()
        }
    }
}

/// Construction input for a store
///
/// Only `list` is required. `last_code` is never supplied by the caller; it
/// is derived from the list when the state is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialState<X = ()> {
    /// Items present at startup, in display order
    pub list: Vec<Item>,
    /// Caller-defined data carried through every transition
    #[serde(default)]
    pub extension: X,
}

impl InitialState<()> {
    /// Initial state with no extension data
    #[must_use]
    pub const fn from_list(list: Vec<Item>) -> Self {
        Self {
            list,
            extension: (),
        }
    }
}

/// The complete observable condition of the store
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListState<X = ()> {
    /// Items in insertion order
    pub list: Vec<Item>,
    /// Highest code ever assigned
    pub last_code: ItemCode,
    /// Caller-defined data, preserved verbatim
    #[serde(default)]
    pub extension: X,
}

impl<X> ItemListState<X> {
    /// Builds the state from its construction input, deriving `last_code`
    #[must_use]
    pub fn from_initial(initial: InitialState<X>) -> Self {
        let last_code = initial
            .list
            .iter()
            .map(|item| item.code)
            .max()
            .unwrap_or(ItemCode::ZERO);

        Self {
            list: initial.list,
            last_code,
            extension: initial.extension,
        }
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the item with the given code
    #[must_use]
    pub fn get(&self, code: ItemCode) -> Option<&Item> {
        self.list.iter().find(|item| item.code == code)
    }

    /// Checks if an item with the given code is present
    #[must_use]
    pub fn contains(&self, code: ItemCode) -> bool {
        self.get(code).is_some()
    }

    /// Iterates over selected items in list order
    pub fn selected(&self) -> impl Iterator<Item = &Item> {
        self.list.iter().filter(|item| item.selected)
    }

    /// Number of selected items
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}

impl<X> From<InitialState<X>> for ItemListState<X> {
    fn from(initial: InitialState<X>) -> Self {
        Self::from_initial(initial)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;

    fn item(code: u64) -> Item {
        Item::new(ItemCode::new(code), format!("Item {code}"))
    }

    #[test]
    fn test_last_code_is_max_of_initial_list() {
        let state = ItemListState::from_initial(InitialState::from_list(vec![item(5), item(2)]));
        assert_eq!(state.last_code, ItemCode::new(5));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_last_code_is_zero_for_empty_list() {
        let state = ItemListState::from_initial(InitialState::from_list(Vec::new()));
        assert_eq!(state.last_code, ItemCode::ZERO);
        assert!(state.is_empty());
    }

    #[test]
    fn test_toggled_flips_and_counts() {
        let original = item(1);
        let once = original.toggled();
        let twice = once.toggled();

        assert!(once.selected);
        assert_eq!(once.selection_count, 1);
        assert!(!twice.selected);
        assert_eq!(twice.selection_count, 2);
        // source value is untouched
        assert!(!original.selected);
        assert_eq!(original.selection_count, 0);
    }

    #[test]
    fn test_next_code_stops_at_max() {
        assert_eq!(ItemCode::ZERO.next(), Some(ItemCode::new(1)));
        assert_eq!(ItemCode::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_toggled_saturates_selection_count() {
        let mut worn = item(1);
        worn.selection_count = u64::MAX;
        let toggled = worn.toggled();

        assert!(toggled.selected);
        assert_eq!(toggled.selection_count, u64::MAX);
    }

    #[test]
    fn test_cleared_does_not_count() {
        let selected = item(1).toggled();
        let cleared = selected.cleared();

        assert!(!cleared.selected);
        assert_eq!(cleared.selection_count, 1);
    }

    #[test]
    fn test_queries() {
        let mut state = ItemListState::from_initial(InitialState::from_list(vec![item(1), item(2)]));
        state.list[1] = state.list[1].toggled();

        assert!(state.contains(ItemCode::new(2)));
        assert!(!state.contains(ItemCode::new(3)));
        assert_eq!(state.selected_count(), 1);
        assert_eq!(state.selected().next().unwrap().code, ItemCode::new(2));
    }

    #[test]
    fn test_item_defaults_when_fields_missing() {
        let item: Item = serde_json::from_str(r#"{"code": 7}"#).unwrap();
        assert_eq!(item.code, ItemCode::new(7));
        assert_eq!(item.title, "");
        assert!(!item.selected);
        assert_eq!(item.selection_count, 0);
    }

    #[test]
    fn test_initial_state_requires_list() {
        let result = serde_json::from_str::<InitialState>("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = ItemListState::from_initial(InitialState::from_list(vec![item(3)]));
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["lastCode"], 3);
        assert_eq!(json["list"][0]["selectionCount"], 0);
    }
}
