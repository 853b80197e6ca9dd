//! Actions accepted by the item list reducer.

use crate::state::ItemCode;

/// How selecting one item affects the others
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Every other item is deselected (plain click)
    #[default]
    Exclusive,
    /// Other items keep their selection (click with a modifier held)
    Additive,
}

impl SelectionMode {
    /// Maps a "modifier held" flag to a mode
    ///
    /// `false` means exclusive selection, `true` means additive.
    #[must_use]
    pub const fn from_modifier(modifier_held: bool) -> Self {
        if modifier_held {
            Self::Additive
        } else {
            Self::Exclusive
        }
    }

    /// Whether other items are left untouched
    #[must_use]
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Additive)
    }
}

impl From<bool> for SelectionMode {
    fn from(modifier_held: bool) -> Self {
        Self::from_modifier(modifier_held)
    }
}

/// Every transition the item list supports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemAction {
    /// Append a new item with the next code
    Add,
    /// Remove the item with this code, if present
    Delete {
        /// Item to remove
        code: ItemCode,
    },
    /// Toggle the item with this code
    Select {
        /// Item to toggle
        code: ItemCode,
        /// Effect on the other items
        mode: SelectionMode,
    },
}

impl ItemAction {
    /// Short name used for logging and metric labels
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete { .. } => "delete",
            Self::Select { .. } => "select",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_flag_maps_to_mode() {
        assert_eq!(SelectionMode::from_modifier(false), SelectionMode::Exclusive);
        assert_eq!(SelectionMode::from(true), SelectionMode::Additive);
        assert!(!SelectionMode::default().is_additive());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(ItemAction::Add.name(), "add");
        assert_eq!(
            ItemAction::Delete {
                code: ItemCode::new(1)
            }
            .name(),
            "delete"
        );
    }
}
