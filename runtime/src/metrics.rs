//! Metric names and descriptions for the store.
//!
//! The store only records through the `metrics` facade. Nothing is exported
//! unless the host application installs a recorder; call
//! [`register_metrics`] once after installing one to attach descriptions.

use metrics::{describe_counter, describe_gauge};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge};

/// Number of times a new state was installed
pub const STATE_REPLACED: &str = "store.state.replaced";

/// Number of listener invocations
pub const LISTENERS_NOTIFIED: &str = "store.listeners.notified";

/// Currently registered listeners
pub const LISTENERS_ACTIVE: &str = "store.listeners.active";

/// Domain actions processed, labelled by `action`
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Register descriptions for every store metric.
pub fn register_metrics() {
    describe_counter!(STATE_REPLACED, "Total number of state replacements");
    describe_counter!(
        LISTENERS_NOTIFIED,
        "Total number of listener invocations across all notification passes"
    );
    describe_gauge!(LISTENERS_ACTIVE, "Listeners currently subscribed to the store");
    describe_counter!(ACTIONS_TOTAL, "Domain actions reduced by the store");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_without_recorder_is_harmless() {
        register_metrics();
        counter!(STATE_REPLACED).increment(1);
        gauge!(LISTENERS_ACTIVE).set(0.0);
    }
}
