//! # Item List Demo
//!
//! A text view that plays the role of the UI layer around the store.
//!
//! This demo showcases:
//! - A collaborator that subscribes to the store and re-renders on every
//!   notification by re-reading the current state
//! - Event wiring reduced to a tiny command language (`add`, `delete 3`,
//!   `select 2`, `select+ 4`)
//!
//! ## Example
//!
//! ```
//! use item_list::{ListView, Script};
//! use item_store_core::InitialState;
//! use item_store_runtime::Store;
//!
//! let store = Store::new(InitialState::from_list(Vec::new()));
//! let view = ListView::attach(&store);
//!
//! Script::parse("add; add; select 2").unwrap().apply(&store);
//! assert_eq!(view.renders(), 3);
//! assert!(view.last_frame().contains("[x] 2"));
//! view.detach();
//! ```

use item_store_core::{Item, ItemCode, ItemListState, SelectionMode};
use item_store_runtime::{Store, Unsubscribe};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Render the list as one line per item
///
/// ```text
/// [x] 3  New record  (selected 1 time)
/// ```
#[must_use]
pub fn render<X>(state: &ItemListState<X>) -> String {
    if state.is_empty() {
        return "(no records)\n".to_string();
    }

    state.list.iter().map(render_item).collect()
}

fn render_item(item: &Item) -> String {
    let mark = if item.selected { 'x' } else { ' ' };
    let line = format!("[{mark}] {}  {}", item.code, item.title);
    match item.selection_count {
        0 => format!("{line}\n"),
        1 => format!("{line}  (selected 1 time)\n"),
        n => format!("{line}  (selected {n} times)\n"),
    }
}

#[derive(Default)]
struct Frames {
    renders: usize,
    last: String,
}

/// A view that re-renders whenever the store notifies
pub struct ListView {
    frames: Rc<RefCell<Frames>>,
    subscription: Unsubscribe,
}

impl ListView {
    /// Subscribe a new view to `store` and render the current state once
    #[must_use]
    pub fn attach<X: Clone + 'static>(store: &Store<X>) -> Self {
        let frames = Rc::new(RefCell::new(Frames {
            renders: 0,
            last: render(&store.state()),
        }));

        let reader = store.clone();
        let sink = Rc::clone(&frames);
        let subscription = store.subscribe(move || {
            let frame = render(&reader.state());
            tracing::debug!(lines = frame.lines().count(), "View re-rendered");
            let mut frames = sink.borrow_mut();
            frames.renders += 1;
            frames.last = frame;
        });

        Self {
            frames,
            subscription,
        }
    }

    /// Number of re-renders triggered by notifications
    #[must_use]
    pub fn renders(&self) -> usize {
        self.frames.borrow().renders
    }

    /// The most recent rendering
    #[must_use]
    pub fn last_frame(&self) -> String {
        self.frames.borrow().last.clone()
    }

    /// Stop listening to the store
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Errors while parsing a command script
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// The command word is not recognised
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// A command that needs a code was given none
    #[error("Command '{0}' requires an item code")]
    MissingCode(String),

    /// The code is not a non-negative integer
    #[error("Invalid item code '{0}'")]
    InvalidCode(String),
}

/// One user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append a new record
    Add,
    /// Delete the record with this code
    Delete(ItemCode),
    /// Toggle the record with this code
    Select(ItemCode, SelectionMode),
}

impl Command {
    /// Parse a single command such as `select+ 4`
    ///
    /// # Errors
    ///
    /// Returns a [`ScriptError`] for an unknown word or a missing or
    /// malformed code.
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let mut words = input.split_whitespace();
        let word = words.next().unwrap_or_default();

        let code = |name: &str, arg: Option<&str>| -> Result<ItemCode, ScriptError> {
            let arg = arg.ok_or_else(|| ScriptError::MissingCode(name.to_string()))?;
            arg.parse::<u64>()
                .map(ItemCode::new)
                .map_err(|_| ScriptError::InvalidCode(arg.to_string()))
        };

        match word {
            "add" => Ok(Self::Add),
            "delete" => code(word, words.next()).map(Self::Delete),
            "select" => code(word, words.next()).map(|c| Self::Select(c, SelectionMode::Exclusive)),
            "select+" => code(word, words.next()).map(|c| Self::Select(c, SelectionMode::Additive)),
            other => Err(ScriptError::UnknownCommand(other.to_string())),
        }
    }

    /// Invoke the matching store mutator
    pub fn apply<X: Clone + 'static>(self, store: &Store<X>) {
        tracing::info!(command = ?self, "Applying command");
        match self {
            Self::Add => store.add_item(),
            Self::Delete(code) => store.delete_item(code),
            Self::Select(code, mode) => store.select_item(code, mode),
        }
    }
}

/// A sequence of commands separated by `;` or newlines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    commands: Vec<Command>,
}

impl Script {
    /// The script run when none is given on the command line
    pub const DEMO: &'static str = "add; add; add; select 1; select+ 3; select 2; delete 3; add; delete 9";

    /// Parse a script; blank entries are ignored
    ///
    /// # Errors
    ///
    /// Returns the first [`ScriptError`] encountered.
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let commands = input
            .split([';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Command::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { commands })
    }

    /// The parsed commands
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Apply every command in order
    pub fn apply<X: Clone + 'static>(&self, store: &Store<X>) {
        for command in &self.commands {
            command.apply(store);
        }
    }
}
