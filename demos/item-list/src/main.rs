//! Item list demo binary
//!
//! Builds a store, attaches a text view, and replays a command script.

use anyhow::Context;
use clap::Parser;
use item_list::{ListView, Script};
use item_store_core::InitialState;
use item_store_runtime::{Store, StoreConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "item-list",
    version,
    about = "Drive an observable item list from a command script"
)]
struct Cli {
    /// JSON file with the initial state, e.g. {"list": [{"code": 1}]}
    #[arg(long = "state", value_name = "PATH")]
    state: Option<PathBuf>,

    /// JSON file with store configuration, e.g. {"defaultTitle": "Draft"}
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Commands separated by ';' (add, delete N, select N, select+ N)
    #[arg(value_name = "SCRIPT")]
    script: Option<String>,
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_list=debug,item_store_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StoreConfig::from_json(&read(path)?)?,
        None => StoreConfig::default(),
    };

    let store: Store = match &cli.state {
        Some(path) => Store::from_json(&read(path)?, config)?,
        None => Store::with_config(InitialState::from_list(Vec::new()), config),
    };

    let script = Script::parse(cli.script.as_deref().unwrap_or(Script::DEMO))?;

    println!("=== Item List ===\n");
    let view = ListView::attach(&store);
    print!("{}", view.last_frame());

    for command in script.commands() {
        println!("\n>>> {command:?}");
        command.apply(&store);
        print!("{}", view.last_frame());
    }

    let state = store.state();
    println!(
        "\n{} records, {} selected, last code {} ({} renders)",
        state.len(),
        state.selected_count(),
        state.last_code,
        view.renders()
    );

    Ok(())
}
