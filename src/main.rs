//! Binary entry point: resolve the data directory, start file logging, load
//! (or seed) the catalog, and drive the Ratatui event loop until the user
//! exits.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use course_catalog::config::Settings;
use course_catalog::logging::init_logging;
use course_catalog::{run_app, App, CatalogStore, Facets, KeyValueStore, MemoryStorage, SqliteStorage};

#[derive(Parser, Debug)]
#[command(name = "course-catalog", version, about = "Browse and curate the course catalog")]
struct Cli {
    /// Directory holding the catalog database and logs
    #[arg(long, env = "COURSE_CATALOG_DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Start the grid filtered to this tech tag (e.g. react)
    #[arg(long)]
    tech: Option<String>,

    /// Start the grid filtered to this category (e.g. uiux)
    #[arg(long)]
    project: Option<String>,

    /// Open the admin panel instead of the grid
    #[arg(long)]
    admin: bool,

    /// Replace the stored catalog with the default listings
    #[arg(long)]
    reset: bool,

    /// Keep the catalog in memory only; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.data_dir.clone())?;
    let _log_guard = init_logging(&settings.log_dir(), &cli.log_level)?;
    info!(data_dir = %settings.data_dir().display(), "starting course catalog");

    if cli.ephemeral {
        launch(MemoryStorage::new(), &cli)
    } else {
        let storage = SqliteStorage::open(&settings.db_path())
            .with_context(|| format!("failed to open {}", settings.db_path().display()))?;
        launch(storage, &cli)
    }
}

fn launch<S: KeyValueStore>(storage: S, cli: &Cli) -> Result<()> {
    let mut store = CatalogStore::load(storage).context("failed to load the catalog")?;
    if cli.reset {
        store.reset();
    }

    let facets = Facets::parse(cli.tech.as_deref(), cli.project.as_deref());
    let mut app = App::new(store, facets, cli.admin);
    run_app(&mut app)
}
