mod app;
mod components;
mod config;
mod docs;
mod error;
mod event;
mod handler;
mod keyboard;
mod logging;
mod tui;
mod ui;
mod view;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, LogConfig, SortConfig};
use crate::docs::TreeStore;
use crate::error::{AppError, FatalReporter, LogReporter};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A keyboard-driven browser for a tree of documents.
#[derive(Parser, Debug)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// JSON document tree to browse (defaults to the built-in sample)
    tree_file: Option<PathBuf>,

    /// Config file to load on top of the discovered ones
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial sort field
    #[arg(long, value_parser = ["name", "date"])]
    sort: Option<String>,

    /// Start with descending sort order
    #[arg(long)]
    desc: bool,
}

impl Cli {
    /// Flags expressed as a partial config that wins over every file.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                tree_file: self
                    .tree_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            },
            sort: SortConfig {
                field: self.sort.clone(),
                direction: self.desc.then(|| "desc".to_string()),
            },
            log: LogConfig {
                file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
                level: None,
            },
            ..AppConfig::default()
        }
    }
}

fn load_store(config: &AppConfig) -> error::Result<TreeStore> {
    match config.tree_file() {
        Some(path) if !path.exists() => Err(AppError::InvalidPath(format!(
            "{} does not exist",
            path.display()
        ))),
        Some(path) => TreeStore::from_json_file(path),
        None => TreeStore::sample(),
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let (config, config_warnings) =
        AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    logging::init(&config)?;
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let mut reporter = LogReporter::default();
    let store = load_store(&config).inspect_err(|e| reporter.report_fatal(e))?;

    install_panic_hook();

    let mut tui = Tui::enter()?;
    let mut events = EventHandler::new(Duration::from_millis(16));
    let mut app = App::new(store, &config, events.sender());

    let result = run(&mut tui, &mut app, &mut events).await;

    tui.restore()?;
    if let Err(ref e) = result {
        reporter.report_fatal(e);
    }
    tracing::info!("exiting");
    result
}

async fn run(tui: &mut Tui, app: &mut App, events: &mut EventHandler) -> error::Result<()> {
    loop {
        tui.draw(app)?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(app, key),
            Event::Tick => {}
            Event::Resize(_, _) => {}
            Event::FilterSettled(generation) => app.engine.commit_filter(generation),
            Event::NavigationSettled(token) => app.complete_navigation(token),
        }
        app.sync_view();

        if app.should_quit {
            return Ok(());
        }
    }
}
