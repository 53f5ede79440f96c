//! Folio terminal entry point.
//!
//! Runs the portfolio shell full-screen in the current terminal.
//! Enter submits, Tab completes, Up/Down walk history, Esc or Ctrl-C quits.
//! Pass a config file as the first argument or through `FOLIO_CONFIG`.
//! Logs go to stderr; redirect it (`2>folio.log`) to keep the screen clean.

mod input;
mod render;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use folio_net::notifier_from_config;
use folio_terminal::Shell;
use folio_types::config::FolioConfig;
use folio_vfs::FileTree;

use input::InputResult;

/// How long to wait for a key before checking for notifier outcomes.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let tree = match &config.tree_path {
        Some(path) => FileTree::load(path)
            .with_context(|| format!("loading file tree from {}", path.display()))?,
        None => FileTree::portfolio(),
    };
    log::info!("Starting folio terminal as {}", config.host_label());

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let notifier = notifier_from_config(&config.notifier)?;
    let mut shell = Shell::new(Arc::new(tree), &config, notifier, runtime.handle().clone());

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let result = run(&mut shell, &mut stdout);

    disable_raw_mode().ok();
    execute!(stdout, LeaveAlternateScreen).ok();

    if shell.pending_notifications() > 0 {
        log::info!(
            "Waiting for {} pending message(s)",
            shell.pending_notifications()
        );
        runtime.block_on(shell.settle());
    }
    result
}

/// Resolve config from the CLI argument, `FOLIO_CONFIG`, or defaults.
fn load_config() -> Result<FolioConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOLIO_CONFIG").ok());
    match path {
        Some(path) => {
            let config = FolioConfig::load(Path::new(&path))
                .with_context(|| format!("loading config from {path}"))?;
            log::info!("Loaded config: {path}");
            Ok(config)
        },
        None => {
            log::info!("No config given, using defaults");
            Ok(FolioConfig::default())
        },
    }
}

/// Main event loop. Returns when the user quits.
fn run(shell: &mut Shell, out: &mut impl Write) -> Result<()> {
    render::draw(out, shell)?;
    loop {
        let mut dirty = shell.poll_notifications() > 0;

        if event::poll(POLL_INTERVAL).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(&key, shell) == InputResult::Quit {
                        return Ok(());
                    }
                    dirty = true;
                },
                Event::Resize(..) => dirty = true,
                _ => {},
            }
        }

        if dirty {
            render::draw(out, shell)?;
        }
    }
}
