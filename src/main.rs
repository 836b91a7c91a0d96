mod app;
mod config;
mod logging;
mod registry;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{self, Write};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    if let Some(path) = logging::init(&cfg.logging)? {
        tracing::debug!(path = %path.display(), "log file opened");
    }

    let books = registry::seed::load(cfg.catalog.seed_file.as_deref())
        .context("Failed to load seed catalog")?;
    tracing::info!(count = books.len(), "catalog loaded");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg, books).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exited with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    books: Vec<registry::Book>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let tick_rate = std::time::Duration::from_millis(cfg.ui.tick_rate_ms.max(10));

    let mut state = AppState::new(cfg, books);
    let size = terminal.size()?;
    state.set_viewport(ui::layout::table_rows(size.height));

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
    drop(event_tx);

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::Quit => state.should_quit = true,
                Action::Bell => state.pending_bell = true,
            }
        }

        if state.should_quit {
            tracing::info!(remaining = state.registry.len(), "quitting");
            // Edits are never saved; the final catalog only goes to the log
            match registry::seed::to_json(state.registry.books()) {
                Ok(snapshot) => tracing::debug!(%snapshot, "final catalog"),
                Err(e) => tracing::warn!(error = %e, "failed to snapshot catalog"),
            }
            break;
        }

        if state.pending_bell {
            let _ = io::stdout().write_all(b"\x07");
            let _ = io::stdout().flush();
            state.pending_bell = false;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
