//! Contact form TUI - a terminal contact/support request form
//!
//! A Ratatui-based form with per-field validation, inline error feedback
//! and a simulated asynchronous submission.

mod app;
mod config;
mod platform;
mod state;
mod submit;
mod terminal;
mod ui;

use anyhow::Result;
use app::App;
use config::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use submit::SimulatedSubmitter;
use terminal::TerminalGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_form_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load()?;
    tracing::debug!(?config, "starting");

    // Setup terminal; the guard restores it on every exit path
    let guard = TerminalGuard::enter(io::stdout(), config.pointer_input)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let submitter = Arc::new(SimulatedSubmitter::new(
        config.submit_latency(),
        config.failure_rate,
    ));
    let width = terminal.size()?.width;
    let mut app = App::new(&config, submitter, width);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal before reporting
    drop(terminal);
    drop(guard);

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        let terminal_height = term_size.height;
        app.terminal_size = Some((terminal_height, term_size.width));

        let in_splash = app.in_splash();
        if in_splash {
            app.update_splash(terminal_height);
        }

        // Pick up finished submissions and expired toasts
        app.tick();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while something animates (16ms = ~60fps)
        let poll_duration = if in_splash || app.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key).await?;
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse).await?;
                }
                Event::Paste(text) => {
                    app.handle_paste(text).await?;
                }
                Event::Resize(_width, _height) => {
                    // Layout is recomputed from the terminal size on the next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
