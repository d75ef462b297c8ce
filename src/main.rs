//! postscroll — an infinite-scrolling, virtualized posts list for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! +-----------+  oneshot   +----------+  draw()  +----------+
//! |  feed/    | ---------> |  app.rs  | -------> |  ui.rs   |
//! | (blocking |  (slot)    | (state)  |          | (render) |
//! |   pool)   | <--------- +----------+          +----------+
//! +-----------+ request_      ^    | render_range()
//!               next_page()   |    v
//!                        +----------+  +-----------+
//!                        | input.rs |  | window.rs |
//!                        +----------+  +-----------+
//! ```
//!
//! * **`source/`** — the `DataSource` trait, `Item`/`Page`, and the HTTP
//!   implementation.
//! * **`feed`** — the paginated fetch controller and its single in-flight
//!   fetch slot.
//! * **`window`** — row geometry: visible/render ranges and the load trigger.
//! * **`app`** — owns the mounted feed, scroll position and notices.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key and mouse events to `App` mutations.
//! * **`config`** — command-line options.
//! * **`main`** — wires everything together: parse args, set up logging, the
//!   runtime and the terminal, and run the event loop.

mod app;
mod config;
mod feed;
mod input;
mod source;
mod ui;
mod window;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Args;
use source::{DataSource, HttpSource};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode, alternate-screen and mouse-capture lifetime via
/// [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send logs to `path` when given. Without a log file nothing is installed:
/// the terminal belongs to the UI.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;
    install_panic_hook();

    // -- configure the page source -------------------------------------------
    let source: Arc<dyn DataSource> =
        Arc::new(HttpSource::new(&args.endpoint, "Virtualized Posts")?);
    tracing::info!(endpoint = %args.endpoint, page_size = args.page_size, "starting");

    // -- runtime for page fetches --------------------------------------------
    // Fetches run on the blocking pool; the UI loop stays on this thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("postscroll-fetch")
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = {
        let _enter = runtime.enter();
        run(&args, Arc::clone(&source))
    };

    // A fetch may still be in flight; don't wait for it.
    runtime.shutdown_background();
    result
}

fn run(args: &Args, source: Arc<dyn DataSource>) -> Result<()> {
    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(source, args.feed_config(), args.window_config());

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply a finished page fetch, expire notices.
    //   2. Render the UI.
    //   3. Poll for keyboard / mouse input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        app.tick(Utc::now());

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => input::handle_key_event(&mut app, key),
                Event::Mouse(mouse) => input::handle_mouse_event(&mut app, mouse),
                _ => {}
            }
        }

        if app.quit {
            break;
        }
    }

    tracing::info!(items = app.feed.items().len(), "quitting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
