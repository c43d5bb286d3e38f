//! # Folio Storefront Library
//!
//! Core library for the storefront shell. The presentation layer talks to
//! it over JSON lines: one request per line on stdin, one response per
//! line on stdout. Logs go to stderr.
//!
//! ## Module Organization
//! ```text
//! folio_storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & serve loop)
//! ├── dispatch.rs     ◄─── Request decoding and routing
//! ├── routes.rs       ◄─── Page paths and route guards
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (storefront + config)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, session guards
//! │   ├── catalog.rs  ◄─── Browsing and navigation
//! │   ├── cart.rs     ◄─── Cart and checkout
//! │   ├── session.rs  ◄─── Login / register / logout / withdraw
//! │   ├── account.rs  ◄─── My page
//! │   ├── reviews.rs  ◄─── Book reviews
//! │   ├── admin.rs    ◄─── Catalog administration
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod dispatch;
pub mod error;
pub mod routes;
pub mod state;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{error, info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use state::{AppState, ConfigState};

/// Runs the storefront shell until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (DEBUG for folio crates), override with RUST_LOG    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then FOLIO_* environment variables                      │
/// │                                                                         │
/// │  3. Open Key-Value Store ─────────────────────────────────────────────► │
/// │     • JSON file in the platform data directory, or in memory            │
/// │     • Restores the signed-in user                                       │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One JSON request per stdin line                                   │
/// │     • One JSON response per stdout line                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let config = ConfigState::from_env();
    info!(store = %config.store_name, "Starting Folio storefront");

    let mut state = match AppState::open(config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Could not open the key-value store");
            return ExitCode::FAILURE;
        }
    };
    info!("State initialized");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match serve(&mut state, stdin.lock(), stdout.lock()) {
        Ok(()) => {
            info!("Input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Request stream failed");
            ExitCode::FAILURE
        }
    }
}

/// Answers every request line from `input` on `output`.
///
/// Blank lines are skipped. Each response is flushed as soon as it is
/// written so the caller can read it before sending the next request.
pub fn serve(state: &mut AppState, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = dispatch::handle_line(state, &line);
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=folio_store=trace` - Show trace for the store crate only
/// - Default: INFO, DEBUG for every `folio*` target
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio=debug"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = subscriber(filter).try_init();
}

/// Formats events to stderr, keeping only what `filter` enables.
fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
}
