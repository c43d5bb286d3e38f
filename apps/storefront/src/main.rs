//! # Folio Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Storefront                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 Presentation Layer (separate process)            │  │
//! │  │   Home • Book list • Detail • Cart • My page • Admin             │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                     JSON lines  │  stdin / stdout                      │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │                    Rust Shell (this crate)                       │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Hands off to lib.rs                               │  │
//! │  │  lib.rs ─────► Logging, config, serve loop                       │  │
//! │  │  commands/ ──► list_books, add_to_cart, checkout, add_review     │  │
//! │  │  state/ ─────► AppState, ConfigState                             │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     Key-Value Store                              │  │
//! │  │  store.json: user, reviews_<bookId>, purchases_<userId>          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    folio_storefront_lib::run()
}
