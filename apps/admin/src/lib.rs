//! # Shelf Admin Library
//!
//! Orchestration layer of the Shelf POS admin: product form sessions,
//! operator notices, and logging setup shared by the `shelf-admin` binary.
//!
//! ## Module Organization
//! ```text
//! shelf_admin/
//! ├── lib.rs              ◄─── You are here (tracing setup, re-exports)
//! ├── session/
//! │   ├── mod.rs          ◄─── Session exports
//! │   └── product_form.rs ◄─── ProductFormSession
//! └── error.rs            ◄─── Notice (for the UI), AdminError (for the CLI)
//! ```
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shelf-admin (this crate)                                               │
//! │     │                                                                   │
//! │     ├──► shelf-client  CatalogApi, ClientConfig   (network, config)     │
//! │     └──► shelf-core    drafts, validation, Money  (pure)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod session;

use tracing_subscriber::EnvFilter;

pub use error::{AdminError, AdminResult, Notice, NoticeCode};
pub use session::ProductFormSession;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shelf_client=trace` - Trace the HTTP client only
/// - Default: INFO, DEBUG for the shelf crates
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelf_admin=debug,shelf_client=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
