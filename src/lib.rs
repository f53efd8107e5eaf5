//! Firdesk — client core for a law-enforcement case-management assistant.
//!
//! This crate is the transport-agnostic layer a desktop or mobile shell
//! embeds: the typed data model (cases, evidence, analysis results), the
//! backend HTTP client, the in-memory session store with its status
//! state machines, the filing workflow, chain-of-custody hashing, and
//! the display-only scoring heuristics. It contains no UI and no
//! persistence — the backend is the source of truth, the store is the
//! session's view of it.

pub mod client;
pub mod config;
pub mod custody;
pub mod models;
pub mod scoring;
pub mod store;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding shell. Call once at startup;
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
