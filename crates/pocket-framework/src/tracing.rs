//! # Observability
//!
//! Structured logging for repositories and API tiers.
//!
//! - **API tiers** open a span per operation carrying the resource `path`
//!   (and the `id` where there is one).
//! - **Repositories** log `Dispatching` when a task is scheduled, then
//!   `Succeeded` or `Failed` with the error once the callback is chosen.
//! - **Transports** log each request and the status received at `debug`.
//!
//! ```bash
//! RUST_LOG=info cargo run -p pocket-sample -- u1
//! RUST_LOG=pocket_framework=debug cargo run -p pocket-sample -- u1
//! ```

/// Initializes the global subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
