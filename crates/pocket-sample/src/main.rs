//! # Pocket Sample
//!
//! Fetches one user from the configured backend and logs the outcome.
//!
//! ```bash
//! POCKET__APPLICATION__API_HOST=http://localhost:8080/api/v2 \
//!     RUST_LOG=info cargo run -p pocket-sample -- u1 read
//! ```
//!
//! Arguments: the user id (default `u1`) and an access level (default `read`).

use pocket_framework::tracing::setup_tracing;
use pocket_framework::{AccessLevel, Dto, PlatformServices};
use pocket_sample::{PocketFactory, PocketSettings};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let user_id = args.next().unwrap_or_else(|| "u1".to_string());
    let level: AccessLevel = match args.next() {
        Some(raw) => raw.parse().map_err(|e| format!("{}", e))?,
        None => AccessLevel::Read,
    };

    let settings = PocketSettings::load().map_err(|e| e.to_string())?;
    info!(
        api_host = %settings.application.api_host,
        user = %settings.user.name,
        "Loaded settings"
    );

    let platform = PlatformServices::native(Handle::current(), settings.request_timeout())
        .map_err(|e| e.to_string())?;
    info!(platform = platform.platform(), launch = %platform.new_uuid(), "Platform ready");

    let factory = PocketFactory::new(settings.application, settings.user, platform);
    let repo = factory
        .get_sample_repo(level)
        .map_err(|e| e.to_string())?;

    // Exactly one of the callbacks fires.
    let (tx, mut rx) = mpsc::channel(1);
    let failed = tx.clone();
    let span = tracing::info_span!("fetch_user", user_id = %user_id);
    span.in_scope(|| {
        repo.get(
            user_id.clone(),
            move |user| {
                let _ = tx.try_send(Ok(user));
            },
            move |e| {
                let _ = failed.try_send(Err(e));
            },
        )
    });

    match rx.recv().await {
        Some(Ok(user)) => info!(id = user.id(), name = user.name(), "Fetched user"),
        Some(Err(e)) => error!(error = %e, "Fetching user failed"),
        None => error!("Repository dropped the callback"),
    }

    info!("Sample completed");
    Ok(())
}
