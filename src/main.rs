//! termincache CLI - refresh and print one owner's appointment list.
//!
//! Thin wiring around the library: loads config, opens the process-wide
//! replica store, runs a single refresh and prints the result with its
//! provenance. Sign-in happens elsewhere; the owner uid is passed as an
//! argument (or remembered from the previous run).

use std::io;

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use termincache::{ApiClient, Config, Provenance, ReplicaStore, SyncCoordinator, UserSession};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("termincache starting");

    let mut config = Config::load()?;

    let uid = match std::env::args().nth(1).or_else(|| config.last_uid.clone()) {
        Some(uid) => uid,
        None => bail!("usage: termincache <owner-uid>"),
    };
    let session = UserSession::new(uid, None);

    // Remember the owner for the next run.
    config.last_uid = Some(session.uid.clone());
    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "could not persist config");
    }

    let store = ReplicaStore::global(config.db_path()?).await?;
    let client = ApiClient::new(config.api_base_url())?;
    let coordinator = SyncCoordinator::new(client, store.clone());

    let outcome = coordinator.refresh(session.owner_id()).await;

    match outcome.provenance {
        Provenance::Fresh => {}
        Provenance::Stale => println!("(offline - showing locally cached appointments)"),
        Provenance::Unavailable => println!("(offline - no cached appointments available)"),
    }

    if outcome.appointments.is_empty() {
        println!("No appointments for {}", session.display_name());
        return Ok(());
    }

    for appointment in &outcome.appointments {
        println!(
            "{:>5}  {}  {:<24}  {}",
            appointment.id,
            appointment.formatted_start(),
            appointment.title,
            appointment.ort
        );
    }

    Ok(())
}
