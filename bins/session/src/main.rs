//! Coinverter session driver
//!
//! Runs one converter session headless: edit events arrive as JSON lines on
//! stdin, and the slot list is printed as one JSON line per applied event.
//! The market snapshot file is reloaded periodically; its catalog and rates
//! are swapped into the running session.
//!
//! Usage: `echo '{"kind":"amount","index":0,"value":"2"}' | coinverter`

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coinverter_core::{ConversionEngine, EditEvent, EngineOptions, MarketSnapshot};
use coinverter_shared::{AppConfig, AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the slot lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinverter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let snapshot_path = PathBuf::from(&config.snapshot.path);

    // Edits are accepted before any snapshot exists; rates fall back to 1
    let initial = match load_snapshot(&snapshot_path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, code = e.error_code(), path = %snapshot_path.display(), "Starting without rates");
            MarketSnapshot::default()
        }
    };

    let (snapshot_tx, mut snapshot_rx) = watch::channel(Arc::new(initial));
    let mut refreshing = config.snapshot.refresh_secs > 0;
    if refreshing {
        let interval = Duration::from_secs(config.snapshot.refresh_secs);
        tokio::spawn(refresh_snapshot(snapshot_path.clone(), interval, snapshot_tx));
    } else {
        drop(snapshot_tx);
    }

    let snapshot = Arc::clone(&snapshot_rx.borrow_and_update());
    let mut engine = ConversionEngine::new(
        Arc::new(snapshot.rates().clone()),
        EngineOptions::from(&config.converter),
    )
    .with_catalog(snapshot.symbols().cloned())
    .initialize(
        config.converter.default_currencies.iter().cloned(),
        &config.converter.default_amount,
    );
    info!(
        slots = engine.len(),
        currencies = engine.offered_currencies().count(),
        "Converter session started"
    );
    emit(&engine)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read event")? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match decode_event(&line) {
                    Ok(event) => {
                        engine = engine.apply(&event);
                        emit(&engine)?;
                    }
                    Err(e) if e.is_recoverable() => {
                        warn!(error = %e, code = e.error_code(), "Skipping event");
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            changed = snapshot_rx.changed(), if refreshing => {
                if changed.is_err() {
                    warn!("Snapshot refresher stopped");
                    refreshing = false;
                    continue;
                }
                let snapshot = Arc::clone(&snapshot_rx.borrow_and_update());
                engine = engine
                    .with_catalog(snapshot.symbols().cloned())
                    .with_rates(Arc::new(snapshot.rates().clone()));
                emit(&engine)?;
            }
        }
    }

    Ok(())
}

/// Decodes one JSON event line.
fn decode_event(line: &str) -> AppResult<EditEvent> {
    serde_json::from_str(line).map_err(|e| AppError::InvalidEvent(e.to_string()))
}

/// Prints the current slots as one JSON line.
fn emit(engine: &ConversionEngine) -> anyhow::Result<()> {
    let line = serde_json::to_string(&engine.views()).context("Failed to encode slots")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").context("Failed to write slots")?;
    stdout.flush().context("Failed to flush slots")?;
    Ok(())
}

/// Reads and decodes the snapshot file.
async fn load_snapshot(path: &Path) -> AppResult<MarketSnapshot> {
    let payload = tokio::fs::read_to_string(path).await?;
    let snapshot = MarketSnapshot::from_json(&payload)?;
    info!(
        path = %path.display(),
        currencies = snapshot.catalog().len(),
        "Loaded market snapshot"
    );
    Ok(snapshot)
}

/// Reloads the snapshot every `interval` and publishes each new one.
///
/// A failed reload keeps the previous snapshot in place. A bad payload is
/// retried on the next tick; losing the file is logged as an error.
async fn refresh_snapshot(path: PathBuf, interval: Duration, tx: watch::Sender<Arc<MarketSnapshot>>) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; the initial load already happened
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match load_snapshot(&path).await {
            Ok(snapshot) => {
                if tx.send(Arc::new(snapshot)).is_err() {
                    break;
                }
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, code = e.error_code(), "Keeping previous market snapshot");
            }
            Err(e) => error!(error = %e, code = e.error_code(), "Failed to reload market snapshot"),
        }
    }
}
