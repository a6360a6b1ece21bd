//! Divvy snapshot runner
//!
//! Reads a group snapshot as JSON and prints who owes whom and how to settle.
//!
//! ```text
//! divvy <snapshot.json> [viewer-member-id]
//! ```

mod report;

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use divvy_core::{GroupSnapshot, SettlementEngine};
use divvy_shared::config::LoggingConfig;
use divvy_shared::types::MemberId;
use divvy_shared::{AppConfig, AppError};

use crate::report::Report;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(code, "{err:#}");
            eprintln!("{code}: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging);

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| AppError::Validation("usage: divvy <snapshot.json> [viewer-member-id]".into()))?;
    let viewer = args
        .next()
        .map(|raw| {
            raw.parse::<MemberId>()
                .map_err(|e| AppError::Validation(format!("Invalid member id '{raw}': {e}")))
        })
        .transpose()?;

    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read snapshot {path}"))?;
    let snapshot: GroupSnapshot = serde_json::from_str(&contents)
        .map_err(|e| AppError::Validation(format!("Invalid snapshot {path}: {e}")))?;
    info!(
        group_id = %snapshot.group_id,
        members = snapshot.members.len(),
        expenses = snapshot.expenses.len(),
        settlements = snapshot.settlements.len(),
        "Loaded snapshot"
    );

    let engine = SettlementEngine::from_config(&config.engine)?;
    let report = Report::build(&engine, &snapshot, viewer)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.as_str().into());
    // Logs go to stderr so stdout stays a clean JSON document.
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
