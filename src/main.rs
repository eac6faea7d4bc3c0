// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RecoverFlow reminder daemon
//!
//! Opens the local store, seeds the demo catalog, arms all enabled
//! reminders and keeps them firing until interrupted.

use anyhow::Context;
use recoverflow::{config::Config, seed, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        data_path = ?config.data_path,
        streak_policy = ?config.streak_policy,
        "Starting RecoverFlow"
    );

    let state = AppState::from_config(config).context("Failed to open store")?;

    if state.config.seed_demo_data {
        seed::seed_catalog(&state.storage).context("Failed to seed catalog")?;
    }

    let permission = state.reminders.request_notification_permission();
    tracing::info!(?permission, "Notification permission");

    let armed = state
        .reminders
        .initialize_reminders()
        .context("Failed to initialize reminders")?;
    tracing::info!(armed, "Reminder scheduler running");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    state.reminders.scheduler().cancel_all();
    tracing::info!("Shutting down");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recoverflow=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
