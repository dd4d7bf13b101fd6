mod app;
mod prompt;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io,
    sync::Mutex,
};

use arena_core::config::{self, AppConfig, LoggingConfig};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;
    info!(
        shield_halves_damage = config.battle.shield_halves_damage,
        "Arena starting"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = app::ArenaApp::new(stdin.lock(), stdout.lock(), config.battle.rules());
    app.run()
}

fn init_logging(settings: &LoggingConfig) -> Result<()> {
    fs::create_dir_all(&settings.directory)
        .with_context(|| format!("failed to create {}", settings.directory.display()))?;
    let log_path = settings.directory.join("arena.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    // stdout carries the game transcript, so logs only go to the file and stderr.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    let stderr_layer = settings.stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
