//! Application configuration layered from defaults, a TOML file and `ARENA_*` variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::battle::BattleRules;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "rpg-arena";
/// Prefix for environment overrides, e.g. `ARENA_LOGGING__FILTER=debug`.
pub const ENV_PREFIX: &str = "ARENA";

const DEFAULT_FILTER: &str = "info";

const DEFAULT_CONFIG: &str = r#"# RPG arena configuration.

[logging]
# Directory receiving arena.log. Defaults to the platform cache directory.
# directory = "/tmp/rpg-arena/logs"
# Used when RUST_LOG is not set.
filter = "info"
# Mirror log lines to stderr. Game output always goes to stdout.
stderr = false

[battle]
# When true, "Use Shield" halves the next attack that lands on the shield bearer.
shield_halves_damage = false
"#;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Logging destination and verbosity.
    pub logging: LoggingConfig,
    /// Battle rule switches.
    pub battle: BattleConfig,
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Directory that receives `arena.log`.
    pub directory: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Also write log lines to stderr.
    pub stderr: bool,
}

/// Optional battle rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BattleConfig {
    /// Make "Use Shield" halve the next landed attack.
    pub shield_halves_damage: bool,
}

impl BattleConfig {
    /// Rules handed to the battle engine.
    pub fn rules(&self) -> BattleRules {
        BattleRules {
            shield_halves_damage: self.shield_halves_damage,
        }
    }
}

impl AppConfig {
    /// Load from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path`, falling back to built-in defaults when the file is absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default(
                "logging.directory",
                default_log_dir().to_string_lossy().into_owned(),
            )?
            .set_default("logging.filter", DEFAULT_FILTER)?
            .set_default("logging.stderr", false)?
            .set_default("battle.shield_halves_damage", false)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }
}

/// Location of `config.toml` under the platform config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CONFIG_DIR)
        .join("logs")
}

/// Write the commented default configuration if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path()).map(|_| ())
}

/// Same as [`ensure_default_config`] for an explicit path. Returns whether a file was written.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Default configuration written");
    Ok(true)
}
