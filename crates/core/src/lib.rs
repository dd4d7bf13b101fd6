#![warn(clippy::all, missing_docs)]

//! Core domain logic for the RPG arena.
//!
//! This crate hosts the item and character models, the in-memory
//! registry, the battle engine and configuration handling used by
//! the console frontend.

pub mod battle;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;

pub use battle::{Battle, BattleAction, BattleEvent, BattleRules, Ending, Side};
pub use config::AppConfig;
pub use error::ArenaError;
pub use models::{Character, Item, ItemKind, Race};
pub use registry::Registry;
