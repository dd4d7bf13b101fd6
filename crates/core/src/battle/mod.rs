#![allow(missing_docs)]

//! Turn-based duel between two registered characters.

mod engine;
mod models;

pub use engine::Battle;
pub use models::{BattleAction, BattleEvent, BattleRules, Ending, Side};
