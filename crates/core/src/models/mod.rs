#![allow(missing_docs)]

//! Shared domain models.

mod character;
mod item;

pub use character::{capacity_for_level, Character, Race, DEFAULT_HEALTH};
pub use item::{Item, ItemKind};
