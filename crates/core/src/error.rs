//! Domain errors reported back to the player.

use thiserror::Error;

/// Failures raised by registry and character operations.
///
/// The `Display` output is the exact line shown on the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// No character with the requested id exists.
    #[error("Character not found.")]
    CharacterNotFound {
        /// Id that was looked up.
        id: i32,
    },
    /// No item with the requested id exists.
    #[error("Item not found.")]
    ItemNotFound {
        /// Id that was looked up.
        id: i32,
    },
    /// Assignment failed because at least one side of the lookup missed.
    #[error("Character or item not found.")]
    CharacterOrItemNotFound {
        /// Character id that was looked up.
        character_id: i32,
        /// Item id that was looked up.
        item_id: i32,
    },
    /// A battle could not start because a combatant is missing.
    #[error("One or both characters not found.")]
    CombatantsNotFound {
        /// Id of the first combatant.
        first: i32,
        /// Id of the second combatant.
        second: i32,
    },
    /// The character already carries as many items as its level allows.
    #[error("Cannot add more items, maximum limit reached for this level.")]
    CapacityExceeded {
        /// Character level at the time of the insertion.
        level: u32,
        /// Capacity implied by that level.
        capacity: usize,
    },
}
