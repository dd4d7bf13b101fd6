use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ArenaError;

use super::item::Item;

/// Health given to races without an entry in the table.
pub const DEFAULT_HEALTH: i32 = 100;

/// Playable race. Codes outside the known range are kept in [`Race::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    Human,
    Dragon,
    Giant,
    Elf,
    Dwarf,
    Unknown(i32),
}

impl Race {
    /// Map a menu code (`0: Human, 1: Dragon, 2: Giant, 3: Elf, 4: Dwarf`) onto a race.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Race::Human,
            1 => Race::Dragon,
            2 => Race::Giant,
            3 => Race::Elf,
            4 => Race::Dwarf,
            other => Race::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Race::Human => 0,
            Race::Dragon => 1,
            Race::Giant => 2,
            Race::Elf => 3,
            Race::Dwarf => 4,
            Race::Unknown(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Dragon => "Dragon",
            Race::Giant => "Giant",
            Race::Elf => "Elf",
            Race::Dwarf => "Dwarf",
            Race::Unknown(_) => "Unknown",
        }
    }

    /// Health a character of this race starts with and returns to after a win.
    pub fn base_health(&self) -> i32 {
        match self {
            Race::Human => 100,
            Race::Dragon => 700,
            Race::Giant => 500,
            Race::Elf => 300,
            Race::Dwarf => 200,
            Race::Unknown(_) => DEFAULT_HEALTH,
        }
    }
}

/// Number of items a character may carry at `level`.
pub fn capacity_for_level(level: u32) -> usize {
    if level < 5 {
        2
    } else if level < 10 {
        4
    } else {
        8
    }
}

/// A combatant with its own inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub race: Race,
    pub level: u32,
    pub health: i32,
    /// Owned copies, in the order they were assigned.
    pub items: Vec<Item>,
}

impl Character {
    pub fn new(id: i32, name: impl Into<String>, race: Race) -> Self {
        Self {
            id,
            name: name.into(),
            race,
            level: 1,
            health: Self::health_for_race(race),
            items: Vec::new(),
        }
    }

    pub fn health_for_race(race: Race) -> i32 {
        race.base_health()
    }

    /// Items allowed at the current level.
    pub fn capacity(&self) -> usize {
        capacity_for_level(self.level)
    }

    /// Store a copy of `item`, refusing it once the inventory is full.
    pub fn add_item(&mut self, item: &Item) -> Result<(), ArenaError> {
        let capacity = self.capacity();
        if self.items.len() >= capacity {
            warn!(
                character = self.id,
                item = item.id,
                level = self.level,
                capacity,
                "Inventory full, item discarded"
            );
            return Err(ArenaError::CapacityExceeded {
                level: self.level,
                capacity,
            });
        }
        self.items.push(item.clone());
        Ok(())
    }

    /// Set the power of the first owned item with `item_id`.
    pub fn edit_item(&mut self, item_id: i32, power: i32) -> Result<(), ArenaError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(ArenaError::ItemNotFound { id: item_id })?;
        item.power = power;
        Ok(())
    }

    /// Drop every owned item with `item_id` and return how many were removed.
    pub fn remove_item(&mut self, item_id: i32) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        before - self.items.len()
    }

    /// Rename and re-race the character. Health returns to the new race's base.
    pub fn reshape(&mut self, name: impl Into<String>, race: Race) {
        self.name = name.into();
        self.race = race;
        self.health = Self::health_for_race(race);
    }

    /// Level up and restore health after winning a battle.
    pub fn record_win(&mut self) {
        self.level = self.level.saturating_add(1);
        self.health = Self::health_for_race(self.race);
        debug!(
            character = self.id,
            level = self.level,
            health = self.health,
            "Victory recorded"
        );
    }

    pub fn is_standing(&self) -> bool {
        self.health > 0
    }
}
