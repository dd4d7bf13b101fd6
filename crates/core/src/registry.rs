//! In-memory store of every item and character created during a run.

use tracing::{debug, info};

use crate::{
    error::ArenaError,
    models::{Character, Item, ItemKind, Race},
};

/// Owns all created items and characters. Lookups return the first match by id.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    items: Vec<Item>,
    characters: Vec<Character>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All item templates in creation order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All characters in creation order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Register a new item template. Duplicate ids are accepted.
    pub fn create_item(&mut self, id: i32, kind: ItemKind, power: i32, usage: i32) -> &Item {
        self.items.push(Item::new(id, kind, power, usage));
        info!(id, kind = kind.name(), power, usage, "Item created");
        &self.items[self.items.len() - 1]
    }

    /// Register a new level 1 character with race-derived health.
    pub fn create_character(&mut self, id: i32, name: impl Into<String>, race: Race) -> &Character {
        let character = Character::new(id, name, race);
        info!(
            id,
            name = %character.name,
            race = race.name(),
            race_code = race.code(),
            health = character.health,
            "Character created"
        );
        self.characters.push(character);
        &self.characters[self.characters.len() - 1]
    }

    /// First item template with `id`.
    pub fn item(&self, id: i32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First character with `id`.
    pub fn character(&self, id: i32) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    /// Mutable access to the first character with `id`.
    pub fn character_mut(&mut self, id: i32) -> Option<&mut Character> {
        self.characters
            .iter_mut()
            .find(|character| character.id == id)
    }

    /// Position of the first character with `id`.
    pub fn character_index(&self, id: i32) -> Option<usize> {
        self.characters
            .iter()
            .position(|character| character.id == id)
    }

    pub(crate) fn character_at(&self, index: usize) -> &Character {
        &self.characters[index]
    }

    pub(crate) fn character_at_mut(&mut self, index: usize) -> &mut Character {
        &mut self.characters[index]
    }

    /// Give the character a copy of the item template, subject to its capacity.
    pub fn assign_item(&mut self, character_id: i32, item_id: i32) -> Result<(), ArenaError> {
        let not_found = ArenaError::CharacterOrItemNotFound {
            character_id,
            item_id,
        };
        let item = self.item(item_id).cloned().ok_or_else(|| not_found.clone())?;
        let character = self.character_mut(character_id).ok_or(not_found)?;
        character.add_item(&item)?;
        debug!(
            character = character_id,
            item = item_id,
            carried = character.items.len(),
            "Item assigned"
        );
        Ok(())
    }

    /// Change the power of the registered template. Copies already handed out keep theirs.
    pub fn edit_item(&mut self, item_id: i32, power: i32) -> Result<(), ArenaError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(ArenaError::ItemNotFound { id: item_id })?;
        item.power = power;
        info!(id = item_id, power, "Item edited");
        Ok(())
    }

    /// Overwrite name and race, resetting health to the new race's base.
    pub fn edit_character(
        &mut self,
        character_id: i32,
        name: impl Into<String>,
        race: Race,
    ) -> Result<(), ArenaError> {
        let character = self
            .character_mut(character_id)
            .ok_or(ArenaError::CharacterNotFound { id: character_id })?;
        character.reshape(name, race);
        info!(
            id = character_id,
            name = %character.name,
            race = race.name(),
            "Character edited"
        );
        Ok(())
    }
}
