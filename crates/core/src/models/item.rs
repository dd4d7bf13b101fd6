use serde::{Deserialize, Serialize};

/// Kind of equipment an item represents.
///
/// Codes outside the known range are kept verbatim in [`ItemKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Shield,
    Knife,
    Sword,
    Unknown(i32),
}

impl ItemKind {
    /// Map a menu code (`0: Shield, 1: Knife, 2: Sword`) onto a kind.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ItemKind::Shield,
            1 => ItemKind::Knife,
            2 => ItemKind::Sword,
            other => ItemKind::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ItemKind::Shield => 0,
            ItemKind::Knife => 1,
            ItemKind::Sword => 2,
            ItemKind::Unknown(code) => *code,
        }
    }

    /// Returns the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Shield => "Shield",
            ItemKind::Knife => "Knife",
            ItemKind::Sword => "Sword",
            ItemKind::Unknown(_) => "Unknown",
        }
    }
}

/// A piece of equipment. Characters hold their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub kind: ItemKind,
    pub power: i32,
    /// Remaining uses before the item breaks.
    pub usage: i32,
}

impl Item {
    pub fn new(id: i32, kind: ItemKind, power: i32, usage: i32) -> Self {
        Self {
            id,
            kind,
            power,
            usage,
        }
    }

    /// Spend one use, returning `true` once the item is exhausted.
    pub fn wear(&mut self) -> bool {
        self.usage = self.usage.saturating_sub(1);
        self.usage <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_kinds() {
        assert_eq!(ItemKind::from_code(0), ItemKind::Shield);
        assert_eq!(ItemKind::from_code(1), ItemKind::Knife);
        assert_eq!(ItemKind::from_code(2), ItemKind::Sword);
        assert_eq!(ItemKind::Sword.name(), "Sword");
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let kind = ItemKind::from_code(9);
        assert_eq!(kind, ItemKind::Unknown(9));
        assert_eq!(kind.code(), 9);
        assert_eq!(kind.name(), "Unknown");
    }

    #[test]
    fn wear_reports_exhaustion() {
        let mut item = Item::new(1, ItemKind::Knife, 30, 2);
        assert!(!item.wear());
        assert_eq!(item.usage, 1);
        assert!(item.wear());
        assert_eq!(item.usage, 0);
    }

    #[test]
    fn zero_usage_item_is_exhausted_after_one_swing() {
        let mut item = Item::new(1, ItemKind::Sword, 10, 0);
        assert!(item.wear());
        assert_eq!(item.usage, -1);
    }

    #[test]
    fn most_negative_usage_does_not_wrap() {
        let mut item = Item::new(1, ItemKind::Knife, 10, i32::MIN);
        assert!(item.wear());
        assert_eq!(item.usage, i32::MIN);
    }
}
