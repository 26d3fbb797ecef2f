use serde::{Deserialize, Serialize};
use std::fmt;

/// Inventory bucket an item falls into. Only weapons and armor can be equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentKind {
    Weapon,
    Armor,
    KeyItem,
    #[default]
    Item,
}

impl EquipmentKind {
    pub fn is_equippable(self) -> bool {
        matches!(self, EquipmentKind::Weapon | EquipmentKind::Armor)
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            EquipmentKind::Weapon => "Weapon",
            EquipmentKind::Armor => "Armor",
            EquipmentKind::KeyItem => "Key Item",
            EquipmentKind::Item => "Item",
        };
        write!(f, "{}", display_name)
    }
}

/// Facing direction persisted with the player's map position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_weapons_and_armor_are_equippable() {
        assert!(EquipmentKind::Weapon.is_equippable());
        assert!(EquipmentKind::Armor.is_equippable());
        assert!(!EquipmentKind::KeyItem.is_equippable());
        assert!(!EquipmentKind::Item.is_equippable());
    }
}
