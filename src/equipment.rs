use schema::EquipmentKind;
use serde::{Deserialize, Serialize};

/// An item the player can carry. Weapons add `bonus` to attack, armor adds it to defense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "type")]
    pub kind: EquipmentKind,
    #[serde(default, alias = "damage", alias = "armorClass")]
    pub bonus: u16,
}

impl Equipment {
    pub fn new(name: impl Into<String>, kind: EquipmentKind, bonus: u16) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            bonus,
        }
    }
}

/// The two equipment slots that feed the stat model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
}

impl Loadout {
    pub fn new(weapon: Option<Equipment>, armor: Option<Equipment>) -> Self {
        Self { weapon, armor }
    }

    pub fn attack_bonus(&self) -> u16 {
        self.weapon.as_ref().map_or(0, |weapon| weapon.bonus)
    }

    pub fn defense_bonus(&self) -> u16 {
        self.armor.as_ref().map_or(0, |armor| armor.bonus)
    }
}

/// Items bucketed by kind, in pickup order within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    weapons: Vec<Equipment>,
    armors: Vec<Equipment>,
    key_items: Vec<Equipment>,
    items: Vec<Equipment>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Equipment>) -> Self {
        let mut inventory = Self::new();
        for item in items {
            inventory.add(item);
        }
        inventory
    }

    pub fn add(&mut self, item: Equipment) {
        self.bucket_mut(item.kind).push(item);
    }

    /// Remove the item at `index` within the bucket for `kind`.
    pub fn remove(&mut self, kind: EquipmentKind, index: usize) -> Option<Equipment> {
        let bucket = self.bucket_mut(kind);
        if index < bucket.len() {
            Some(bucket.remove(index))
        } else {
            None
        }
    }

    pub fn bucket(&self, kind: EquipmentKind) -> &[Equipment] {
        match kind {
            EquipmentKind::Weapon => &self.weapons,
            EquipmentKind::Armor => &self.armors,
            EquipmentKind::KeyItem => &self.key_items,
            EquipmentKind::Item => &self.items,
        }
    }

    fn bucket_mut(&mut self, kind: EquipmentKind) -> &mut Vec<Equipment> {
        match kind {
            EquipmentKind::Weapon => &mut self.weapons,
            EquipmentKind::Armor => &mut self.armors,
            EquipmentKind::KeyItem => &mut self.key_items,
            EquipmentKind::Item => &mut self.items,
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len() + self.armors.len() + self.key_items.len() + self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item, bucket by bucket, for saving.
    pub fn items(&self) -> Vec<Equipment> {
        self.weapons
            .iter()
            .chain(&self.armors)
            .chain(&self.key_items)
            .chain(&self.items)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_loadout_bonuses() {
        let loadout = Loadout::new(
            Some(Equipment::new("Bronze Sword", EquipmentKind::Weapon, 4)),
            Some(Equipment::new("Leather Vest", EquipmentKind::Armor, 3)),
        );
        assert_eq!(loadout.attack_bonus(), 4);
        assert_eq!(loadout.defense_bonus(), 3);
        assert_eq!(Loadout::default().attack_bonus(), 0);
    }

    #[test]
    fn test_inventory_buckets_by_kind() {
        let mut inventory = Inventory::from_items(vec![
            Equipment::new("Bronze Sword", EquipmentKind::Weapon, 4),
            Equipment::new("Potion", EquipmentKind::Item, 0),
            Equipment::new("Iron Sword", EquipmentKind::Weapon, 7),
            Equipment::new("Old Key", EquipmentKind::KeyItem, 0),
        ]);

        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory.bucket(EquipmentKind::Weapon).len(), 2);
        assert!(inventory.bucket(EquipmentKind::Armor).is_empty());

        let removed = inventory.remove(EquipmentKind::Weapon, 1);
        assert_eq!(removed.map(|item| item.name), Some("Iron Sword".to_string()));
        assert_eq!(inventory.remove(EquipmentKind::Weapon, 5), None);
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_original_field_names_are_accepted() {
        let json = r#"{"name": "Club", "type": "Weapon", "damage": 5}"#;
        let club: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(club.kind, EquipmentKind::Weapon);
        assert_eq!(club.bonus, 5);

        let json = r#"{"name": "Plate", "description": "Heavy", "type": "Armor", "armorClass": 6}"#;
        let plate: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(plate.bonus, 6);
    }
}
