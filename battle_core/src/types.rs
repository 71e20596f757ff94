//! Core identifier and enum types shared across battle_core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CHARACTER_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a character for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u64);

impl CharacterId {
    /// Mint a fresh, process-wide unique id
    pub fn mint() -> Self {
        CharacterId(NEXT_CHARACTER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one equipped copy of an item
///
/// `InstanceId::UNEQUIPPED` is the only reserved value. Every successful
/// equip mints a new id, so two equipped copies of the same item never share
/// one while unequipped copies still compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    pub const UNEQUIPPED: InstanceId = InstanceId(0);

    /// Mint a fresh equipped-instance id (never `UNEQUIPPED`)
    pub fn mint() -> Self {
        InstanceId(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_equipped(&self) -> bool {
        *self != InstanceId::UNEQUIPPED
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        InstanceId::UNEQUIPPED
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Body,
    Feet,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Feet,
        ]
    }

    /// Slot name as it appears in item tags
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentSlot::MainHand => "mainhand",
            EquipmentSlot::OffHand => "offhand",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Body => "body",
            EquipmentSlot::Feet => "feet",
        }
    }

    /// Look up a slot by its tag name
    pub fn from_name(name: &str) -> Option<EquipmentSlot> {
        EquipmentSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == name)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who decides a character's actions in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    Player,
    #[default]
    Npc,
}

/// Damage category of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Magical,
}

/// One of the eight stat sheet fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    MaxHealth,
    MaxStamina,
    MaxMana,
    Strength,
    Agility,
    Acumen,
    Armor,
    MagicalResistance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_instances_are_unique() {
        let a = InstanceId::mint();
        let b = InstanceId::mint();
        assert_ne!(a, b);
        assert!(a.is_equipped());
        assert!(!InstanceId::UNEQUIPPED.is_equipped());
    }

    #[test]
    fn test_slot_names_round_trip() {
        for slot in EquipmentSlot::all() {
            assert_eq!(EquipmentSlot::from_name(slot.as_str()), Some(*slot));
        }
        assert_eq!(EquipmentSlot::from_name("ring"), None);
    }
}
