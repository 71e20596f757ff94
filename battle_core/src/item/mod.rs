//! Item - Equipment and consumable descriptors

mod action;

pub use action::{Action, ActionSource, Scaling};

use crate::stat_sheet::StatSheet;
use crate::types::{EquipmentSlot, InstanceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const TAG_EQUIPPABLE: &str = "equippable";
pub const TAG_CONSUMABLE: &str = "consumable";
pub const TAG_WEAPON: &str = "weapon";

/// An equipment or consumable descriptor
///
/// Two items are equal when every field matches, including `instance`. Items
/// in a backpack always carry `InstanceId::UNEQUIPPED`, so identical copies
/// stack; an equipped copy is stamped with its own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Capability tags ("equippable", slot names, "weapon", "consumable", ...)
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub weight: u32,
    /// Stats contributed while equipped (or restored when consumed)
    #[serde(default)]
    pub bonus: StatSheet,
    /// Actions granted while equipped
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub instance: InstanceId,
}

impl Item {
    /// Create an untagged, weightless item
    pub fn new(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            tags: BTreeSet::new(),
            weight: 0,
            bonus: StatSheet::unset(),
            actions: Vec::new(),
            instance: InstanceId::UNEQUIPPED,
        }
    }

    /// Create an equippable item that fits the given slot
    pub fn gear(name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Item::new(name).with_tag(TAG_EQUIPPABLE).with_tag(slot.as_str())
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_bonus(mut self, bonus: StatSheet) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_equippable(&self) -> bool {
        self.has_tag(TAG_EQUIPPABLE)
    }

    pub fn is_consumable(&self) -> bool {
        self.has_tag(TAG_CONSUMABLE)
    }

    /// Copy of this item stamped with an equipped-instance id
    pub fn stamped(&self, instance: InstanceId) -> Item {
        Item {
            instance,
            ..self.clone()
        }
    }

    /// Copy of this item as it would sit in a backpack
    pub fn unstamped(&self) -> Item {
        self.stamped(InstanceId::UNEQUIPPED)
    }

    /// Same logical item, ignoring which equipped copy this is
    pub fn same_kind(&self, other: &Item) -> bool {
        self.unstamped() == other.unstamped()
    }
}
