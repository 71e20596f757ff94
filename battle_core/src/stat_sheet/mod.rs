//! StatSheet - The eight combat attributes of a character
//!
//! Every field is three-state: `None` means "not set", `Some(0)` is an
//! explicit zero. This lets the same type describe a full sheet, an absolute
//! override, and a sparse equipment bonus.

mod aggregate;

use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Eight numeric combat attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatSheet {
    #[serde(default)]
    pub max_health: Option<u32>,
    #[serde(default)]
    pub max_stamina: Option<u32>,
    #[serde(default)]
    pub max_mana: Option<u32>,
    #[serde(default)]
    pub strength: Option<u32>,
    #[serde(default)]
    pub agility: Option<u32>,
    #[serde(default)]
    pub acumen: Option<u32>,
    #[serde(default)]
    pub armor: Option<u32>,
    #[serde(default)]
    pub magical_resistance: Option<u32>,
}

impl StatSheet {
    /// A sheet with every field unset
    pub fn unset() -> Self {
        StatSheet::default()
    }

    /// A sheet with every field set to the same value
    pub fn filled(value: u32) -> Self {
        StatSheet {
            max_health: Some(value),
            max_stamina: Some(value),
            max_mana: Some(value),
            strength: Some(value),
            agility: Some(value),
            acumen: Some(value),
            armor: Some(value),
            magical_resistance: Some(value),
        }
    }

    /// Builder-style setter for a single attribute
    pub fn with(mut self, attribute: Attribute, value: u32) -> Self {
        *self.field_mut(attribute) = Some(value);
        self
    }

    /// Raw three-state value of an attribute
    pub fn field(&self, attribute: Attribute) -> Option<u32> {
        match attribute {
            Attribute::MaxHealth => self.max_health,
            Attribute::MaxStamina => self.max_stamina,
            Attribute::MaxMana => self.max_mana,
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Acumen => self.acumen,
            Attribute::Armor => self.armor,
            Attribute::MagicalResistance => self.magical_resistance,
        }
    }

    fn field_mut(&mut self, attribute: Attribute) -> &mut Option<u32> {
        match attribute {
            Attribute::MaxHealth => &mut self.max_health,
            Attribute::MaxStamina => &mut self.max_stamina,
            Attribute::MaxMana => &mut self.max_mana,
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Acumen => &mut self.acumen,
            Attribute::Armor => &mut self.armor,
            Attribute::MagicalResistance => &mut self.magical_resistance,
        }
    }

    /// Value of an attribute, treating unset as zero
    pub fn get(&self, attribute: Attribute) -> u32 {
        self.field(attribute).unwrap_or(0)
    }

    /// Override `base` with every field that `changes` sets explicitly
    pub fn merge(base: &StatSheet, changes: &StatSheet) -> StatSheet {
        let mut merged = *base;
        for attribute in Self::attributes() {
            if let Some(value) = changes.field(*attribute) {
                *merged.field_mut(*attribute) = Some(value);
            }
        }
        merged
    }

    /// All attributes in declaration order
    pub fn attributes() -> &'static [Attribute] {
        &[
            Attribute::MaxHealth,
            Attribute::MaxStamina,
            Attribute::MaxMana,
            Attribute::Strength,
            Attribute::Agility,
            Attribute::Acumen,
            Attribute::Armor,
            Attribute::MagicalResistance,
        ]
    }

    /// True if no field is set
    pub fn is_unset(&self) -> bool {
        Self::attributes().iter().all(|a| self.field(*a).is_none())
    }
}
