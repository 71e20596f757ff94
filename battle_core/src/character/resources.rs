//! Resource pools - health, stamina and mana

use crate::stat_sheet::StatSheet;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Current values of the three resource pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub health: u32,
    pub stamina: u32,
    pub mana: u32,
}

impl Resources {
    /// Pools filled to the maxima of a stat sheet
    pub fn full(stats: &StatSheet) -> Self {
        Resources {
            health: stats.get(Attribute::MaxHealth),
            stamina: stats.get(Attribute::MaxStamina),
            mana: stats.get(Attribute::MaxMana),
        }
    }

    /// Pools capped at the maxima of a stat sheet
    pub fn clamped(self, stats: &StatSheet) -> Self {
        Resources {
            health: self.health.min(stats.get(Attribute::MaxHealth)),
            stamina: self.stamina.min(stats.get(Attribute::MaxStamina)),
            mana: self.mana.min(stats.get(Attribute::MaxMana)),
        }
    }
}

/// Apply a signed change to a pool, keeping it within `[0, max]`
pub(crate) fn shift(value: u32, delta: i64, max: u32) -> u32 {
    i64::from(value).saturating_add(delta).clamp(0, i64::from(max)) as u32
}
