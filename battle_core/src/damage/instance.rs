//! DamageInstance - The output of damage calculation

use crate::types::{CharacterId, DamageType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One resolved use of an action, ready to be applied with `Character::hit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInstance {
    // === Source Info ===
    /// Who dealt this damage
    pub source_id: CharacterId,
    /// What action was used
    pub action_id: String,

    /// Damage dealt; negative values heal
    pub amount: f64,
    pub damage_type: DamageType,

    /// Status effects the target gains
    pub effects: Vec<String>,
    /// Tags describing the hit (action tags plus the weapon's tags)
    pub tags: BTreeSet<String>,
}

impl DamageInstance {
    pub fn new(source_id: CharacterId, action_id: impl Into<String>, amount: f64) -> Self {
        DamageInstance {
            source_id,
            action_id: action_id.into(),
            amount,
            damage_type: DamageType::Physical,
            effects: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn is_heal(&self) -> bool {
        self.amount < 0.0
    }

    /// Health the target will actually lose (or gain, if negative)
    pub fn applied_amount(&self) -> i64 {
        self.amount.trunc() as i64
    }
}
