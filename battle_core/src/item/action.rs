//! Action - A combat move granted innately or by equipment

use crate::types::{Attribute, DamageType, InstanceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Describes what an action does when it resolves
/// Loaded from TOML configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Unique action identifier
    pub id: String,
    /// Display name
    pub name: String,

    #[serde(default)]
    pub damage_type: DamageType,
    /// Flat damage before scaling
    #[serde(default)]
    pub base_damage: u32,
    /// Optional scaling from one of the attacker's current stats
    #[serde(default)]
    pub scaling: Option<Scaling>,

    #[serde(default)]
    pub stamina_cost: u32,
    #[serde(default)]
    pub mana_cost: u32,

    /// Status effect tags applied to the target on resolution
    #[serde(default)]
    pub effects: Vec<String>,
    /// Behaviour tags (e.g. "heal")
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Adds `ratio_percent`% of an attribute to the action's damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scaling {
    pub attribute: Attribute,
    pub ratio_percent: u32,
}

impl Action {
    /// Create an action with only a base damage
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_damage: u32) -> Self {
        Action {
            id: id.into(),
            name: name.into(),
            damage_type: DamageType::Physical,
            base_damage,
            scaling: None,
            stamina_cost: 0,
            mana_cost: 0,
            effects: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn with_scaling(mut self, attribute: Attribute, ratio_percent: u32) -> Self {
        self.scaling = Some(Scaling {
            attribute,
            ratio_percent,
        });
        self
    }

    pub fn with_cost(mut self, stamina: u32, mana: u32) -> Self {
        self.stamina_cost = stamina;
        self.mana_cost = mana;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Healing actions restore health instead of dealing damage
    pub fn is_heal(&self) -> bool {
        self.tags.contains("heal")
    }

    /// Basic unarmed strike every character knows
    pub fn punch() -> Self {
        Action::new("punch", "Punch", 1).with_scaling(Attribute::Strength, 10)
    }
}

/// Where a character's action came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    /// Known without equipment
    Innate,
    /// Granted by the equipped item stamped with this id
    Equipped(InstanceId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_tag() {
        let mend = Action::new("mend", "Mend", 3).with_tag("heal");
        assert!(mend.is_heal());
        assert!(!Action::punch().is_heal());
    }

    #[test]
    fn test_innate_sorts_before_equipped() {
        let equipped = ActionSource::Equipped(InstanceId(1));
        assert!(ActionSource::Innate < equipped);
    }

    #[test]
    fn test_parse_action_defaults() {
        let action: Action = toml::from_str(
            r#"
id = "light_stab"
name = "Light Stab"
base_damage = 2
"#,
        )
        .unwrap();

        assert_eq!(action.damage_type, DamageType::Physical);
        assert_eq!(action.scaling, None);
        assert!(action.effects.is_empty());
    }
}
