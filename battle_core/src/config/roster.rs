//! Roster configuration - building a CombatParty from TOML

use super::ConfigError;
use crate::character::Character;
use crate::item::{Action, Item};
use crate::party::CombatParty;
use crate::stat_sheet::StatSheet;
use crate::types::{Controller, EquipmentSlot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;

/// A party definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub name: String,
    /// Member name; defaults to the first member
    #[serde(default)]
    pub leader: Option<String>,
    /// Item definitions shared by all members
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    pub members: Vec<MemberConfig>,
}

/// An item whose actions are referenced by catalog id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub bonus: StatSheet,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberConfig {
    pub name: String,
    #[serde(default)]
    pub controller: Controller,
    #[serde(default)]
    pub stats: StatSheet,
    /// Innate action ids
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub backpack: Vec<StackConfig>,
    /// Slot name to item name; each entry brings its own copy of the item
    #[serde(default)]
    pub equip: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    pub item: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// Load a roster from a TOML file
pub fn load_roster(path: &Path) -> Result<RosterConfig, ConfigError> {
    super::load_toml(path)
}

/// Build a party from a roster, resolving action ids against `catalog`
pub fn build_party(
    roster: &RosterConfig,
    catalog: &HashMap<String, Action>,
) -> Result<CombatParty, ConfigError> {
    let mut items = HashMap::new();
    for config in &roster.items {
        let item = build_item(config, catalog)?;
        if items.insert(config.name.clone(), item).is_some() {
            return Err(ConfigError::ValidationError(format!(
                "item '{}' is defined twice",
                config.name
            )));
        }
    }

    let mut characters = Vec::with_capacity(roster.members.len());
    for member in &roster.members {
        characters.push(build_member(member, &items, catalog)?);
    }

    let leader = match &roster.leader {
        Some(name) => Some(
            characters
                .iter()
                .find(|c| &c.name == name)
                .map(|c| c.id)
                .ok_or_else(|| {
                    ConfigError::ValidationError(format!("leader '{}' is not a member", name))
                })?,
        ),
        None => None,
    };

    let party = CombatParty::new(roster.name.clone(), characters);
    debug!(party = %party.name, members = party.len(), "built party");
    match leader {
        Some(id) => party
            .with_leader(id)
            .map_err(|e| ConfigError::ValidationError(e.to_string())),
        None => Ok(party),
    }
}

fn lookup_action(
    catalog: &HashMap<String, Action>,
    id: &str,
    owner: &str,
) -> Result<Action, ConfigError> {
    catalog.get(id).cloned().ok_or_else(|| {
        ConfigError::ValidationError(format!("'{}' references unknown action '{}'", owner, id))
    })
}

fn build_item(config: &ItemConfig, catalog: &HashMap<String, Action>) -> Result<Item, ConfigError> {
    let mut item = Item::new(config.name.clone())
        .with_weight(config.weight)
        .with_bonus(config.bonus);
    item.tags = config.tags.clone();
    for id in &config.actions {
        item = item.with_action(lookup_action(catalog, id, &config.name)?);
    }
    Ok(item)
}

fn build_member(
    config: &MemberConfig,
    items: &HashMap<String, Item>,
    catalog: &HashMap<String, Action>,
) -> Result<Character, ConfigError> {
    let find_item = |name: &str| {
        items.get(name).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "'{}' references unknown item '{}'",
                config.name, name
            ))
        })
    };

    let mut character =
        Character::new(config.name.clone(), config.stats).with_controller(config.controller);
    for id in &config.actions {
        character = character.with_action(lookup_action(catalog, id, &config.name)?);
    }
    for stack in &config.backpack {
        character = character.add(find_item(&stack.item)?, stack.count);
    }
    for (slot, item_name) in &config.equip {
        if EquipmentSlot::from_name(slot).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "'{}' equips into unknown slot '{}'",
                config.name, slot
            )));
        }
        let item = find_item(item_name)?;
        character = character
            .add(item, 1)
            .equip(slot, item)
            .map_err(|e| ConfigError::ValidationError(format!("'{}': {}", config.name, e)))?;
    }
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_actions, parse_toml};
    use crate::types::{Attribute, EquipmentSlot};

    const HEROES: &str = r#"
name = "Heroes"
leader = "Bob"

[[items]]
name = "Dagger"
tags = ["equippable", "mainhand", "weapon"]
weight = 1
actions = ["light_stab"]
bonus = { agility = 2 }

[[items]]
name = "Potion"
tags = ["consumable"]
bonus = { max_health = 5 }

[[members]]
name = "Alice"
controller = "player"
stats = { max_health = 10, agility = 6, strength = 4 }
backpack = [{ item = "Potion", count = 2 }]

[[members]]
name = "Bob"
controller = "player"
stats = { max_health = 10, agility = 9 }
actions = ["punch"]
equip = { mainhand = "Dagger" }
"#;

    fn heroes() -> RosterConfig {
        parse_toml(HEROES).unwrap()
    }

    #[test]
    fn test_build_party() {
        let party = build_party(&heroes(), &default_actions()).unwrap();
        let members: Vec<&Character> = party.members().collect();

        assert_eq!(party.name, "Heroes");
        assert_eq!(members.len(), 2);
        assert_eq!(party.leader(), Some(members[1].id));

        let alice = members[0];
        assert!(alice.is_player());
        assert_eq!(alice.health(), 10);
        assert_eq!(alice.inventory().count(&Item::new("Potion").with_tag("consumable").with_bonus(
            StatSheet::unset().with(Attribute::MaxHealth, 5)
        )), 2);

        let bob = members[1];
        assert_eq!(bob.current().get(Attribute::Agility), 11);
        assert!(bob.inventory().equipped(EquipmentSlot::MainHand).is_some());
        let ids: Vec<String> = bob.available_actions().into_iter().map(|(_, a)| a.id).collect();
        assert_eq!(ids, vec!["punch".to_string(), "light_stab".to_string()]);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let mut roster = heroes();
        roster.members[0].actions.push("meteor".to_string());
        let err = build_party(&roster, &default_actions()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("meteor")));
    }

    #[test]
    fn test_unknown_item_and_slot_rejected() {
        let mut roster = heroes();
        roster.members[0].backpack.push(StackConfig {
            item: "Crown".to_string(),
            count: 1,
        });
        assert!(build_party(&roster, &default_actions()).is_err());

        let mut roster = heroes();
        roster.members[1]
            .equip
            .insert("tail".to_string(), "Dagger".to_string());
        assert!(matches!(
            build_party(&roster, &default_actions()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_incompatible_equip_rejected() {
        let mut roster = heroes();
        roster.members[1]
            .equip
            .insert("head".to_string(), "Dagger".to_string());
        assert!(matches!(
            build_party(&roster, &default_actions()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_leader_rejected() {
        let mut roster = heroes();
        roster.leader = Some("Zed".to_string());
        assert!(build_party(&roster, &default_actions()).is_err());

        roster.leader = None;
        let party = build_party(&roster, &default_actions()).unwrap();
        assert_eq!(party.leader(), party.members().next().map(|c| c.id));
    }
}
