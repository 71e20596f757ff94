//! Character - Identity, stats, resources, actions and inventory
//!
//! Characters are values: every operation borrows `self` and returns the
//! replacement character, which the owner writes back by id.

mod resources;

pub use resources::Resources;

use crate::inventory::{Inventory, InventoryError, Task};
use crate::item::{Action, ActionSource, Item};
use crate::stat_sheet::StatSheet;
use crate::types::{Attribute, CharacterId, Controller, InstanceId};
use resources::shift;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    // === Identity ===
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub controller: Controller,
    alive: bool,

    // === Stats ===
    base: StatSheet,
    /// Bonus sheet contributed by each equipped copy
    bonuses: BTreeMap<InstanceId, StatSheet>,
    /// Always `StatSheet::summed(base, bonuses)`
    current: StatSheet,
    resources: Resources,

    // === Actions ===
    innate_actions: Vec<Action>,
    /// Actions granted by each equipped copy
    granted_actions: BTreeMap<InstanceId, Vec<Action>>,
    status_effects: BTreeSet<String>,

    inventory: Inventory,
}

impl Character {
    /// Create an NPC with full resource pools and a fresh id
    ///
    /// A sheet without max health yields a character that starts dead.
    pub fn new(name: impl Into<String>, base: StatSheet) -> Self {
        let resources = Resources::full(&base);
        Character {
            id: CharacterId::mint(),
            name: name.into(),
            controller: Controller::Npc,
            alive: resources.health > 0,
            base,
            bonuses: BTreeMap::new(),
            current: base,
            resources,
            innate_actions: Vec::new(),
            granted_actions: BTreeMap::new(),
            status_effects: BTreeSet::new(),
            inventory: Inventory::new(),
        }
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.innate_actions.push(action);
        self
    }

    // === Accessors ===

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    pub fn base(&self) -> &StatSheet {
        &self.base
    }

    pub fn current(&self) -> &StatSheet {
        &self.current
    }

    pub fn bonuses(&self) -> &BTreeMap<InstanceId, StatSheet> {
        &self.bonuses
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    pub fn health(&self) -> u32 {
        self.resources.health
    }

    pub fn status_effects(&self) -> &BTreeSet<String> {
        &self.status_effects
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Rebuild `current` from `base` and every active bonus
    ///
    /// Clamping only ever lowers pools, so `alive` keeps tracking
    /// `health > 0` without reviving anyone.
    fn recompute(&mut self) {
        self.current = StatSheet::summed(&self.base, self.bonuses.values());
        self.resources = self.resources.clamped(&self.current);
        self.alive = self.resources.health > 0;
    }

    // === Equipment ===

    /// Equip `item` from the backpack into `slot`, registering its bonus
    ///
    /// `SlotNotFound`, `ItemNotEquippable` and `SlotEmpty` are absorbed: the
    /// unchanged character comes back. Compare the result to find out whether
    /// anything was equipped.
    pub fn equip(&self, slot: &str, item: &Item) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        let equipped = match next.inventory.equip(slot, item) {
            Ok(equipped) => equipped,
            Err(err) => return self.absorb(err),
        };

        if let Some(replaced) = equipped.replaced {
            next.retract(replaced);
        }
        next.bonuses.insert(equipped.instance, item.bonus);
        if !item.actions.is_empty() {
            next.granted_actions.insert(equipped.instance, item.actions.clone());
        }
        next.recompute();
        Ok(next)
    }

    /// Unequip `slot`, retracting the bonus it contributed
    pub fn unequip(&self, slot: &str) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        match next.inventory.unequip(slot) {
            Ok(instance) => {
                next.retract(instance);
                next.recompute();
                Ok(next)
            }
            Err(err) => self.absorb(err),
        }
    }

    fn retract(&mut self, instance: InstanceId) {
        self.bonuses.remove(&instance);
        self.granted_actions.remove(&instance);
    }

    fn absorb(&self, err: InventoryError) -> Result<Character, InventoryError> {
        match err {
            InventoryError::SlotNotFound(_)
            | InventoryError::ItemNotEquippable(_)
            | InventoryError::SlotEmpty(_) => {
                warn!(character = %self.name, error = %err, "ignored equipment change");
                Ok(self.clone())
            }
            other => Err(other),
        }
    }

    // === Combat ===

    /// Take `damage` (truncated); negative damage heals
    ///
    /// Health stays within `[0, current.max_health]` and the character dies
    /// exactly when it reaches 0.
    pub fn hit(&self, damage: f64) -> Character {
        let mut next = self.clone();
        let max = self.current.get(Attribute::MaxHealth);
        let delta = (damage.trunc() as i64).saturating_neg();
        next.resources.health = shift(self.resources.health, delta, max);
        next.alive = next.resources.health > 0;
        next
    }

    /// Pay an action's stamina and mana cost, never going below zero
    pub fn spend(&self, action: &Action) -> Character {
        let mut next = self.clone();
        next.resources.stamina = self.resources.stamina.saturating_sub(action.stamina_cost);
        next.resources.mana = self.resources.mana.saturating_sub(action.mana_cost);
        next
    }

    /// Add status effect tags
    pub fn afflict<'a>(&self, effects: impl IntoIterator<Item = &'a String>) -> Character {
        let mut next = self.clone();
        next.status_effects.extend(effects.into_iter().cloned());
        next
    }

    /// Every `(source, action)` pair this character can use, innate first
    ///
    /// A character with no actions at all still knows how to punch.
    pub fn available_actions(&self) -> Vec<(ActionSource, Action)> {
        let innate = self
            .innate_actions
            .iter()
            .map(|a| (ActionSource::Innate, a.clone()));
        let granted = self.granted_actions.iter().flat_map(|(instance, actions)| {
            actions
                .iter()
                .map(move |a| (ActionSource::Equipped(*instance), a.clone()))
        });
        let actions: Vec<_> = innate.chain(granted).collect();
        if actions.is_empty() {
            vec![(ActionSource::Innate, Action::punch())]
        } else {
            actions
        }
    }

    /// Whether `action` is available from `source`
    pub fn knows(&self, source: ActionSource, action: &Action) -> bool {
        self.available_actions()
            .iter()
            .any(|(s, a)| *s == source && a == action)
    }

    /// The equipped item that granted actions from `source`
    pub fn weapon_for(&self, source: ActionSource) -> Option<&Item> {
        match source {
            ActionSource::Innate => None,
            ActionSource::Equipped(instance) => self.inventory.equipped_instance(instance),
        }
    }

    // === Inventory delegation ===

    pub fn add(&self, item: &Item, count: u32) -> Character {
        let mut next = self.clone();
        next.inventory.add(item, count);
        next
    }

    pub fn remove(&self, item: &Item, count: u32) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        next.inventory.remove(item, count)?;
        Ok(next)
    }

    /// Consume one item, restoring pools by its bonus maxima
    pub fn use_item(&self, item: &Item) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        let used = next.inventory.use_item(item)?;
        let mut next = next.hit(-f64::from(used.bonus.get(Attribute::MaxHealth)));
        next.resources.stamina = shift(
            next.resources.stamina,
            i64::from(used.bonus.get(Attribute::MaxStamina)),
            next.current.get(Attribute::MaxStamina),
        );
        next.resources.mana = shift(
            next.resources.mana,
            i64::from(used.bonus.get(Attribute::MaxMana)),
            next.current.get(Attribute::MaxMana),
        );
        Ok(next)
    }

    pub fn accept(&self, task: Task) -> Character {
        let mut next = self.clone();
        next.inventory.accept(task);
        next
    }

    pub fn claim(&self, task_id: &str) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        next.inventory.claim(task_id)?;
        Ok(next)
    }

    pub fn finish(&self, task_id: &str) -> Result<Character, InventoryError> {
        let mut next = self.clone();
        next.inventory.finish(task_id)?;
        Ok(next)
    }
}
