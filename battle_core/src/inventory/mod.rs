//! Inventory - Equipment slots, backpack and tasklist

mod backpack;
mod task;

pub use backpack::{Backpack, ItemStack};
pub use task::Task;

use crate::item::{Item, TAG_EQUIPPABLE};
use crate::types::{EquipmentSlot, InstanceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Inventory operation error
///
/// All variants are caused by invalid caller input and leave the inventory
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("No equipment slot named '{0}'")]
    SlotNotFound(String),
    #[error("Nothing equipped in {0}")]
    SlotEmpty(EquipmentSlot),
    #[error("{0} cannot be equipped")]
    ItemNotEquippable(String),
    #[error("{item} does not fit the {slot} slot")]
    IncompatibleSlot { item: String, slot: String },
    #[error("Not enough {item}: requested {requested}, held {held}")]
    NotEnoughItem { item: String, requested: u32, held: u32 },
    #[error("Task '{0}' is not accepted")]
    TaskNotFound(String),
    #[error("{0} cannot be used")]
    ItemNotConsumable(String),
}

/// Outcome of a successful equip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equipped {
    /// Id minted for the newly equipped copy
    pub instance: InstanceId,
    /// Id of the copy that was hot-swapped out, if any
    pub replaced: Option<InstanceId>,
}

/// Per-character equipment, backpack and accepted tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    equipped: BTreeMap<EquipmentSlot, Item>,
    #[serde(default)]
    backpack: Backpack,
    #[serde(default)]
    tasks: Vec<Task>,
}

fn parse_slot(slot: &str) -> Result<EquipmentSlot, InventoryError> {
    EquipmentSlot::from_name(slot).ok_or_else(|| InventoryError::SlotNotFound(slot.to_string()))
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    // === Equipment ===

    /// Equip one copy of `item` from the backpack into `slot`
    ///
    /// Whatever occupies the slot is unequipped first. Availability is checked
    /// before anything moves, so a failed equip changes nothing.
    pub fn equip(&mut self, slot: &str, item: &Item) -> Result<Equipped, InventoryError> {
        if !item.has_tag(TAG_EQUIPPABLE) {
            return Err(InventoryError::ItemNotEquippable(item.name.clone()));
        }
        if !item.has_tag(slot) {
            return Err(InventoryError::IncompatibleSlot {
                item: item.name.clone(),
                slot: slot.to_string(),
            });
        }
        let slot = parse_slot(slot)?;

        let in_slot = self.equipped.get(&slot).is_some_and(|e| e.same_kind(item));
        let held = self.backpack.count(item);
        if held == 0 && !in_slot {
            return Err(InventoryError::NotEnoughItem {
                item: item.name.clone(),
                requested: 1,
                held,
            });
        }

        let replaced = if self.equipped.contains_key(&slot) {
            Some(self.unequip(slot.as_str())?)
        } else {
            None
        };
        self.backpack.remove(item, 1)?;

        let instance = InstanceId::mint();
        self.equipped.insert(slot, item.stamped(instance));
        Ok(Equipped { instance, replaced })
    }

    /// Return the item in `slot` to the backpack, giving back its instance id
    pub fn unequip(&mut self, slot: &str) -> Result<InstanceId, InventoryError> {
        let slot = parse_slot(slot)?;
        let item = self
            .equipped
            .remove(&slot)
            .ok_or(InventoryError::SlotEmpty(slot))?;
        self.backpack.add(&item.unstamped(), 1);
        Ok(item.instance)
    }

    /// Get the item equipped in a slot
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipped.get(&slot)
    }

    /// Get all equipped items
    pub fn all_equipped(&self) -> impl Iterator<Item = (&EquipmentSlot, &Item)> {
        self.equipped.iter()
    }

    /// Find the equipped copy stamped with `instance`
    pub fn equipped_instance(&self, instance: InstanceId) -> Option<&Item> {
        self.equipped.values().find(|item| item.instance == instance)
    }

    // === Backpack ===

    pub fn add(&mut self, item: &Item, count: u32) {
        self.backpack.add(item, count);
    }

    pub fn remove(&mut self, item: &Item, count: u32) -> Result<(), InventoryError> {
        self.backpack.remove(item, count)
    }

    /// Take one consumable out of the backpack
    pub fn use_item(&mut self, item: &Item) -> Result<Item, InventoryError> {
        if !item.is_consumable() {
            return Err(InventoryError::ItemNotConsumable(item.name.clone()));
        }
        self.backpack.remove(item, 1)?;
        Ok(item.unstamped())
    }

    pub fn count(&self, item: &Item) -> u32 {
        self.backpack.count(item)
    }

    pub fn backpack(&self) -> &Backpack {
        &self.backpack
    }

    /// Weight of everything carried, equipped or not
    pub fn total_weight(&self) -> u32 {
        self.equipped
            .values()
            .map(|i| i.weight)
            .fold(self.backpack.total_weight(), u32::saturating_add)
    }

    // === Tasks ===

    /// Add a task to the tasklist (no-op if already accepted)
    pub fn accept(&mut self, task: Task) {
        if !self.tasks.iter().any(|t| t.id == task.id) {
            self.tasks.push(task);
        }
    }

    /// Drop a task without granting its reward
    pub fn finish(&mut self, task_id: &str) -> Result<Task, InventoryError> {
        let index = self.task_index(task_id)?;
        Ok(self.tasks.remove(index))
    }

    /// Trade a task's required items for its reward, all or nothing
    pub fn claim(&mut self, task_id: &str) -> Result<Task, InventoryError> {
        let index = self.task_index(task_id)?;
        let required = self.tasks[index].required_items();
        self.backpack.covers(&required)?;

        for stack in required.iter() {
            self.backpack.remove(&stack.item, stack.count)?;
        }
        let task = self.tasks.remove(index);
        for stack in &task.reward {
            self.backpack.add(&stack.item, stack.count);
        }
        Ok(task)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn task_index(&self, task_id: &str) -> Result<usize, InventoryError> {
        self.tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| InventoryError::TaskNotFound(task_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dagger() -> Item {
        Item::gear("Dagger", EquipmentSlot::MainHand).with_weight(2)
    }

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(&dagger(), 2);
        inventory
    }

    #[test]
    fn test_equip_moves_item_out_of_backpack() {
        let mut inventory = stocked();
        let equipped = inventory.equip("mainhand", &dagger()).unwrap();

        assert!(equipped.instance.is_equipped());
        assert_eq!(equipped.replaced, None);
        assert_eq!(inventory.count(&dagger()), 1);
        assert_eq!(
            inventory.equipped(EquipmentSlot::MainHand).map(|i| i.instance),
            Some(equipped.instance)
        );
    }

    #[test]
    fn test_equip_failure_order() {
        let mut inventory = stocked();

        let trinket = Item::new("Trinket");
        assert!(matches!(
            inventory.equip("mainhand", &trinket),
            Err(InventoryError::ItemNotEquippable(_))
        ));
        assert!(matches!(
            inventory.equip("head", &dagger()),
            Err(InventoryError::IncompatibleSlot { .. })
        ));

        let ring = Item::new("Ring").with_tag("equippable").with_tag("finger");
        inventory.add(&ring, 1);
        assert!(matches!(
            inventory.equip("finger", &ring),
            Err(InventoryError::SlotNotFound(_))
        ));
    }

    #[test]
    fn test_equip_without_stock_changes_nothing() {
        let mut inventory = stocked();
        let first = inventory.equip("mainhand", &dagger()).unwrap();
        let helm = Item::gear("Helm", EquipmentSlot::Head);
        let before = inventory.clone();

        assert!(matches!(
            inventory.equip("head", &helm),
            Err(InventoryError::NotEnoughItem { .. })
        ));
        assert_eq!(inventory, before);
        assert_eq!(
            inventory.equipped(EquipmentSlot::MainHand).map(|i| i.instance),
            Some(first.instance)
        );
    }

    #[test]
    fn test_hot_swap_returns_previous_item() {
        let mut inventory = stocked();
        let axe = Item::gear("Axe", EquipmentSlot::MainHand);
        inventory.add(&axe, 1);

        let first = inventory.equip("mainhand", &dagger()).unwrap();
        let second = inventory.equip("mainhand", &axe).unwrap();

        assert_eq!(second.replaced, Some(first.instance));
        assert_ne!(second.instance, first.instance);
        assert_eq!(inventory.count(&dagger()), 2);
        assert_eq!(inventory.count(&axe), 0);
    }

    #[test]
    fn test_reequip_same_item_with_empty_backpack() {
        let mut inventory = Inventory::new();
        inventory.add(&dagger(), 1);
        let first = inventory.equip("mainhand", &dagger()).unwrap();
        let second = inventory.equip("mainhand", &dagger()).unwrap();

        assert_eq!(second.replaced, Some(first.instance));
        assert_eq!(inventory.count(&dagger()), 0);
    }

    #[test]
    fn test_unequip_errors_and_restore() {
        let mut inventory = stocked();
        assert!(matches!(inventory.unequip("belt"), Err(InventoryError::SlotNotFound(_))));
        assert!(matches!(
            inventory.unequip("mainhand"),
            Err(InventoryError::SlotEmpty(EquipmentSlot::MainHand))
        ));

        let equipped = inventory.equip("mainhand", &dagger()).unwrap();
        let removed = inventory.unequip("mainhand").unwrap();

        assert_eq!(removed, equipped.instance);
        assert_eq!(inventory.count(&dagger()), 2);
        assert!(inventory.equipped(EquipmentSlot::MainHand).is_none());
    }

    #[test]
    fn test_total_weight_counts_worn_items() {
        let mut inventory = stocked();
        inventory.equip("mainhand", &dagger()).unwrap();
        assert_eq!(inventory.total_weight(), 4);
    }

    #[test]
    fn test_use_item() {
        let mut inventory = stocked();
        let potion = Item::new("Potion").with_tag("consumable");
        inventory.add(&potion, 1);

        assert!(matches!(
            inventory.use_item(&dagger()),
            Err(InventoryError::ItemNotConsumable(_))
        ));
        assert_eq!(inventory.use_item(&potion).unwrap(), potion);
        assert!(matches!(
            inventory.use_item(&potion),
            Err(InventoryError::NotEnoughItem { .. })
        ));
    }

    #[test]
    fn test_claim_is_all_or_nothing() {
        let pelt = Item::new("Pelt");
        let fang = Item::new("Fang");
        let gold = Item::new("Gold");
        let task = Task::new("hunt", "Hunt")
            .requires(pelt.clone(), 2)
            .requires(fang.clone(), 1)
            .rewards(gold.clone(), 10);

        let mut inventory = Inventory::new();
        inventory.add(&pelt, 2);
        inventory.accept(task);

        let before = inventory.clone();
        assert!(matches!(
            inventory.claim("hunt"),
            Err(InventoryError::NotEnoughItem { .. })
        ));
        assert_eq!(inventory, before);

        inventory.add(&fang, 1);
        inventory.claim("hunt").unwrap();
        assert_eq!(inventory.count(&pelt), 0);
        assert_eq!(inventory.count(&fang), 0);
        assert_eq!(inventory.count(&gold), 10);
        assert!(inventory.tasks().is_empty());
    }

    #[test]
    fn test_claim_merges_duplicate_requirements() {
        let pelt = Item::new("Pelt");
        let task = Task::new("pelts", "Pelts")
            .requires(pelt.clone(), 1)
            .requires(pelt.clone(), 1);

        let mut inventory = Inventory::new();
        inventory.add(&pelt, 1);
        inventory.accept(task);

        assert!(inventory.claim("pelts").is_err());
        assert_eq!(inventory.count(&pelt), 1);
    }

    #[test]
    fn test_finish_and_accept() {
        let mut inventory = Inventory::new();
        inventory.accept(Task::new("scout", "Scout"));
        inventory.accept(Task::new("scout", "Scout again"));
        assert_eq!(inventory.tasks().len(), 1);

        assert_eq!(inventory.finish("scout").unwrap().name, "Scout");
        assert!(matches!(
            inventory.finish("scout"),
            Err(InventoryError::TaskNotFound(_))
        ));
        assert!(matches!(
            inventory.claim("scout"),
            Err(InventoryError::TaskNotFound(_))
        ));
    }
}
