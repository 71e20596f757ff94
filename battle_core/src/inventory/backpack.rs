//! Backpack - A multiset of unequipped items

use super::InventoryError;
use crate::item::Item;
use serde::{Deserialize, Serialize};

/// A count of identical items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: Item, count: u32) -> Self {
        ItemStack { item, count }
    }
}

/// Insertion-ordered multiset of items
///
/// Items are stored unstamped so copies coming back from an equipment slot
/// stack with the ones that never left. Counts are always at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backpack {
    stacks: Vec<ItemStack>,
}

impl Backpack {
    pub fn new() -> Self {
        Backpack::default()
    }

    /// Build a backpack from stacks, merging duplicates
    pub fn from_stacks<'a>(stacks: impl IntoIterator<Item = &'a ItemStack>) -> Self {
        let mut backpack = Backpack::new();
        for stack in stacks {
            backpack.add(&stack.item, stack.count);
        }
        backpack
    }

    fn position(&self, item: &Item) -> Option<usize> {
        self.stacks.iter().position(|s| s.item.same_kind(item))
    }

    /// How many copies of `item` are held
    pub fn count(&self, item: &Item) -> u32 {
        self.position(item).map(|i| self.stacks[i].count).unwrap_or(0)
    }

    pub fn add(&mut self, item: &Item, count: u32) {
        if count == 0 {
            return;
        }
        match self.position(item) {
            Some(i) => {
                let stack = &mut self.stacks[i];
                stack.count = stack.count.saturating_add(count);
            }
            None => self.stacks.push(ItemStack::new(item.unstamped(), count)),
        }
    }

    /// Remove `count` copies, deleting the stack when it reaches zero
    pub fn remove(&mut self, item: &Item, count: u32) -> Result<(), InventoryError> {
        let held = self.count(item);
        if count > held {
            return Err(InventoryError::NotEnoughItem {
                item: item.name.clone(),
                requested: count,
                held,
            });
        }
        if let Some(i) = self.position(item) {
            if held == count {
                self.stacks.remove(i);
            } else {
                self.stacks[i].count -= count;
            }
        }
        Ok(())
    }

    /// Check that every stack in `required` is covered
    pub fn covers(&self, required: &Backpack) -> Result<(), InventoryError> {
        for stack in &required.stacks {
            let held = self.count(&stack.item);
            if held < stack.count {
                return Err(InventoryError::NotEnoughItem {
                    item: stack.item.name.clone(),
                    requested: stack.count,
                    held,
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn total_weight(&self) -> u32 {
        self.stacks
            .iter()
            .map(|s| s.item.weight.saturating_mul(s.count))
            .fold(0, u32::saturating_add)
    }
}
