//! Task - Item delivery quests held in an inventory's tasklist

use super::{Backpack, ItemStack};
use crate::item::Item;
use serde::{Deserialize, Serialize};

/// A task that trades required items for reward items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub required: Vec<ItemStack>,
    #[serde(default)]
    pub reward: Vec<ItemStack>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            name: name.into(),
            required: Vec::new(),
            reward: Vec::new(),
        }
    }

    pub fn requires(mut self, item: Item, count: u32) -> Self {
        self.required.push(ItemStack::new(item, count));
        self
    }

    pub fn rewards(mut self, item: Item, count: u32) -> Self {
        self.reward.push(ItemStack::new(item, count));
        self
    }

    /// Requirements with duplicate entries merged
    pub fn required_items(&self) -> Backpack {
        Backpack::from_stacks(&self.required)
    }
}
