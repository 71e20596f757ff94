//! battle_core - Turn-based party combat for game entities
//!
//! This library provides:
//! - StatSheet: Three-state combat attributes and their aggregation
//! - Item / Inventory: Equipment legality, backpack bookkeeping and tasks
//! - Character: Stats rebuilt from base + equipment, resource pools, actions
//! - CombatParty: Fixed rosters for the length of a battle
//! - Battle: A resumable state machine that suspends on player decisions

pub mod battle;
pub mod character;
pub mod config;
pub mod damage;
pub mod inventory;
pub mod item;
pub mod party;
pub mod prelude;
pub mod stat_sheet;
pub mod types;

// Re-export core types for convenience
pub use battle::{Battle, BattleError, BattleState, Decision, Outcome, Progress, StepResult};
pub use character::{Character, Resources};
pub use config::{build_party, default_actions, load_roster, ConfigError, RosterConfig};
pub use damage::{calculate_damage, DamageInstance};
pub use inventory::{Backpack, Equipped, Inventory, InventoryError, ItemStack, Task};
pub use item::{Action, ActionSource, Item, Scaling};
pub use party::{CombatParty, PartyError};
pub use stat_sheet::StatSheet;
pub use types::{Attribute, CharacterId, Controller, DamageType, EquipmentSlot, InstanceId};
