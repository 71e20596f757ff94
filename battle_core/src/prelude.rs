//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::stat_sheet::StatSheet;
pub use crate::types::{Attribute, CharacterId, Controller, DamageType, EquipmentSlot, InstanceId};

// Items and inventory
pub use crate::inventory::{Inventory, InventoryError, Task};
pub use crate::item::{Action, ActionSource, Item};

// Characters and parties
pub use crate::character::Character;
pub use crate::party::CombatParty;

// Combat
pub use crate::battle::{Battle, BattleError, Decision, Outcome, StepResult};
pub use crate::damage::{calculate_damage, DamageInstance};

// Config
pub use crate::config::{build_party, default_actions, load_roster};
