//! Damage system - turning an action into a DamageInstance

mod calculation;
mod instance;

pub use calculation::calculate_damage;
pub use instance::DamageInstance;
