//! Turn order - initiative sorting and round-boundary pruning

use crate::types::CharacterId;
use std::cmp::Reverse;

/// Stable sort by descending agility
///
/// Equal agility keeps the incoming relative order, so the first party still
/// goes before the second on ties.
pub fn sort_by_agility(order: &mut [(CharacterId, u32)]) {
    order.sort_by_key(|(_, agility)| Reverse(*agility));
}

/// Drop every id for which `is_alive` is false
pub fn prune(order: &mut Vec<CharacterId>, is_alive: impl Fn(CharacterId) -> bool) {
    order.retain(|id| is_alive(*id));
}
