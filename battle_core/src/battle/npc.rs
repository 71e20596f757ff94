//! NPC decisions - uniform random action and target selection

use super::Decision;
use crate::character::Character;
use crate::item::{Action, ActionSource};
use crate::party::CombatParty;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick an offensive action and an enemy target uniformly at random
///
/// Healing actions are left out since NPCs only target enemies. Returns
/// `None` when the enemy party has no valid targets.
pub fn choose_npc_decision(
    fighter: &Character,
    enemies: &CombatParty,
    rng: &mut impl Rng,
) -> Option<Decision> {
    let actions: Vec<(ActionSource, Action)> = fighter
        .available_actions()
        .into_iter()
        .filter(|(_, action)| !action.is_heal())
        .collect();
    let (source, action) = actions
        .choose(rng)
        .cloned()
        .unwrap_or((ActionSource::Innate, Action::punch()));

    let target = *enemies.valid_targets().choose(rng)?;
    Some(Decision::new(source, action, target))
}
