//! Battle state - progress counters, suspension and step results
//!
//! Suspension is plain data: a paused battle is a `Battle` whose state is
//! `AwaitingInput`, and it can be cloned, inspected or serialized like any
//! other value.

use crate::character::Character;
use crate::damage::DamageInstance;
use crate::item::{Action, ActionSource};
use crate::party::CombatParty;
use crate::types::CharacterId;
use serde::{Deserialize, Serialize};

/// How a battle ended, from the first party's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}

/// Where the battle is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    #[default]
    NotStarted,
    Running,
    /// A player-controlled fighter's slot is pending a decision
    AwaitingInput { fighter: CharacterId },
    Ended(Outcome),
}

/// Resumable position in the turn loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Current turn, starting at 1 once the battle begins
    pub turn: u32,
    /// Index of the next slot in the turn order
    pub turn_progress: usize,
}

/// A fighter's choice for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Where the action comes from; the acting weapon is the item equipped
    /// under this source
    pub source: ActionSource,
    pub action: Action,
    pub target: CharacterId,
}

impl Decision {
    pub fn new(source: ActionSource, action: Action, target: CharacterId) -> Self {
        Decision {
            source,
            action,
            target,
        }
    }
}

/// What one call to `Battle::advance` produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepResult {
    /// A player-controlled fighter must decide; call `advance` again with a
    /// decision to resume this exact slot
    AwaitingInput {
        fighter: Character,
        allies: CombatParty,
        enemies: CombatParty,
    },
    /// One slot resolved. `attacker` and `target` are the records after the
    /// action; `outcome` is set when this action ended the battle
    TurnApplied {
        attacker: Character,
        target: Character,
        damage: DamageInstance,
        outcome: Option<Outcome>,
    },
    /// The battle is over
    Outcome(Outcome),
}

impl StepResult {
    /// The outcome this step reached, if any
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            StepResult::AwaitingInput { .. } => None,
            StepResult::TurnApplied { outcome, .. } => *outcome,
            StepResult::Outcome(outcome) => Some(*outcome),
        }
    }
}
