//! Battle - Resumable turn-based resolution between two parties
//!
//! Each call to [`Battle::advance`] resolves at most one slot of the turn
//! order. Turn rollover and fallen fighters are handled inside the call, so
//! the caller only ever sees one of three results: a slot was applied, a
//! player-controlled fighter needs a decision, or the battle is over.
//!
//! ```text
//! NotStarted --begin--> Running --advance--> AwaitingInput --advance(decision)--> Running
//!                          \                                                        |
//!                           +------------------ last enemy falls ------------------+--> Ended
//! ```

mod npc;
mod state;
mod turn_order;

pub use npc::choose_npc_decision;
pub use state::{BattleState, Decision, Outcome, Progress, StepResult};
pub use turn_order::{prune, sort_by_agility};

use crate::character::Character;
use crate::damage::calculate_damage;
use crate::party::{CombatParty, PartyError};
use crate::types::{Attribute, CharacterId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Character {0} is not part of this battle")]
    CharacterNotFound(CharacterId),

    #[error("Battle has not begun")]
    NotStarted,

    #[error("Battle has already begun")]
    AlreadyStarted,

    #[error("The next fighter is not waiting on a decision")]
    UnexpectedDecision,

    #[error("Character {0} cannot be targeted")]
    InvalidTarget(CharacterId),

    #[error("Action '{0}' is not available to the acting fighter")]
    ActionUnavailable(String),
}

impl From<PartyError> for BattleError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::CharacterNotFound(id) => BattleError::CharacterNotFound(id),
        }
    }
}

/// A battle between party A (the "home" side) and party B
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    party_a: CombatParty,
    party_b: CombatParty,
    turn_order: Vec<CharacterId>,
    progress: Progress,
    state: BattleState,
}

impl Battle {
    /// Set up a battle; the turn order lists party A's living members then
    /// party B's until [`Battle::begin`] sorts it
    pub fn new(party_a: CombatParty, party_b: CombatParty) -> Self {
        let mut turn_order = party_a.valid_targets();
        turn_order.extend(party_b.valid_targets());
        Battle {
            party_a,
            party_b,
            turn_order,
            progress: Progress::default(),
            state: BattleState::NotStarted,
        }
    }

    // === Accessors ===

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn turn_order(&self) -> &[CharacterId] {
        &self.turn_order
    }

    pub fn party_a(&self) -> &CombatParty {
        &self.party_a
    }

    pub fn party_b(&self) -> &CombatParty {
        &self.party_b
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            BattleState::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Look up a fighter on either side
    pub fn character(&self, id: CharacterId) -> Result<&Character, BattleError> {
        self.party_a
            .get_member(id)
            .or_else(|_| self.party_b.get_member(id))
            .map_err(BattleError::from)
    }

    // === Lifecycle ===

    /// Sort the turn order by descending agility and start turn 1
    ///
    /// A side with no living members ends the battle right away.
    pub fn begin(&mut self) -> Result<(), BattleError> {
        if self.state != BattleState::NotStarted {
            return Err(BattleError::AlreadyStarted);
        }

        let mut initiative = self
            .turn_order
            .iter()
            .map(|id| {
                self.character(*id)
                    .map(|c| (*id, c.current().get(Attribute::Agility)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_agility(&mut initiative);
        self.turn_order = initiative.into_iter().map(|(id, _)| id).collect();

        self.state = BattleState::Running;
        self.new_turn();
        info!(
            party_a = %self.party_a.name,
            party_b = %self.party_b.name,
            fighters = self.turn_order.len(),
            "battle begins"
        );

        if let Some(outcome) = self.evaluate_outcome() {
            self.finish(outcome);
        }
        Ok(())
    }

    /// Start the next turn: bump the counter, rewind to the first slot and
    /// drop fallen fighters from the order
    pub fn new_turn(&mut self) {
        self.progress.turn += 1;
        self.progress.turn_progress = 0;

        let (party_a, party_b) = (&self.party_a, &self.party_b);
        prune(&mut self.turn_order, |id| {
            party_a
                .get_member(id)
                .or_else(|_| party_b.get_member(id))
                .map(Character::is_alive)
                .unwrap_or(false)
        });
        debug!(
            turn = self.progress.turn,
            fighters = self.turn_order.len(),
            "new turn"
        );
    }

    /// Resolve the next slot, drawing NPC choices from the thread RNG
    pub fn advance(&mut self, choice: Option<Decision>) -> Result<StepResult, BattleError> {
        self.advance_with_rng(choice, &mut rand::thread_rng())
    }

    /// Resolve the next slot
    ///
    /// A decision is consumed when the next living fighter is
    /// player-controlled, whether or not its prompt was seen first; otherwise
    /// it is rejected with `UnexpectedDecision`. Calling with `None` at a
    /// player slot returns the same prompt until a decision arrives. A
    /// rejected decision leaves the battle untouched.
    pub fn advance_with_rng(
        &mut self,
        choice: Option<Decision>,
        rng: &mut impl Rng,
    ) -> Result<StepResult, BattleError> {
        match self.state {
            BattleState::NotStarted => return Err(BattleError::NotStarted),
            BattleState::Ended(outcome) => return Ok(StepResult::Outcome(outcome)),
            BattleState::Running | BattleState::AwaitingInput { .. } => {}
        }
        if let Some(decision) = &choice {
            let fighter = self
                .next_fighter()?
                .filter(|c| c.is_player())
                .ok_or(BattleError::UnexpectedDecision)?;
            self.validate(fighter, decision)?;
        }
        let mut choice = choice;

        loop {
            if self.progress.turn_progress >= self.turn_order.len() {
                self.new_turn();
                if let Some(outcome) = self.evaluate_outcome() {
                    self.finish(outcome);
                    return Ok(StepResult::Outcome(outcome));
                }
                continue;
            }

            let fighter_id = self.turn_order[self.progress.turn_progress];
            let fighter = self.character(fighter_id)?.clone();
            if !fighter.is_alive() {
                debug!(fighter = %fighter.name, "skipping fallen fighter");
                self.progress.turn_progress += 1;
                continue;
            }

            let (allies, enemies) = self.sides(fighter_id)?;
            let decision = if fighter.is_player() {
                match choice.take() {
                    Some(decision) => decision,
                    None => {
                        debug!(fighter = %fighter.name, "awaiting decision");
                        let prompt = StepResult::AwaitingInput {
                            allies: allies.clone(),
                            enemies: enemies.clone(),
                            fighter,
                        };
                        self.state = BattleState::AwaitingInput { fighter: fighter_id };
                        return Ok(prompt);
                    }
                }
            } else {
                match choose_npc_decision(&fighter, enemies, rng) {
                    Some(decision) => {
                        debug!(
                            fighter = %fighter.name,
                            action = %decision.action.id,
                            target = %decision.target,
                            "npc decided"
                        );
                        decision
                    }
                    None => {
                        debug!(fighter = %fighter.name, "no target available");
                        self.progress.turn_progress += 1;
                        continue;
                    }
                }
            };

            self.state = BattleState::Running;
            return self.resolve(fighter, decision);
        }
    }

    // === Resolution ===

    /// The living fighter whose slot `advance` resolves next, looking past
    /// the end of the current turn if needed
    fn next_fighter(&self) -> Result<Option<&Character>, BattleError> {
        let rest = self.turn_order.iter().skip(self.progress.turn_progress);
        for id in rest.chain(self.turn_order.iter()) {
            let fighter = self.character(*id)?;
            if fighter.is_alive() {
                return Ok(Some(fighter));
            }
        }
        Ok(None)
    }

    /// (allies, enemies) from the point of view of `id`
    fn sides(&self, id: CharacterId) -> Result<(&CombatParty, &CombatParty), BattleError> {
        if self.party_a.has_member(id) {
            Ok((&self.party_a, &self.party_b))
        } else if self.party_b.has_member(id) {
            Ok((&self.party_b, &self.party_a))
        } else {
            Err(BattleError::CharacterNotFound(id))
        }
    }

    fn validate(&self, fighter: &Character, decision: &Decision) -> Result<(), BattleError> {
        let target = self.character(decision.target)?;
        if !target.is_alive() {
            return Err(BattleError::InvalidTarget(decision.target));
        }
        if !fighter.knows(decision.source, &decision.action) {
            return Err(BattleError::ActionUnavailable(decision.action.id.clone()));
        }
        Ok(())
    }

    /// Apply one decision: pay costs, hit the target, advance the slot and
    /// check for a finished battle
    fn resolve(
        &mut self,
        fighter: Character,
        decision: Decision,
    ) -> Result<StepResult, BattleError> {
        let weapon = fighter.weapon_for(decision.source);
        let damage = calculate_damage(&fighter, &decision.action, weapon);
        self.store(fighter.spend(&decision.action))?;

        let target = self
            .character(decision.target)?
            .hit(damage.amount)
            .afflict(&damage.effects);
        self.store(target.clone())?;
        let attacker = self.character(fighter.id)?.clone();

        info!(
            turn = self.progress.turn,
            attacker = %attacker.name,
            target = %target.name,
            action = %damage.action_id,
            amount = damage.applied_amount(),
            target_health = target.health(),
            "action resolved"
        );
        self.progress.turn_progress += 1;

        let outcome = if target.is_alive() {
            None
        } else {
            info!(character = %target.name, "character fell");
            self.evaluate_outcome()
        };
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(StepResult::TurnApplied {
            attacker,
            target,
            damage,
            outcome,
        })
    }

    /// Write a character record back into whichever party holds it
    fn store(&mut self, character: Character) -> Result<(), BattleError> {
        if self.party_a.has_member(character.id) {
            self.party_a.update_member(character)?;
        } else {
            self.party_b.update_member(character)?;
        }
        Ok(())
    }

    /// Party A losing everyone is checked first
    fn evaluate_outcome(&self) -> Option<Outcome> {
        if self.party_a.is_defeated() {
            Some(Outcome::Loss)
        } else if self.party_b.is_defeated() {
            Some(Outcome::Win)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(?outcome, turn = self.progress.turn, "battle ended");
        self.state = BattleState::Ended(outcome);
    }
}
