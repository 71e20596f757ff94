//! CombatParty - A roster snapshot taken for the length of one battle

use crate::character::Character;
use crate::types::CharacterId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartyError {
    #[error("Character {0} is not in this party")]
    CharacterNotFound(CharacterId),
}

/// A roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Member {
    character: Character,
    /// Membership flag; aliveness is read from `character` instead
    active: bool,
}

/// Fixed membership for the life of one battle, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatParty {
    pub name: String,
    members: Vec<Member>,
    leader: Option<CharacterId>,
}

impl CombatParty {
    /// Create a party led by its first member
    pub fn new(name: impl Into<String>, characters: impl IntoIterator<Item = Character>) -> Self {
        let members: Vec<Member> = characters
            .into_iter()
            .map(|character| Member {
                character,
                active: true,
            })
            .collect();
        let leader = members.first().map(|m| m.character.id);
        CombatParty {
            name: name.into(),
            members,
            leader,
        }
    }

    pub fn with_leader(mut self, leader: CharacterId) -> Result<Self, PartyError> {
        if !self.has_member(leader) {
            return Err(PartyError::CharacterNotFound(leader));
        }
        self.leader = Some(leader);
        Ok(self)
    }

    pub fn leader(&self) -> Option<CharacterId> {
        self.leader
    }

    /// Alive member ids, in insertion order
    pub fn valid_targets(&self) -> Vec<CharacterId> {
        self.members
            .iter()
            .filter(|m| m.character.is_alive())
            .map(|m| m.character.id)
            .collect()
    }

    /// True once no member is alive
    pub fn is_defeated(&self) -> bool {
        self.valid_targets().is_empty()
    }

    pub fn has_member(&self, id: CharacterId) -> bool {
        self.members.iter().any(|m| m.character.id == id)
    }

    pub fn get_member(&self, id: CharacterId) -> Result<&Character, PartyError> {
        self.members
            .iter()
            .find(|m| m.character.id == id)
            .map(|m| &m.character)
            .ok_or(PartyError::CharacterNotFound(id))
    }

    /// Replace the stored record for `character.id`
    pub fn update_member(&mut self, character: Character) -> Result<(), PartyError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.character.id == character.id)
            .ok_or(PartyError::CharacterNotFound(character.id))?;
        member.character = character;
        Ok(())
    }

    /// Membership flag of a member
    pub fn is_active(&self, id: CharacterId) -> Result<bool, PartyError> {
        self.members
            .iter()
            .find(|m| m.character.id == id)
            .map(|m| m.active)
            .ok_or(PartyError::CharacterNotFound(id))
    }

    /// All members, in insertion order
    pub fn members(&self) -> impl Iterator<Item = &Character> {
        self.members.iter().map(|m| &m.character)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_sheet::StatSheet;
    use crate::types::Attribute;

    fn member(name: &str) -> Character {
        Character::new(name, StatSheet::unset().with(Attribute::MaxHealth, 5))
    }

    #[test]
    fn test_valid_targets_skip_dead_in_order() {
        let (a, b, c) = (member("A"), member("B"), member("C"));
        let ids = [a.id, b.id, c.id];
        let mut party = CombatParty::new("Heroes", [a, b.clone(), c]);

        assert_eq!(party.valid_targets(), ids.to_vec());

        party.update_member(b.hit(10.0)).unwrap();
        assert_eq!(party.valid_targets(), vec![ids[0], ids[2]]);
        assert!(!party.is_defeated());
        assert_eq!(party.is_active(ids[1]), Ok(true));
    }

    #[test]
    fn test_lookup_unknown_member() {
        let party = CombatParty::new("Heroes", [member("A")]);
        let stranger = member("Stranger");

        assert!(!party.has_member(stranger.id));
        assert_eq!(
            party.get_member(stranger.id),
            Err(PartyError::CharacterNotFound(stranger.id))
        );
        assert!(party.clone().update_member(stranger.clone()).is_err());
        assert!(party.with_leader(stranger.id).is_err());
    }

    #[test]
    fn test_leader_defaults_to_first() {
        let (a, b) = (member("A"), member("B"));
        let (a_id, b_id) = (a.id, b.id);
        let party = CombatParty::new("Heroes", [a, b]);

        assert_eq!(party.leader(), Some(a_id));
        assert_eq!(party.with_leader(b_id).unwrap().leader(), Some(b_id));
    }

    #[test]
    fn test_empty_party_is_defeated() {
        let party = CombatParty::new("Nobody", Vec::new());
        assert!(party.is_defeated());
        assert!(party.is_empty());
        assert_eq!(party.leader(), None);
    }
}
