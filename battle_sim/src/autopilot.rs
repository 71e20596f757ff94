//! Autopilot - Stand-in decisions for player-controlled fighters

use battle_core::prelude::*;

/// Heal the most wounded ally below half health if possible, otherwise
/// strike the weakest enemy with the hardest-hitting offensive action
pub fn decide(
    fighter: &Character,
    allies: &CombatParty,
    enemies: &CombatParty,
) -> Option<Decision> {
    let actions = fighter.available_actions();

    let heal = actions.iter().find(|(_, a)| a.is_heal());
    let wounded = allies
        .members()
        .filter(|c| {
            c.is_alive() && c.health().saturating_mul(2) < c.current().get(Attribute::MaxHealth)
        })
        .min_by_key(|c| c.health());
    if let (Some((source, action)), Some(ally)) = (heal, wounded) {
        return Some(Decision::new(*source, action.clone(), ally.id));
    }

    let (source, action) = actions
        .into_iter()
        .filter(|(_, a)| !a.is_heal())
        .max_by_key(|(_, a)| a.base_damage)
        .unwrap_or((ActionSource::Innate, Action::punch()));
    let target = enemies
        .members()
        .filter(|c| c.is_alive())
        .min_by_key(|c| c.health())?;
    Some(Decision::new(source, action, target.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mend() -> Action {
        Action::new("mend", "Mend", 3).with_tag("heal")
    }

    fn body(name: &str, health: u32) -> Character {
        Character::new(name, StatSheet::unset().with(Attribute::MaxHealth, health))
    }

    #[test]
    fn test_strikes_weakest_enemy_with_strongest_action() {
        let fighter = body("Hero", 10)
            .with_action(Action::new("jab", "Jab", 1))
            .with_action(Action::new("slam", "Slam", 4));
        let strong = body("Ogre", 20);
        let weak = body("Imp", 3);
        let weak_id = weak.id;
        let allies = CombatParty::new("Heroes", [fighter.clone()]);
        let enemies = CombatParty::new("Monsters", [strong, weak]);

        let decision = decide(&fighter, &allies, &enemies).unwrap();
        assert_eq!(decision.action.id, "slam");
        assert_eq!(decision.target, weak_id);
    }

    #[test]
    fn test_heals_wounded_ally() {
        let healer = body("Cleric", 10).with_action(mend());
        let hurt = body("Knight", 10).hit(8.0);
        let hurt_id = hurt.id;
        let allies = CombatParty::new("Heroes", [healer.clone(), hurt]);
        let enemies = CombatParty::new("Monsters", [body("Imp", 3)]);

        let decision = decide(&healer, &allies, &enemies).unwrap();
        assert_eq!(decision.action.id, "mend");
        assert_eq!(decision.target, hurt_id);
    }

    #[test]
    fn test_healer_without_wounded_allies_punches() {
        let healer = body("Cleric", 10).with_action(mend());
        let allies = CombatParty::new("Heroes", [healer.clone()]);
        let enemies = CombatParty::new("Monsters", [body("Imp", 3)]);

        let decision = decide(&healer, &allies, &enemies).unwrap();
        assert_eq!(decision.action, Action::punch());
        assert_eq!(decision.source, ActionSource::Innate);
    }
}
