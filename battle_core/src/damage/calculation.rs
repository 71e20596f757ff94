//! Damage calculation - turning an action + attacker stats into a DamageInstance

use super::DamageInstance;
use crate::character::Character;
use crate::item::{Action, Item};

/// Calculate the damage an attacker deals with an action
///
/// `base_damage + scaling_attribute × ratio_percent / 100`, read from the
/// attacker's current stats. Equipment bonuses are already part of those
/// stats, so the weapon only lends its tags. Healing actions come out
/// negative.
pub fn calculate_damage(
    attacker: &Character,
    action: &Action,
    weapon: Option<&Item>,
) -> DamageInstance {
    let scaled = action
        .scaling
        .map(|s| attacker.current().get(s.attribute).saturating_mul(s.ratio_percent) / 100)
        .unwrap_or(0);
    let magnitude = f64::from(action.base_damage.saturating_add(scaled));

    let mut instance = DamageInstance::new(attacker.id, action.id.clone(), magnitude);
    instance.damage_type = action.damage_type;
    instance.effects = action.effects.clone();
    instance.tags = action.tags.clone();
    if let Some(weapon) = weapon {
        instance.tags.extend(weapon.tags.iter().cloned());
    }

    if action.is_heal() {
        instance.amount = -magnitude;
    }
    instance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_sheet::StatSheet;
    use crate::types::{Attribute, DamageType, EquipmentSlot};

    fn brute() -> Character {
        Character::new(
            "Brute",
            StatSheet::unset()
                .with(Attribute::MaxHealth, 20)
                .with(Attribute::Strength, 12)
                .with(Attribute::Acumen, 5),
        )
    }

    #[test]
    fn test_flat_damage() {
        let stab = Action::new("light_stab", "Light Stab", 2);
        let instance = calculate_damage(&brute(), &stab, None);

        assert_eq!(instance.applied_amount(), 2);
        assert_eq!(instance.action_id, "light_stab");
        assert!(!instance.is_heal());
    }

    #[test]
    fn test_scaling_uses_current_stats() {
        let smash = Action::new("smash", "Smash", 1).with_scaling(Attribute::Strength, 50);
        let club = Item::gear("Club", EquipmentSlot::MainHand)
            .with_tag("weapon")
            .with_bonus(StatSheet::unset().with(Attribute::Strength, 4));
        let armed = brute().add(&club, 1).equip("mainhand", &club).unwrap();

        assert_eq!(calculate_damage(&brute(), &smash, None).applied_amount(), 7);

        let weapon = armed.inventory().equipped(EquipmentSlot::MainHand);
        let instance = calculate_damage(&armed, &smash, weapon);
        assert_eq!(instance.applied_amount(), 9);
        assert!(instance.tags.contains("weapon"));
    }

    #[test]
    fn test_heal_is_negative() {
        let mend = Action::new("mend", "Mend", 2)
            .with_damage_type(DamageType::Magical)
            .with_scaling(Attribute::Acumen, 100)
            .with_tag("heal");
        let instance = calculate_damage(&brute(), &mend, None);

        assert_eq!(instance.applied_amount(), -7);
        assert!(instance.is_heal());
        assert_eq!(instance.damage_type, DamageType::Magical);
    }

    #[test]
    fn test_effects_carried() {
        let bite = Action::new("bite", "Bite", 1).with_effect("poison");
        let instance = calculate_damage(&brute(), &bite, None);
        assert_eq!(instance.effects, vec!["poison".to_string()]);
    }
}
