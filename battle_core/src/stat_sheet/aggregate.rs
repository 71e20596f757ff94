//! Bonus aggregation - Rebuilding derived stats from base plus bonuses

use super::StatSheet;

impl StatSheet {
    /// Sum every set bonus field onto `base`
    ///
    /// Always rebuilds from `base`; the result of a previous call is never an
    /// input. Unset bonus fields are skipped, and an unset base field counts
    /// as zero once any bonus sets it.
    pub fn summed<'a>(
        base: &StatSheet,
        bonuses: impl IntoIterator<Item = &'a StatSheet>,
    ) -> StatSheet {
        let mut total = *base;
        for bonus in bonuses {
            for attribute in Self::attributes() {
                if let Some(value) = bonus.field(*attribute) {
                    let current = total.field(*attribute).unwrap_or(0);
                    *total.field_mut(*attribute) = Some(current.saturating_add(value));
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use crate::stat_sheet::StatSheet;
    use crate::types::Attribute;

    #[test]
    fn test_summed_without_bonuses_is_base() {
        let base = StatSheet::filled(4).with(Attribute::Acumen, 1);
        assert_eq!(StatSheet::summed(&base, []), base);
    }

    #[test]
    fn test_summed_skips_unset_bonus_fields() {
        let base = StatSheet::unset()
            .with(Attribute::MaxHealth, 10)
            .with(Attribute::Strength, 3);
        let sword = StatSheet::unset().with(Attribute::Strength, 2);
        let helm = StatSheet::unset().with(Attribute::Armor, 5);

        let total = StatSheet::summed(&base, [&sword, &helm]);

        assert_eq!(total.max_health, Some(10));
        assert_eq!(total.strength, Some(5));
        assert_eq!(total.armor, Some(5));
        assert_eq!(total.agility, None);
    }

    #[test]
    fn test_summed_is_order_independent() {
        let base = StatSheet::filled(1);
        let a = StatSheet::unset().with(Attribute::Agility, 3);
        let b = StatSheet::unset().with(Attribute::Agility, 4).with(Attribute::MaxMana, 2);

        assert_eq!(StatSheet::summed(&base, [&a, &b]), StatSheet::summed(&base, [&b, &a]));
    }
}
