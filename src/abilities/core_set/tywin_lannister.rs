//! Tywin Lannister (01090).
//!
//! Gets +1 STR for each gold in his controller's pool. Provides 2 income
//! unless blank, which comes from the printed income value.

use super::super::registry::CardAbilities;
use super::super::setup::AbilitySetup;
use crate::effects::{CardMatcher, EffectKind};

pub struct TywinLannister;

impl CardAbilities for TywinLannister {
    fn code(&self) -> &'static str {
        "01090"
    }

    fn setup_abilities(&self, setup: &mut AbilitySetup<'_>) {
        let uuid = setup.uuid();
        setup.persistent_effect(
            CardMatcher::card(uuid),
            EffectKind::dynamic_strength(|card, view| {
                i32::try_from(view.gold(card.controller())).unwrap_or(i32::MAX)
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::abilities::core_set;
    use crate::cards::{CardRegistry, Location};
    use crate::core::{Phase, PlayerId};
    use crate::effects::EffectEngine;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_strength_follows_gold() {
        let mut cards = CardRegistry::new();
        let mut effects = EffectEngine::new();
        let mut pipeline = Pipeline::new(2);
        pipeline.set_phase_all(Phase::Marshal);

        let data = Arc::new(core_set::find("01090").unwrap().unwrap());
        let id = cards.create(data, PlayerId::new(0));
        let card = cards.get_mut(id).unwrap();
        TywinLannister.setup_abilities(&mut AbilitySetup::new(card, &mut effects));
        card.base.move_to(Location::PlayArea, None);

        pipeline.set_gold(PlayerId::new(0), 5);
        effects.reapply(&mut cards, &mut pipeline);
        assert_eq!(cards.get(id).unwrap().strength(&pipeline), 11);

        pipeline.set_gold(PlayerId::new(0), 0);
        effects.reapply(&mut cards, &mut pipeline);
        assert_eq!(cards.get(id).unwrap().strength(&pipeline), 6);
    }

    #[test]
    fn test_income_unless_blank() {
        let data = Arc::new(core_set::find("01090").unwrap().unwrap());
        let mut cards = CardRegistry::new();
        let id = cards.create(data, PlayerId::new(0));
        let card = cards.get_mut(id).unwrap();

        assert_eq!(card.income(), Some(2));
        card.base.set_blank();
        assert_eq!(card.income(), None);
    }
}
