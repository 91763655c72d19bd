//! What an ability script can declare.

use crate::cards::{AllowedAttachments, DrawCard};
use crate::core::EntityId;
use crate::effects::{CardMatcher, EffectEngine, EffectId, EffectKind, PersistentEffect};

/// Handed to `CardAbilities::setup_abilities` for a freshly created card.
pub struct AbilitySetup<'a> {
    card: &'a mut DrawCard,
    effects: &'a mut EffectEngine,
}

impl<'a> AbilitySetup<'a> {
    pub fn new(card: &'a mut DrawCard, effects: &'a mut EffectEngine) -> Self {
        Self { card, effects }
    }

    #[must_use]
    pub fn card(&self) -> &DrawCard {
        &*self.card
    }

    #[must_use]
    pub fn uuid(&self) -> EntityId {
        self.card.uuid()
    }

    /// Declare an effect sourced from this card on every matching card.
    pub fn persistent_effect(&mut self, matcher: CardMatcher, kind: EffectKind) -> EffectId {
        let source = self.uuid();
        self.effects.add(PersistentEffect::new(source, matcher, kind))
    }

    /// Declare a fully built effect, e.g. one with a condition.
    ///
    /// The source is forced to this card.
    pub fn add_effect(&mut self, mut effect: PersistentEffect) -> EffectId {
        effect.source = self.uuid();
        self.effects.add(effect)
    }

    /// Restrict what this attachment can be placed on.
    pub fn attachment_restriction(&mut self, restrictions: impl IntoIterator<Item = CardMatcher>) {
        self.card.attachment_restriction(restrictions);
    }

    /// Printed "No attachments" style rules.
    pub fn allowed_attachments(&mut self, allowed: AllowedAttachments) {
        self.card.base.allowed_attachments = allowed;
    }

    /// The card dies instead of dropping to zero strength, while its text is active.
    pub fn burning(&mut self) -> EffectId {
        let source = self.uuid();
        self.effects.add(PersistentEffect::on_self(source, EffectKind::Burning))
    }
}
