//! Persistent effect engine.
//!
//! Effects are recomputed on demand. `reapply` walks every effect over every
//! card, applies it to cards that started matching, takes it back from cards
//! that stopped matching, and refreshes dynamic values. The only state kept
//! between passes is which cards each effect is currently applied to.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::effect::{EffectKind, PersistentEffect};
use super::matcher::MatchContext;
use crate::cards::{CardRegistry, DrawCard, Location};
use crate::core::{EntityId, PlayerId};
use crate::pipeline::{GameHooks, GameView};

/// Handle to a registered effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u32);

#[derive(Clone, Debug)]
struct ActiveEffect {
    id: EffectId,
    effect: PersistentEffect,
    /// Applied targets. The value is what `apply` recorded: the amount for
    /// dynamic strength, zero otherwise.
    targets: FxHashMap<EntityId, i32>,
}

/// Effect records held by a set of cards, captured with a card snapshot so a
/// restore puts card state and effect bookkeeping back together.
#[derive(Clone, Debug, Default)]
pub struct AppliedEffects {
    entries: Vec<AppliedEffect>,
}

#[derive(Clone, Debug)]
struct AppliedEffect {
    effect: EffectId,
    kind: EffectKind,
    card: EntityId,
    record: i32,
}

impl AppliedEffects {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effects captured on `card`.
    pub fn effects_on(&self, card: EntityId) -> impl Iterator<Item = EffectId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.card == card)
            .map(|entry| entry.effect)
    }
}

#[derive(Clone, Debug, Default)]
pub struct EffectEngine {
    effects: Vec<ActiveEffect>,
    next_id: u32,
}

impl EffectEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect. It takes hold on the next `reapply`.
    pub fn add(&mut self, effect: PersistentEffect) -> EffectId {
        self.next_id += 1;
        let id = EffectId(self.next_id);
        debug!(effect = id.0, source = %effect.source, kind = effect.kind.name(), "effect registered");
        self.effects.push(ActiveEffect {
            id,
            effect,
            targets: FxHashMap::default(),
        });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> impl Iterator<Item = (EffectId, &PersistentEffect)> {
        self.effects.iter().map(|active| (active.id, &active.effect))
    }

    /// Cards an effect is currently applied to, in id order.
    #[must_use]
    pub fn targets(&self, id: EffectId) -> Vec<EntityId> {
        let mut targets: Vec<_> = self
            .effects
            .iter()
            .find(|active| active.id == id)
            .map(|active| active.targets.keys().copied().collect())
            .unwrap_or_default();
        targets.sort_unstable();
        targets
    }

    /// Take an effect back from every card and forget it.
    pub fn remove<H: GameHooks>(&mut self, id: EffectId, cards: &mut CardRegistry, hooks: &mut H) -> bool {
        let Some(index) = self.effects.iter().position(|active| active.id == id) else {
            return false;
        };
        let mut active = self.effects.remove(index);
        active.unapply_all(cards, hooks);
        true
    }

    /// Remove every effect declared by `source`. Returns how many went.
    pub fn remove_for_source<H: GameHooks>(
        &mut self,
        source: EntityId,
        cards: &mut CardRegistry,
        hooks: &mut H,
    ) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(|active| active.effect.source == source);
        self.effects = kept;

        let count = removed.len();
        for mut active in removed {
            active.unapply_all(cards, hooks);
        }
        count
    }

    /// Records of every effect currently applied to one of `ids`.
    #[must_use]
    pub fn capture(&self, ids: &[EntityId]) -> AppliedEffects {
        let mut entries = Vec::new();
        for active in &self.effects {
            for &card in ids {
                if let Some(&record) = active.targets.get(&card) {
                    entries.push(AppliedEffect {
                        effect: active.id,
                        kind: active.effect.kind.clone(),
                        card,
                        record,
                    });
                }
            }
        }
        AppliedEffects { entries }
    }

    /// Swap in the records captured with cards that were just restored.
    ///
    /// The current records for `ids` describe state that no longer exists,
    /// so they are dropped in favour of `captured`. A captured effect that
    /// has since been removed is taken back from the card directly. Call
    /// `reapply` afterwards to catch up with everything else that changed.
    pub fn restore<H: GameHooks>(
        &mut self,
        captured: AppliedEffects,
        ids: &[EntityId],
        cards: &mut CardRegistry,
        hooks: &mut H,
    ) {
        for active in &mut self.effects {
            for id in ids {
                active.targets.remove(id);
            }
        }

        for entry in captured.entries {
            if let Some(active) = self.effects.iter_mut().find(|active| active.id == entry.effect) {
                active.targets.insert(entry.card, entry.record);
            } else if let Some(card) = cards.get_mut(entry.card) {
                debug!(effect = entry.effect.0, card = %entry.card, "captured effect no longer registered");
                unapply(&entry.kind, card, entry.record, hooks);
            }
        }
    }

    /// Bring every effect in line with the current state of the cards.
    ///
    /// Returns whether any card was touched. One effect can switch another
    /// on or off (blanking its source, say), so callers repeat until this
    /// returns `false`.
    pub fn reapply<H: GameHooks>(&mut self, cards: &mut CardRegistry, hooks: &mut H) -> bool {
        let ids = cards.ids();
        let mut changed = false;
        for active in &mut self.effects {
            changed |= active.reapply(&ids, cards, hooks);
        }
        changed
    }
}

impl ActiveEffect {
    /// Controller of the source while the effect is live.
    fn live_controller(&self, cards: &CardRegistry, view: &dyn GameView) -> Option<PlayerId> {
        let source = cards.get(self.effect.source)?;
        if source.location() != Location::PlayArea || source.is_blank() {
            return None;
        }
        if let Some(condition) = &self.effect.condition {
            if !condition(source, view) {
                return None;
            }
        }
        Some(source.controller())
    }

    fn reapply<H: GameHooks>(&mut self, ids: &[EntityId], cards: &mut CardRegistry, hooks: &mut H) -> bool {
        let view: &dyn GameView = &*hooks;
        let controller = self.live_controller(cards, view);
        let mut changed = false;

        for &id in ids {
            let matches = match (controller, cards.get(id)) {
                (Some(player), Some(card)) => {
                    card.location() == Location::PlayArea
                        && self.effect.matcher.matches(card, &MatchContext::for_player(player))
                }
                _ => false,
            };
            let Some(card) = cards.get_mut(id) else {
                continue;
            };

            match (matches, self.targets.get(&id).copied()) {
                (true, None) => {
                    if let Some(record) = apply(&self.effect.kind, card, hooks) {
                        debug!(effect = self.id.0, kind = self.effect.kind.name(), card = %id, "effect applied");
                        self.targets.insert(id, record);
                        changed = true;
                    }
                }
                (true, Some(record)) => {
                    if let Some(updated) = refresh(&self.effect.kind, card, record, hooks) {
                        self.targets.insert(id, updated);
                        changed = true;
                    }
                }
                (false, Some(record)) => {
                    unapply(&self.effect.kind, card, record, hooks);
                    debug!(effect = self.id.0, kind = self.effect.kind.name(), card = %id, "effect unapplied");
                    self.targets.remove(&id);
                    changed = true;
                }
                (false, None) => {}
            }
        }

        self.targets.retain(|id, _| cards.contains(*id));
        changed
    }

    fn unapply_all<H: GameHooks>(&mut self, cards: &mut CardRegistry, hooks: &mut H) {
        let mut targets: Vec<_> = self.targets.drain().collect();
        targets.sort_unstable();

        for (id, record) in targets {
            if let Some(card) = cards.get_mut(id) {
                unapply(&self.effect.kind, card, record, hooks);
            }
        }
    }
}

fn apply<H: GameHooks>(kind: &EffectKind, card: &mut DrawCard, hooks: &mut H) -> Option<i32> {
    let mut record = 0;

    match kind {
        EffectKind::ModifyStrength(amount) => card.modify_strength(*amount, true, hooks),
        EffectKind::DynamicStrength(value) => {
            let view: &dyn GameView = &*hooks;
            record = value(card, view);
            card.modify_strength(record, true, hooks);
        }
        EffectKind::SetStrength(value) => card.set_strength(Some(*value)),
        EffectKind::ModifyStrengthMultiplier(factor) => {
            if *factor == 0.0 {
                warn!(card = %card.uuid(), "zero strength multiplier ignored");
                return None;
            }
            card.modify_strength_multiplier(*factor, true, hooks);
        }
        EffectKind::ModifyDominanceStrength(amount) => card.modify_dominance_strength(*amount),
        EffectKind::AddIcon(icon) => card.add_icon(*icon),
        EffectKind::RemoveIcon(icon) => card.remove_icon(*icon),
        EffectKind::AddKeyword(keyword) => card.base.add_keyword(keyword),
        EffectKind::AddTrait(name) => card.base.add_trait(name),
        EffectKind::Blank => card.base.set_blank(),
        EffectKind::CannotBe(action) => card.base.add_restriction(*action),
        EffectKind::DoesNotContributeToDominance => card.contributes_to_dominance = false,
        EffectKind::Burning => card.is_burning = true,
    }

    Some(record)
}

/// Re-evaluate a dynamic effect on a card it already applies to.
fn refresh<H: GameHooks>(kind: &EffectKind, card: &mut DrawCard, record: i32, hooks: &mut H) -> Option<i32> {
    let EffectKind::DynamicStrength(value) = kind else {
        return None;
    };

    let view: &dyn GameView = &*hooks;
    let current = value(card, view);
    if current == record {
        return None;
    }
    card.modify_strength(current - record, true, hooks);
    Some(current)
}

fn unapply<H: GameHooks>(kind: &EffectKind, card: &mut DrawCard, record: i32, hooks: &mut H) {
    match kind {
        EffectKind::ModifyStrength(amount) => card.modify_strength(-amount, false, hooks),
        EffectKind::DynamicStrength(_) => card.modify_strength(-record, false, hooks),
        EffectKind::SetStrength(_) => card.set_strength(None),
        EffectKind::ModifyStrengthMultiplier(factor) => {
            card.modify_strength_multiplier(factor.recip(), false, hooks);
        }
        EffectKind::ModifyDominanceStrength(amount) => card.modify_dominance_strength(-amount),
        EffectKind::AddIcon(icon) => card.remove_icon(*icon),
        EffectKind::RemoveIcon(icon) => card.add_icon(*icon),
        EffectKind::AddKeyword(keyword) => card.base.remove_keyword(keyword),
        EffectKind::AddTrait(name) => card.base.remove_trait(name),
        EffectKind::Blank => card.base.clear_blank(),
        EffectKind::CannotBe(action) => card.base.remove_restriction(*action),
        EffectKind::DoesNotContributeToDominance => card.contributes_to_dominance = true,
        EffectKind::Burning => card.is_burning = false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardData, CardType, Icon};
    use crate::core::Phase;
    use crate::effects::CardMatcher;
    use crate::pipeline::{GameAction, GameEvent, Pipeline};

    struct Fixture {
        cards: CardRegistry,
        pipeline: Pipeline,
        engine: EffectEngine,
    }

    impl Fixture {
        fn new() -> Self {
            let mut pipeline = Pipeline::new(2);
            pipeline.set_phase_all(Phase::Challenge);
            Self {
                cards: CardRegistry::new(),
                pipeline,
                engine: EffectEngine::new(),
            }
        }

        fn in_play(&mut self, data: CardData, owner: u8) -> EntityId {
            let id = self.cards.create(Arc::new(data), PlayerId::new(owner));
            self.cards.get_mut(id).unwrap().base.move_to(Location::PlayArea, None);
            id
        }

        fn character(&mut self, strength: i32, owner: u8) -> EntityId {
            let data = CardData::new("00001", "Soldier", CardType::Character)
                .with_strength(strength)
                .with_icons(true, false, false);
            self.in_play(data, owner)
        }

        fn reapply(&mut self) {
            self.engine.reapply(&mut self.cards, &mut self.pipeline);
        }

        fn strength(&self, id: EntityId) -> i32 {
            self.cards.get(id).unwrap().strength(&self.pipeline)
        }
    }

    fn own_characters() -> CardMatcher {
        CardMatcher::new(|card, ctx| {
            card.card_type() == CardType::Character && ctx.player == Some(card.controller())
        })
    }

    #[test]
    fn test_modify_strength_follows_matches() {
        let mut fx = Fixture::new();
        let source = fx.in_play(CardData::new("00010", "Banner", CardType::Location), 0);
        let mine = fx.character(2, 0);
        let theirs = fx.character(2, 1);
        let id = fx.engine.add(PersistentEffect::new(source, own_characters(), EffectKind::ModifyStrength(1)));

        fx.reapply();
        fx.reapply();
        assert_eq!(fx.strength(mine), 3);
        assert_eq!(fx.strength(theirs), 2);
        assert_eq!(fx.engine.targets(id), vec![mine]);

        fx.cards.get_mut(mine).unwrap().base.move_to(Location::DiscardPile, None);
        fx.reapply();
        assert_eq!(fx.cards.get(mine).unwrap().strength_modifier(), 0);
        assert!(fx.engine.targets(id).is_empty());
        assert!(matches!(
            fx.pipeline.events().last(),
            Some(GameEvent::CardStrengthChanged { amount: -1, applying: false, .. })
        ));
    }

    #[test]
    fn test_source_leaving_play_suspends_effect() {
        let mut fx = Fixture::new();
        let source = fx.in_play(CardData::new("00010", "Banner", CardType::Location), 0);
        let mine = fx.character(2, 0);
        fx.engine.add(PersistentEffect::new(source, own_characters(), EffectKind::ModifyStrength(2)));
        fx.reapply();
        assert_eq!(fx.strength(mine), 4);

        fx.cards.get_mut(source).unwrap().base.move_to(Location::Hand, None);
        fx.reapply();
        assert_eq!(fx.strength(mine), 2);

        fx.cards.get_mut(source).unwrap().base.move_to(Location::PlayArea, None);
        fx.reapply();
        assert_eq!(fx.strength(mine), 4);
    }

    #[test]
    fn test_blank_source_suspends_effect() {
        let mut fx = Fixture::new();
        let source = fx.character(1, 0);
        let other = fx.character(2, 0);
        fx.engine.add(PersistentEffect::new(source, CardMatcher::card(other), EffectKind::AddIcon(Icon::Power)));
        fx.reapply();
        assert!(fx.cards.get(other).unwrap().has_icon(Icon::Power));

        fx.cards.get_mut(source).unwrap().base.set_blank();
        fx.reapply();
        assert!(!fx.cards.get(other).unwrap().has_icon(Icon::Power));
    }

    #[test]
    fn test_dynamic_strength_tracks_value() {
        let mut fx = Fixture::new();
        let card = fx.character(4, 0);
        fx.engine.add(PersistentEffect::on_self(
            card,
            EffectKind::dynamic_strength(|card, view| view.gold(card.controller()) as i32),
        ));

        fx.pipeline.set_gold(PlayerId::new(0), 3);
        fx.reapply();
        assert_eq!(fx.strength(card), 7);

        fx.pipeline.set_gold(PlayerId::new(0), 1);
        fx.reapply();
        assert_eq!(fx.strength(card), 5);
        assert_eq!(fx.cards.get(card).unwrap().strength_modifier(), 1);
    }

    #[test]
    fn test_remove_icon_on_missing_icon_leaves_no_trace() {
        let mut fx = Fixture::new();
        let source = fx.character(1, 0);
        let target = fx.character(1, 0);
        let id = fx.engine.add(PersistentEffect::new(
            source,
            CardMatcher::card(target),
            EffectKind::RemoveIcon(Icon::Intrigue),
        ));
        fx.reapply();

        assert!(fx.engine.remove(id, &mut fx.cards, &mut fx.pipeline));
        assert!(!fx.cards.get(target).unwrap().has_icon(Icon::Intrigue));
        assert!(fx.cards.get(target).unwrap().icons_added().is_empty());
    }

    #[test]
    fn test_layered_icon_effects_end_in_either_order() {
        for adder_ends_first in [true, false] {
            let mut fx = Fixture::new();
            let blank = CardData::new("00002", "Squire", CardType::Character).with_icons(false, false, false);
            let target = fx.in_play(blank, 0);
            let adder = fx.character(1, 0);
            let remover = fx.character(1, 0);
            let add = fx.engine.add(PersistentEffect::new(
                adder,
                CardMatcher::card(target),
                EffectKind::AddIcon(Icon::Military),
            ));
            let remove = fx.engine.add(PersistentEffect::new(
                remover,
                CardMatcher::card(target),
                EffectKind::RemoveIcon(Icon::Military),
            ));
            fx.reapply();
            assert!(!fx.cards.get(target).unwrap().has_icon(Icon::Military));

            let order = if adder_ends_first { [add, remove] } else { [remove, add] };
            for id in order {
                fx.engine.remove(id, &mut fx.cards, &mut fx.pipeline);
            }

            let card = fx.cards.get(target).unwrap();
            assert!(!card.has_icon(Icon::Military), "adder_ends_first = {adder_ends_first}");
            assert!(card.icons_added().is_empty());
            assert!(card.icons_removed().is_empty());
        }
    }

    #[test]
    fn test_zero_multiplier_is_ignored() {
        let mut fx = Fixture::new();
        let card = fx.character(3, 0);
        let id = fx.engine.add(PersistentEffect::on_self(card, EffectKind::ModifyStrengthMultiplier(0.0)));
        fx.reapply();

        assert_eq!(fx.strength(card), 3);
        assert!(fx.engine.targets(id).is_empty());
    }

    #[test]
    fn test_multiplier_round_trip() {
        let mut fx = Fixture::new();
        let card = fx.character(3, 0);
        let id = fx.engine.add(PersistentEffect::on_self(card, EffectKind::ModifyStrengthMultiplier(2.0)));
        fx.reapply();
        assert_eq!(fx.strength(card), 6);

        fx.engine.remove(id, &mut fx.cards, &mut fx.pipeline);
        assert_eq!(fx.strength(card), 3);
    }

    #[test]
    fn test_remove_for_source() {
        let mut fx = Fixture::new();
        let source = fx.character(1, 0);
        let target = fx.character(1, 0);
        fx.engine.add(PersistentEffect::new(source, CardMatcher::card(target), EffectKind::CannotBe(GameAction::Kill)));
        fx.engine.add(PersistentEffect::new(source, CardMatcher::card(target), EffectKind::SetStrength(9)));
        fx.reapply();
        assert!(!fx.cards.get(target).unwrap().can_be_killed());
        assert_eq!(fx.strength(target), 9);

        assert_eq!(fx.engine.remove_for_source(source, &mut fx.cards, &mut fx.pipeline), 2);
        assert!(fx.engine.is_empty());
        assert!(fx.cards.get(target).unwrap().can_be_killed());
        assert_eq!(fx.strength(target), 1);
    }

    #[test]
    fn test_restore_swaps_in_captured_records() {
        let mut fx = Fixture::new();
        let source = fx.in_play(CardData::new("00010", "Banner", CardType::Location), 0);
        let knight = fx.character(2, 0);
        let before = fx.cards.get(knight).unwrap().clone();
        let captured = fx.engine.capture(&[knight]);
        assert!(captured.is_empty());

        let id = fx.engine.add(PersistentEffect::new(source, CardMatcher::card(knight), EffectKind::ModifyStrength(3)));
        fx.reapply();
        assert_eq!(fx.strength(knight), 5);

        fx.cards.replace(before);
        fx.engine.restore(captured, &[knight], &mut fx.cards, &mut fx.pipeline);
        assert!(fx.engine.targets(id).is_empty());
        fx.reapply();
        assert_eq!(fx.strength(knight), 5);

        fx.engine.remove(id, &mut fx.cards, &mut fx.pipeline);
        assert_eq!(fx.cards.get(knight).unwrap().strength_modifier(), 0);
    }

    #[test]
    fn test_restore_takes_back_effects_removed_since_capture() {
        let mut fx = Fixture::new();
        let source = fx.in_play(CardData::new("00010", "Banner", CardType::Location), 0);
        let knight = fx.character(2, 0);
        let id = fx.engine.add(PersistentEffect::new(source, CardMatcher::card(knight), EffectKind::ModifyStrength(3)));
        fx.reapply();

        let before = fx.cards.get(knight).unwrap().clone();
        let captured = fx.engine.capture(&[knight]);
        assert_eq!(captured.effects_on(knight).collect::<Vec<_>>(), vec![id]);

        fx.engine.remove(id, &mut fx.cards, &mut fx.pipeline);
        fx.cards.replace(before);
        assert_eq!(fx.strength(knight), 5);

        fx.engine.restore(captured, &[knight], &mut fx.cards, &mut fx.pipeline);
        fx.reapply();
        assert_eq!(fx.strength(knight), 2);
        assert_eq!(fx.cards.get(knight).unwrap().strength_modifier(), 0);
    }

    #[test]
    fn test_condition_gates_effect() {
        let mut fx = Fixture::new();
        let card = fx.character(2, 0);
        fx.engine.add(
            PersistentEffect::on_self(card, EffectKind::Burning)
                .when(|source, view| view.gold(source.controller()) == 0),
        );

        fx.reapply();
        assert!(fx.cards.get(card).unwrap().is_burning);

        fx.pipeline.set_gold(PlayerId::new(0), 5);
        fx.reapply();
        assert!(!fx.cards.get(card).unwrap().is_burning);
    }
}
