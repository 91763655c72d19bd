//! Persistent effect definitions.
//!
//! A persistent effect is a `(source, matcher, kind)` triple. It is not a
//! one-shot mutation: the `EffectEngine` keeps evaluating it and applies or
//! unapplies the kind as cards start and stop matching.

use std::sync::Arc;

use super::matcher::CardMatcher;
use crate::cards::{DrawCard, Icon};
use crate::core::EntityId;
use crate::pipeline::{GameAction, GameView};

/// Value recomputed on every reapply, e.g. "strength equal to your gold".
///
/// Called with the affected card.
pub type DynamicValue = Arc<dyn Fn(&DrawCard, &dyn GameView) -> i32 + Send + Sync>;

/// Extra gate evaluated against the source card.
pub type EffectCondition = Arc<dyn Fn(&DrawCard, &dyn GameView) -> bool + Send + Sync>;

/// What a persistent effect does to each matching card.
///
/// Every kind has an exact inverse so the engine can take it back when the
/// card stops matching.
#[derive(Clone)]
pub enum EffectKind {
    // === Strength ===

    /// Add to the strength modifier.
    ModifyStrength(i32),

    /// Add a recomputed amount to the strength modifier.
    DynamicStrength(DynamicValue),

    /// Override strength outright.
    SetStrength(i32),

    /// Multiply strength. A zero factor is ignored since it cannot be undone.
    ModifyStrengthMultiplier(f64),

    ModifyDominanceStrength(i32),

    // === Text ===

    AddIcon(Icon),
    RemoveIcon(Icon),
    AddKeyword(String),
    AddTrait(String),
    Blank,

    // === Rules ===

    /// Forbid an action on the card ("cannot be killed", ...).
    CannotBe(GameAction),
    DoesNotContributeToDominance,
    Burning,
}

impl EffectKind {
    pub fn dynamic_strength(value: impl Fn(&DrawCard, &dyn GameView) -> i32 + Send + Sync + 'static) -> Self {
        EffectKind::DynamicStrength(Arc::new(value))
    }

    /// Dynamic kinds are re-evaluated on cards they already apply to.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, EffectKind::DynamicStrength(_))
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::ModifyStrength(_) => "modifyStrength",
            EffectKind::DynamicStrength(_) => "dynamicStrength",
            EffectKind::SetStrength(_) => "setStrength",
            EffectKind::ModifyStrengthMultiplier(_) => "modifyStrengthMultiplier",
            EffectKind::ModifyDominanceStrength(_) => "modifyDominanceStrength",
            EffectKind::AddIcon(_) => "addIcon",
            EffectKind::RemoveIcon(_) => "removeIcon",
            EffectKind::AddKeyword(_) => "addKeyword",
            EffectKind::AddTrait(_) => "addTrait",
            EffectKind::Blank => "blank",
            EffectKind::CannotBe(_) => "cannotBe",
            EffectKind::DoesNotContributeToDominance => "doesNotContributeToDominance",
            EffectKind::Burning => "burning",
        }
    }
}

impl std::fmt::Debug for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::ModifyStrength(n) => f.debug_tuple("ModifyStrength").field(n).finish(),
            EffectKind::DynamicStrength(_) => f.write_str("DynamicStrength(..)"),
            EffectKind::SetStrength(n) => f.debug_tuple("SetStrength").field(n).finish(),
            EffectKind::ModifyStrengthMultiplier(x) => f.debug_tuple("ModifyStrengthMultiplier").field(x).finish(),
            EffectKind::ModifyDominanceStrength(n) => f.debug_tuple("ModifyDominanceStrength").field(n).finish(),
            EffectKind::AddIcon(icon) => f.debug_tuple("AddIcon").field(icon).finish(),
            EffectKind::RemoveIcon(icon) => f.debug_tuple("RemoveIcon").field(icon).finish(),
            EffectKind::AddKeyword(k) => f.debug_tuple("AddKeyword").field(k).finish(),
            EffectKind::AddTrait(t) => f.debug_tuple("AddTrait").field(t).finish(),
            EffectKind::Blank => f.write_str("Blank"),
            EffectKind::CannotBe(action) => f.debug_tuple("CannotBe").field(action).finish(),
            EffectKind::DoesNotContributeToDominance => f.write_str("DoesNotContributeToDominance"),
            EffectKind::Burning => f.write_str("Burning"),
        }
    }
}

/// A continuously evaluated effect declared by a card.
///
/// It is live while its source is in play, not blank, and its condition (if
/// any) holds. Targets are matched with the source controller as the context
/// player.
#[derive(Clone)]
pub struct PersistentEffect {
    pub source: EntityId,
    pub matcher: CardMatcher,
    pub kind: EffectKind,
    pub condition: Option<EffectCondition>,
}

impl PersistentEffect {
    #[must_use]
    pub fn new(source: EntityId, matcher: CardMatcher, kind: EffectKind) -> Self {
        Self {
            source,
            matcher,
            kind,
            condition: None,
        }
    }

    /// Effect on the source card itself.
    #[must_use]
    pub fn on_self(source: EntityId, kind: EffectKind) -> Self {
        Self::new(source, CardMatcher::card(source), kind)
    }

    /// Only active while `condition` holds for the source.
    #[must_use]
    pub fn when(mut self, condition: impl Fn(&DrawCard, &dyn GameView) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }
}

impl std::fmt::Debug for PersistentEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentEffect")
            .field("source", &self.source)
            .field("kind", &self.kind)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}
