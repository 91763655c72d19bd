//! Opaque card predicates.
//!
//! Matching rules (attachment restrictions, persistent effect targets) are
//! plain closures over a candidate card and a small context. The engine never
//! looks inside them; ability scripts build whatever predicate they need.

use std::sync::Arc;

use crate::cards::{CardType, DrawCard};
use crate::core::{EntityId, PlayerId};

/// Context handed to a matcher alongside the candidate card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchContext {
    /// Player on whose behalf the match is evaluated.
    pub player: Option<PlayerId>,
}

impl MatchContext {
    #[must_use]
    pub fn for_player(player: PlayerId) -> Self {
        Self {
            player: Some(player),
        }
    }
}

type Predicate = dyn Fn(&DrawCard, &MatchContext) -> bool + Send + Sync;

/// A shareable `(candidate, context) -> bool` predicate.
///
/// ```
/// use drawcard_engine::effects::CardMatcher;
/// use drawcard_engine::cards::CardType;
///
/// let characters = CardMatcher::card_type(CardType::Character);
/// let knights = CardMatcher::new(|card, _| card.base.has_trait("Knight"));
/// # let _ = (characters, knights);
/// ```
#[derive(Clone)]
pub struct CardMatcher(Arc<Predicate>);

impl CardMatcher {
    pub fn new(predicate: impl Fn(&DrawCard, &MatchContext) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Matches exactly one card.
    #[must_use]
    pub fn card(id: EntityId) -> Self {
        Self::new(move |card, _| card.uuid() == id)
    }

    /// Matches every card of a printed type.
    #[must_use]
    pub fn card_type(card_type: CardType) -> Self {
        Self::new(move |card, _| card.card_type() == card_type)
    }

    /// Matches cards controlled by the context player.
    #[must_use]
    pub fn controlled_by_context_player() -> Self {
        Self::new(|card, ctx| ctx.player == Some(card.controller()))
    }

    #[must_use]
    pub fn matches(&self, card: &DrawCard, ctx: &MatchContext) -> bool {
        (self.0)(card, ctx)
    }
}

impl std::fmt::Debug for CardMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardMatcher(..)")
    }
}
