//! Point-in-time copies of a card and everything hanging off it.
//!
//! Cloning a `DrawCard` is cheap: printed data is shared through `Arc` and
//! the collections are `im` persistent structures, so the copy shares memory
//! with the original until either side is mutated.

use super::instance::DrawCard;
use super::registry::CardRegistry;
use crate::core::{EntityId, Result};

/// A card, its attachments and its dupes, captured together.
#[derive(Clone, Debug)]
pub struct CardSnapshot {
    pub card: DrawCard,
    pub attachments: Vec<CardSnapshot>,
    pub dupes: Vec<CardSnapshot>,
}

impl DrawCard {
    /// Capture this card and, recursively, its attachments and dupes.
    ///
    /// Fails if a child id no longer resolves in `cards`.
    pub fn create_snapshot(&self, cards: &CardRegistry) -> Result<CardSnapshot> {
        let attachments = self
            .attachments
            .iter()
            .map(|&id| cards.require(id)?.create_snapshot(cards))
            .collect::<Result<Vec<_>>>()?;

        let dupes = self
            .dupes()
            .map(|id| cards.require(id)?.create_snapshot(cards))
            .collect::<Result<Vec<_>>>()?;

        Ok(CardSnapshot {
            card: self.clone(),
            attachments,
            dupes,
        })
    }
}

impl CardSnapshot {
    #[must_use]
    pub fn uuid(&self) -> EntityId {
        self.card.uuid()
    }

    /// Number of entities captured, including this one.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        1 + self
            .attachments
            .iter()
            .chain(&self.dupes)
            .map(CardSnapshot::entity_count)
            .sum::<usize>()
    }

    /// Ids of every captured entity, host first.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids = vec![self.uuid()];
        for child in self.attachments.iter().chain(&self.dupes) {
            ids.extend(child.ids());
        }
        ids
    }

    /// Flatten into entities, host first.
    #[must_use]
    pub fn into_cards(self) -> Vec<DrawCard> {
        let mut cards = vec![self.card];
        for child in self.attachments.into_iter().chain(self.dupes) {
            cards.extend(child.into_cards());
        }
        cards
    }
}
