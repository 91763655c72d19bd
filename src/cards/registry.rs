//! Card registry.
//!
//! The `CardRegistry` is the sole owner of every `DrawCard` in a game.
//! Cards refer to each other by `EntityId`; the registry resolves those ids.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardData, Location};
use super::instance::DrawCard;
use crate::core::{CardError, EntityId, EntityIdAllocator, PlayerId, Result};

/// Owner of all card entities in a game.
///
/// ```
/// use std::sync::Arc;
/// use drawcard_engine::cards::{CardData, CardRegistry, CardType};
/// use drawcard_engine::core::PlayerId;
///
/// let mut registry = CardRegistry::new();
/// let data = Arc::new(CardData::new("01090", "Tywin Lannister", CardType::Character));
///
/// let id = registry.create(data, PlayerId::new(0));
/// assert_eq!(registry.get(id).unwrap().name(), "Tywin Lannister");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<EntityId, DrawCard>,
    ids: EntityIdAllocator,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a new card entity and return its id.
    pub fn create(&mut self, printed: Arc<CardData>, owner: PlayerId) -> EntityId {
        let id = self.ids.next_id();
        self.cards.insert(id, DrawCard::new(id, printed, owner));
        id
    }

    /// Add an existing entity. Fails if the id is taken.
    pub fn insert(&mut self, card: DrawCard) -> Result<EntityId> {
        let id = card.uuid();
        if self.cards.contains_key(&id) {
            return Err(CardError::AlreadyRegistered(id));
        }
        self.ids.reserve(id);
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Add or overwrite an entity, returning the previous one.
    pub fn replace(&mut self, card: DrawCard) -> Option<DrawCard> {
        let id = card.uuid();
        self.ids.reserve(id);
        self.cards.insert(id, card)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<DrawCard> {
        self.cards.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&DrawCard> {
        self.cards.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut DrawCard> {
        self.cards.get_mut(&id)
    }

    /// Like `get`, but a missing card is an error.
    pub fn require(&self, id: EntityId) -> Result<&DrawCard> {
        self.cards.get(&id).ok_or(CardError::UnknownCard(id))
    }

    pub fn require_mut(&mut self, id: EntityId) -> Result<&mut DrawCard> {
        self.cards.get_mut(&id).ok_or(CardError::UnknownCard(id))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCard> {
        self.cards.values()
    }

    /// All ids in ascending order, for deterministic passes over the table.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Cards in the play area controlled by `player`.
    pub fn in_play_for(&self, player: PlayerId) -> impl Iterator<Item = &DrawCard> {
        self.cards
            .values()
            .filter(move |c| c.location() == Location::PlayArea && c.controller() == player)
    }

    /// Run `f` with mutable access to two different cards.
    ///
    /// `second` is taken out of the registry for the duration of the call.
    pub fn with_pair<R>(
        &mut self,
        first: EntityId,
        second: EntityId,
        f: impl FnOnce(&mut DrawCard, &mut DrawCard) -> R,
    ) -> Result<R> {
        if first == second {
            return Err(CardError::UnknownCard(second));
        }
        let mut other = self.cards.remove(&second).ok_or(CardError::UnknownCard(second))?;

        let result = match self.cards.get_mut(&first) {
            Some(card) => Ok(f(card, &mut other)),
            None => Err(CardError::UnknownCard(first)),
        };

        self.cards.insert(second, other);
        result
    }
}
