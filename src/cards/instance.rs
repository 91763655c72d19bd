//! The draw card entity.
//!
//! `DrawCard` is a card that can be in play: characters, attachments,
//! locations and events. It layers the dynamic state (strength modifiers,
//! power, icons, kneeling, challenge flags) on top of `BaseCard` and keeps
//! id-based relations to the cards attached to it and stacked under it.
//!
//! The behaviour is split by concern:
//! - `strength`: attribute engine, power and icons
//! - `relations`: attachments and duplicates
//! - `challenge`: lifecycle, challenge eligibility and stealth
//! - `snapshot` / `summary`: copies for history and views for clients
//!
//! ## Ownership
//!
//! Attachments and dupes are stored as `EntityId`s. The `CardRegistry` owns
//! every entity; a card only records the relation.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::base::BaseCard;
use super::challenge::ChallengeOptions;
use super::definition::{CardData, CardType, Location};
use super::icons::Icons;
use super::relations::Duplicate;
use crate::core::{EntityId, PlayerId};
use crate::effects::CardMatcher;

/// A playable card and its derived state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawCard {
    pub base: BaseCard,

    pub icons: Icons,

    pub(crate) power: u32,

    /// Strength change held back while burn resolves a kill.
    pub(crate) burn_value: i32,
    pub(crate) strength_modifier: i32,
    pub(crate) strength_multiplier: f64,
    pub(crate) strength_set: Option<i32>,
    pub(crate) dominance_strength_modifier: i32,

    pub contributes_to_dominance: bool,

    /// Dies instead of accepting a strength reduction to zero or below.
    pub is_burning: bool,

    pub kneeled: bool,
    pub in_challenge: bool,
    pub in_danger: bool,
    pub saved: bool,
    pub was_ambush: bool,

    /// Bypassed by an opponent's stealth card this challenge.
    pub stealth: bool,
    pub stealth_target: Option<EntityId>,
    pub stealth_limit: u32,

    pub min_cost: u32,
    pub event_placement_location: Location,
    pub challenge_options: ChallengeOptions,

    pub(crate) attachments: Vector<EntityId>,
    pub(crate) dupes: Vector<Duplicate>,

    /// `None` until an ability declares restrictions.
    #[serde(skip)]
    pub(crate) attachment_restrictions: Option<Vec<CardMatcher>>,
}

impl DrawCard {
    #[must_use]
    pub fn new(uuid: EntityId, printed: Arc<CardData>, owner: PlayerId) -> Self {
        let icons = Icons::from_printed(printed.is_military, printed.is_intrigue, printed.is_power);

        Self {
            base: BaseCard::new(uuid, printed, owner),
            icons,
            power: 0,
            burn_value: 0,
            strength_modifier: 0,
            strength_multiplier: 1.0,
            strength_set: None,
            dominance_strength_modifier: 0,
            contributes_to_dominance: true,
            is_burning: false,
            kneeled: false,
            in_challenge: false,
            in_danger: false,
            saved: false,
            was_ambush: false,
            stealth: false,
            stealth_target: None,
            stealth_limit: 1,
            min_cost: 0,
            event_placement_location: Location::DiscardPile,
            challenge_options: ChallengeOptions::default(),
            attachments: Vector::new(),
            dupes: Vector::new(),
            attachment_restrictions: None,
        }
    }

    // === Identity ===

    #[must_use]
    pub fn uuid(&self) -> EntityId {
        self.base.uuid
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.base.name()
    }

    #[must_use]
    pub fn code(&self) -> &str {
        self.base.code()
    }

    #[must_use]
    pub fn printed(&self) -> &Arc<CardData> {
        &self.base.printed
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.base.card_type()
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.base.owner
    }

    #[must_use]
    pub fn controller(&self) -> PlayerId {
        self.base.controller
    }

    /// Hand control to another player (the card is "taken over").
    pub fn set_controller(&mut self, controller: PlayerId) {
        self.base.controller = controller;
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.base.location
    }

    #[must_use]
    pub fn parent(&self) -> Option<EntityId> {
        self.base.parent
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.base.is_blank()
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.base.has_keyword(keyword)
    }

    // === Keywords ===

    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.has_keyword("limited")
    }

    #[must_use]
    pub fn is_stealth(&self) -> bool {
        self.has_keyword("stealth")
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.has_keyword("terminal")
    }

    #[must_use]
    pub fn is_renown(&self) -> bool {
        self.has_keyword("renown")
    }

    #[must_use]
    pub fn is_ambush(&self) -> bool {
        self.base.printed.ambush_cost.is_some()
    }

    #[must_use]
    pub fn is_bestow(&self) -> bool {
        !self.is_blank() && self.base.printed.bestow_max.is_some()
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.base.printed.is_unique
    }

    // === Costs ===

    #[must_use]
    pub fn printed_cost(&self) -> u32 {
        self.base.printed.cost
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.printed_cost()
    }

    #[must_use]
    pub fn min_cost(&self) -> u32 {
        self.min_cost
    }

    #[must_use]
    pub fn ambush_cost(&self) -> Option<u32> {
        self.base.printed.ambush_cost
    }

    /// Gold this card provides, unless its text is blanked.
    #[must_use]
    pub fn income(&self) -> Option<u32> {
        if self.is_blank() {
            None
        } else {
            self.base.printed.income
        }
    }

    // === Relations ===

    #[must_use]
    pub fn attachments(&self) -> &Vector<EntityId> {
        &self.attachments
    }

    /// Duplicates stacked under this card, oldest first.
    pub fn dupes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.dupes.iter().map(|d| d.uuid)
    }

    #[must_use]
    pub fn dupe_count(&self) -> usize {
        self.dupes.len()
    }
}
