//! Base card identity.
//!
//! `BaseCard` is the part of a card every card type shares: who owns and
//! controls it, where it is, what it is printed as, and the text-level
//! modifiers effects can layer on (blanking, gained keywords and traits,
//! tokens, action restrictions). `DrawCard` builds on top of it.

use std::sync::Arc;

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardData, CardType, Location};
use crate::core::{EntityId, PlayerId};
use crate::pipeline::GameAction;

/// Which attachments a card accepts.
///
/// Most cards accept anything. Some are printed "No attachments" or
/// "No attachments except Weapon".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedAttachments {
    #[default]
    Any,
    None,
    Trait(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BaseCard {
    pub uuid: EntityId,

    /// Printed data, shared with every snapshot of this card.
    pub printed: Arc<CardData>,

    /// Player who brought the card. Never changes.
    pub owner: PlayerId,

    /// Player currently controlling the card.
    pub controller: PlayerId,

    pub location: Location,

    /// Card this one is attached to or stacked under.
    pub parent: Option<EntityId>,

    pub facedown: bool,

    /// Entered play this round.
    pub new: bool,

    pub allowed_attachments: AllowedAttachments,

    blank_count: u32,
    keywords: ImHashMap<String, u32>,
    traits: ImHashMap<String, u32>,
    factions: ImHashMap<String, u32>,
    tokens: ImHashMap<String, u32>,
    restrictions: ImHashMap<GameAction, u32>,
}

fn bump(map: &mut ImHashMap<String, u32>, key: &str) {
    *map.entry(key.to_ascii_lowercase()).or_insert(0) += 1;
}

fn drop_one(map: &mut ImHashMap<String, u32>, key: &str) {
    let key = key.to_ascii_lowercase();
    if let Some(count) = map.get_mut(&key) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            map.remove(&key);
        }
    }
}

impl BaseCard {
    #[must_use]
    pub fn new(uuid: EntityId, printed: Arc<CardData>, owner: PlayerId) -> Self {
        Self {
            uuid,
            printed,
            owner,
            controller: owner,
            location: Location::default(),
            parent: None,
            facedown: false,
            new: false,
            allowed_attachments: AllowedAttachments::default(),
            blank_count: 0,
            keywords: ImHashMap::new(),
            traits: ImHashMap::new(),
            factions: ImHashMap::new(),
            tokens: ImHashMap::new(),
            restrictions: ImHashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.printed.name
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.printed.code
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.printed.card_type
    }

    // === Blanking ===

    /// A blank card has no printed text box.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.blank_count > 0
    }

    pub fn set_blank(&mut self) {
        self.blank_count += 1;
    }

    pub fn clear_blank(&mut self) {
        self.blank_count = self.blank_count.saturating_sub(1);
    }

    // === Keywords, traits, factions ===

    /// Keyword check. Printed keywords are suppressed while blank; gained
    /// keywords are not.
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains_key(&keyword.to_ascii_lowercase())
            || (!self.is_blank() && self.printed.has_keyword(keyword))
    }

    #[must_use]
    pub fn has_printed_keyword(&self, keyword: &str) -> bool {
        self.printed.has_keyword(keyword)
    }

    pub fn add_keyword(&mut self, keyword: &str) {
        bump(&mut self.keywords, keyword);
    }

    pub fn remove_keyword(&mut self, keyword: &str) {
        drop_one(&mut self.keywords, keyword);
    }

    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains_key(&name.to_ascii_lowercase()) || self.printed.has_trait(name)
    }

    pub fn add_trait(&mut self, name: &str) {
        bump(&mut self.traits, name);
    }

    pub fn remove_trait(&mut self, name: &str) {
        drop_one(&mut self.traits, name);
    }

    #[must_use]
    pub fn is_faction(&self, faction: &str) -> bool {
        self.printed.faction.eq_ignore_ascii_case(faction)
            || self.factions.contains_key(&faction.to_ascii_lowercase())
    }

    pub fn add_faction(&mut self, faction: &str) {
        bump(&mut self.factions, faction);
    }

    pub fn remove_faction(&mut self, faction: &str) {
        drop_one(&mut self.factions, faction);
    }

    // === Tokens ===

    #[must_use]
    pub fn tokens(&self, token: &str) -> u32 {
        self.tokens.get(token).copied().unwrap_or(0)
    }

    pub fn add_token(&mut self, token: &str, amount: u32) {
        *self.tokens.entry(token.to_string()).or_insert(0) += amount;
    }

    pub fn remove_token(&mut self, token: &str, amount: u32) {
        if let Some(count) = self.tokens.get_mut(token) {
            *count = count.saturating_sub(amount);
            if *count == 0 {
                self.tokens.remove(token);
            }
        }
    }

    pub(crate) fn token_map(&self) -> &ImHashMap<String, u32> {
        &self.tokens
    }

    // === Action restrictions ===

    /// Whether an effect currently forbids `action` on this card.
    #[must_use]
    pub fn allow_game_action(&self, action: GameAction) -> bool {
        !self.restrictions.contains_key(&action)
    }

    pub fn add_restriction(&mut self, action: GameAction) {
        *self.restrictions.entry(action).or_insert(0) += 1;
    }

    pub fn remove_restriction(&mut self, action: GameAction) {
        if let Some(count) = self.restrictions.get_mut(&action) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.restrictions.remove(&action);
            }
        }
    }

    // === Movement ===

    pub fn move_to(&mut self, location: Location, parent: Option<EntityId>) {
        self.location = location;
        self.parent = parent;
    }

    /// Reset the state that does not survive leaving play.
    pub fn leaves_play(&mut self) {
        self.parent = None;
        self.facedown = false;
        self.tokens = ImHashMap::new();
    }
}
