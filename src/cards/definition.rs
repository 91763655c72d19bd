//! Printed card data.
//!
//! `CardData` holds what is printed on a card: name, type, faction, traits,
//! keywords, cost, strength and challenge icons. It is loaded once from the
//! card database and shared (via `Arc`) by every entity and snapshot of that
//! card. Everything that effects can change lives on `DrawCard` instead.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Character,
    Attachment,
    Location,
    Event,
    Plot,
    Agenda,
    Title,
}

/// Where a card currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    #[default]
    DrawDeck,
    Hand,
    PlayArea,
    DiscardPile,
    DeadPile,
    /// Stacked beneath another card as a duplicate.
    Duplicate,
    BeingPlayed,
    OutOfGame,
}

/// Immutable printed data for a card.
///
/// ```
/// use drawcard_engine::cards::{CardData, CardType};
///
/// let data = CardData::new("01090", "Tywin Lannister", CardType::Character)
///     .with_strength(4)
///     .with_icons(true, true, true)
///     .with_trait("Lord");
///
/// assert_eq!(data.strength, 4);
/// assert!(data.is_power);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    /// Card database code (e.g. "01090").
    pub code: String,

    pub name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub faction: String,

    #[serde(default)]
    pub traits: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub cost: u32,

    #[serde(default)]
    pub strength: i32,

    #[serde(default)]
    pub is_military: bool,

    #[serde(default)]
    pub is_intrigue: bool,

    #[serde(default)]
    pub is_power: bool,

    #[serde(default)]
    pub is_unique: bool,

    /// Gold provided during taxation, if any.
    #[serde(default)]
    pub income: Option<u32>,

    /// Ambush (X) cost, if the card has the keyword.
    #[serde(default)]
    pub ambush_cost: Option<u32>,

    /// Bestow (X) maximum, if the card has the keyword.
    #[serde(default)]
    pub bestow_max: Option<u32>,
}

impl CardData {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            card_type,
            faction: String::new(),
            traits: Vec::new(),
            keywords: Vec::new(),
            cost: 0,
            strength: 0,
            is_military: false,
            is_intrigue: false,
            is_power: false,
            is_unique: false,
            income: None,
            ambush_cost: None,
            bestow_max: None,
        }
    }

    /// Parse card data from the JSON card database format.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = faction.into();
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    /// Set printed icons: military, intrigue, power.
    #[must_use]
    pub fn with_icons(mut self, military: bool, intrigue: bool, power: bool) -> Self {
        self.is_military = military;
        self.is_intrigue = intrigue;
        self.is_power = power;
        self
    }

    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    #[must_use]
    pub fn with_income(mut self, income: u32) -> Self {
        self.income = Some(income);
        self
    }

    #[must_use]
    pub fn with_ambush(mut self, cost: u32) -> Self {
        self.ambush_cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_bestow(mut self, max: u32) -> Self {
        self.bestow_max = Some(max);
        self
    }

    /// Case-insensitive printed keyword check.
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }

    /// Case-insensitive printed trait check.
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(name))
    }
}
