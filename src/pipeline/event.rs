//! Events, game actions and kill options.

use serde::{Deserialize, Serialize};

use crate::cards::Icon;
use crate::core::{EntityId, PlayerId};

/// Named game actions.
///
/// Effects can forbid an action on a specific card (see
/// `BaseCard::allow_game_action`), and reactive abilities can cancel an
/// action routed through `GameHooks::apply_game_action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    GainPower,
    Kill,
    Save,
    DeclareAsAttacker,
    DeclareAsDefender,
    ParticipateInChallenge,
    BypassByStealth,
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameAction::GainPower => "gainPower",
            GameAction::Kill => "kill",
            GameAction::Save => "save",
            GameAction::DeclareAsAttacker => "declareAsAttacker",
            GameAction::DeclareAsDefender => "declareAsDefender",
            GameAction::ParticipateInChallenge => "participateInChallenge",
            GameAction::BypassByStealth => "bypassByStealth",
        };
        f.write_str(name)
    }
}

/// Options for the kill routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillOptions {
    /// Whether a save (e.g. discarding a duplicate) may prevent the kill.
    pub allow_save: bool,
    /// The kill replaces a strength reduction to zero or below.
    pub is_burn: bool,
}

impl Default for KillOptions {
    fn default() -> Self {
        Self {
            allow_save: true,
            is_burn: false,
        }
    }
}

impl KillOptions {
    /// Options used when burn kills a card: no saves.
    #[must_use]
    pub const fn burn() -> Self {
        Self {
            allow_save: false,
            is_burn: true,
        }
    }
}

/// Notifications raised while cards change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum GameEvent {
    /// Strength changed by `amount`. `applying` is false when an effect is
    /// being removed.
    #[serde(rename = "onCardStrengthChanged")]
    CardStrengthChanged {
        card: EntityId,
        amount: i32,
        applying: bool,
    },

    /// Power actually gained, after flooring.
    #[serde(rename = "onCardPowerGained")]
    CardPowerGained { card: EntityId, power: u32 },

    #[serde(rename = "onCharacterKilled")]
    CharacterKilled { card: EntityId, is_burn: bool },

    /// A duplicate was discarded to save the card.
    #[serde(rename = "onCardSaved")]
    CardSaved { card: EntityId, dupe: EntityId },

    #[serde(rename = "onCardLeftPlay")]
    CardLeftPlay { card: EntityId },

    #[serde(rename = "onCardAttached")]
    CardAttached { attachment: EntityId, parent: EntityId },

    #[serde(rename = "onDupeAdded")]
    DupeAdded { card: EntityId, dupe: EntityId },

    #[serde(rename = "onBypassedByStealth")]
    BypassedByStealth { source: EntityId, target: EntityId },

    #[serde(rename = "onCardDeclared")]
    CardDeclared { card: EntityId, challenge: Icon, attacking: bool },

    /// An action was cancelled before its effect ran.
    #[serde(rename = "onActionCancelled")]
    ActionCancelled { action: GameAction, card: EntityId },

    #[serde(rename = "onPlayerWon")]
    PlayerWon { player: PlayerId, power: u32 },
}

impl GameEvent {
    /// The event name as seen by reactive abilities.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::CardStrengthChanged { .. } => "onCardStrengthChanged",
            GameEvent::CardPowerGained { .. } => "onCardPowerGained",
            GameEvent::CharacterKilled { .. } => "onCharacterKilled",
            GameEvent::CardSaved { .. } => "onCardSaved",
            GameEvent::CardLeftPlay { .. } => "onCardLeftPlay",
            GameEvent::CardAttached { .. } => "onCardAttached",
            GameEvent::DupeAdded { .. } => "onDupeAdded",
            GameEvent::BypassedByStealth { .. } => "onBypassedByStealth",
            GameEvent::CardDeclared { .. } => "onCardDeclared",
            GameEvent::ActionCancelled { .. } => "onActionCancelled",
            GameEvent::PlayerWon { .. } => "onPlayerWon",
        }
    }
}
