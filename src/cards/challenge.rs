//! Lifecycle and challenge eligibility.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardType, Location};
use super::icons::Icon;
use super::instance::DrawCard;
use crate::core::Phase;
use crate::pipeline::GameAction;

/// Per-card overrides of the default challenge rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOptions {
    pub does_not_contribute_strength: bool,
    pub does_not_kneel_as_attacker: bool,
    pub does_not_kneel_as_defender: bool,
    pub must_be_declared_as_defender: bool,
    pub can_be_declared_while_kneeling: bool,
    pub can_be_declared_without_icon: bool,
}

/// Standard ways of putting a card into play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayAction {
    Setup,
    Marshal,
    Ambush,
}

impl DrawCard {
    /// Reset everything that does not survive leaving play.
    pub fn leaves_play(&mut self) {
        self.kneeled = false;
        self.power = 0;
        self.was_ambush = false;
        self.base.new = false;
        self.clear_danger();
        self.reset_for_challenge();

        self.base.leaves_play();
    }

    /// Clear the flags that only last for one challenge.
    pub fn reset_for_challenge(&mut self) {
        self.stealth = false;
        self.stealth_target = None;
        self.in_challenge = false;
    }

    pub fn kneel(&mut self) {
        self.kneeled = true;
    }

    pub fn stand(&mut self) {
        self.kneeled = false;
    }

    // === Declaring ===

    #[must_use]
    pub fn can_declare_as_attacker(&self, challenge: Icon) -> bool {
        self.base.allow_game_action(GameAction::DeclareAsAttacker)
            && self.can_declare_as_participant(challenge)
    }

    #[must_use]
    pub fn can_declare_as_defender(&self, challenge: Icon) -> bool {
        self.base.allow_game_action(GameAction::DeclareAsDefender)
            && self.can_declare_as_participant(challenge)
    }

    #[must_use]
    pub fn can_declare_as_participant(&self, challenge: Icon) -> bool {
        self.can_participate_in_challenge()
            && self.location() == Location::PlayArea
            && !self.stealth
            && (!self.kneeled || self.challenge_options.can_be_declared_while_kneeling)
            && (self.has_icon(challenge) || self.challenge_options.can_be_declared_without_icon)
    }

    #[must_use]
    pub fn can_participate_in_challenge(&self) -> bool {
        self.card_type() == CardType::Character
            && self.base.allow_game_action(GameAction::ParticipateInChallenge)
    }

    // === Stealth ===

    #[must_use]
    pub fn needs_stealth_target(&self) -> bool {
        self.is_stealth() && self.stealth_target.is_none()
    }

    #[must_use]
    pub fn can_be_bypassed_by_stealth(&self) -> bool {
        !self.is_stealth() && self.base.allow_game_action(GameAction::BypassByStealth)
    }

    #[must_use]
    pub fn can_use_stealth_to_bypass(&self, target: &DrawCard) -> bool {
        self.is_stealth() && target.can_be_bypassed_by_stealth()
    }

    /// Bypass `target` with stealth. Leaves both cards untouched on failure.
    pub fn use_stealth_to_bypass(&mut self, target: &mut DrawCard) -> bool {
        if !self.can_use_stealth_to_bypass(target) {
            return false;
        }

        target.stealth = true;
        self.stealth_target = Some(target.uuid());

        true
    }

    // === Danger ===

    #[must_use]
    pub fn can_be_killed(&self) -> bool {
        self.base.allow_game_action(GameAction::Kill)
    }

    #[must_use]
    pub fn can_be_saved(&self) -> bool {
        self.base.allow_game_action(GameAction::Save)
    }

    pub fn mark_as_in_danger(&mut self) {
        self.in_danger = true;
    }

    pub fn mark_as_saved(&mut self) {
        self.in_danger = false;
        self.saved = true;
    }

    pub fn clear_danger(&mut self) {
        self.in_danger = false;
        self.saved = false;
    }

    // === Playing ===

    /// Standard play actions available to this card in `phase`.
    #[must_use]
    pub fn play_actions(&self, phase: Phase) -> SmallVec<[PlayAction; 2]> {
        let mut actions = SmallVec::new();
        let permanent = matches!(
            self.card_type(),
            CardType::Character | CardType::Attachment | CardType::Location
        );

        if permanent {
            match phase {
                Phase::Setup => actions.push(PlayAction::Setup),
                Phase::Marshal => actions.push(PlayAction::Marshal),
                _ => {}
            }
        }

        if self.is_ambush() && phase == Phase::Challenge {
            actions.push(PlayAction::Ambush);
        }

        actions
    }
}
