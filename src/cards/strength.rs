//! Attribute engine: strength, dominance, power and icons.
//!
//! Strength is never stored as a single number. It is derived on demand from
//! the printed value plus the modifier, multiplier and override fields that
//! persistent effects maintain. Every mutation entry point reports through
//! `GameHooks` so reactive abilities see the change.

use tracing::debug;

use super::definition::CardType;
use super::icons::{Icon, IconList};
use super::instance::DrawCard;
use crate::core::Phase;
use crate::pipeline::{GameAction, GameEvent, GameHooks, GameView, KillOptions, Step};

impl DrawCard {
    #[must_use]
    pub fn printed_strength(&self) -> i32 {
        self.base.printed.strength
    }

    #[must_use]
    pub fn strength_modifier(&self) -> i32 {
        self.strength_modifier
    }

    #[must_use]
    pub fn strength_multiplier(&self) -> f64 {
        self.strength_multiplier
    }

    #[must_use]
    pub fn strength_set(&self) -> Option<i32> {
        self.strength_set
    }

    #[must_use]
    pub fn burn_value(&self) -> i32 {
        self.burn_value
    }

    /// Current strength.
    pub fn strength<V: GameView + ?Sized>(&self, view: &V) -> i32 {
        self.boosted_strength(0, view)
    }

    /// Strength with a temporary `boost` that is not committed to the card.
    pub fn boosted_strength<V: GameView + ?Sized>(&self, boost: i32, view: &V) -> i32 {
        self.boosted_strength_in(boost, view.phase(self.controller()))
    }

    /// Strength formula for a known phase.
    ///
    /// Setup ignores every effect. An override beats modifiers, multiplier
    /// and boost. Otherwise `round(multiplier * (modifier + printed + boost))`,
    /// floored at zero.
    #[must_use]
    pub fn boosted_strength_in(&self, boost: i32, phase: Phase) -> i32 {
        let printed = self.printed_strength();

        if phase == Phase::Setup {
            return printed;
        }

        if let Some(value) = self.strength_set {
            return value;
        }

        let modified = self.strength_modifier + printed + boost;
        let multiplied = (self.strength_multiplier * f64::from(modified)).round() as i32;
        multiplied.max(0)
    }

    /// Change the additive strength modifier.
    ///
    /// A burning card that would drop to zero or below is killed instead; the
    /// modifier is committed by a queued step once the kill has resolved.
    pub fn modify_strength<H: GameHooks + ?Sized>(&mut self, amount: i32, applying: bool, hooks: &mut H) {
        let uuid = self.uuid();

        if self.is_burning && self.burn_value == 0 && self.boosted_strength(amount, &*hooks) <= 0 {
            debug!(card = %uuid, amount, "burn replaces strength reduction");
            self.burn_value = amount;
            hooks.kill_character(uuid, KillOptions::burn());
            hooks.queue_simple_step(Step::ApplyBurnStrength { card: uuid, amount });
            return;
        }

        self.strength_modifier += amount;
        debug!(card = %uuid, amount, modifier = self.strength_modifier, "strength modified");
        hooks.raise_event(GameEvent::CardStrengthChanged {
            card: uuid,
            amount,
            applying,
        });
    }

    /// Commit a strength change held back by burn.
    pub fn complete_burn(&mut self, amount: i32) {
        self.strength_modifier += amount;
        self.burn_value = 0;
    }

    /// Multiply strength. The event reports the net strength delta.
    pub fn modify_strength_multiplier<H: GameHooks + ?Sized>(&mut self, factor: f64, applying: bool, hooks: &mut H) {
        let before = self.strength(&*hooks);

        self.strength_multiplier *= factor;

        let amount = self.strength(&*hooks) - before;
        hooks.raise_event(GameEvent::CardStrengthChanged {
            card: self.uuid(),
            amount,
            applying,
        });
    }

    /// Override strength, or clear the override with `None`.
    pub fn set_strength(&mut self, value: Option<i32>) {
        self.strength_set = value;
    }

    // === Dominance ===

    pub fn modify_dominance_strength(&mut self, amount: i32) {
        self.dominance_strength_modifier += amount;
    }

    /// Contribution to dominance, counted separately from combat strength.
    pub fn dominance_strength<V: GameView + ?Sized>(&self, view: &V) -> i32 {
        let counts = !self.kneeled
            && self.card_type() == CardType::Character
            && self.contributes_to_dominance;
        let base = if counts { self.strength(view) } else { 0 };

        (base + self.dominance_strength_modifier).max(0)
    }

    // === Power ===

    #[must_use]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Gain (or lose, if negative) power.
    ///
    /// Goes through `apply_game_action` so it can be cancelled. The event
    /// reports the power actually gained after flooring at zero.
    pub fn modify_power<H: GameHooks + ?Sized>(&mut self, amount: i32, hooks: &mut H) {
        let uuid = self.uuid();

        if !hooks.apply_game_action(GameAction::GainPower, uuid) {
            return;
        }

        let old = self.power;
        self.power = (i64::from(old) + i64::from(amount)).max(0) as u32;
        debug!(card = %uuid, amount, power = self.power, "power modified");

        if amount > 0 {
            hooks.raise_event(GameEvent::CardPowerGained {
                card: uuid,
                power: self.power - old,
            });
        }

        hooks.check_win_condition(self.controller());
    }

    // === Icons ===

    #[must_use]
    pub fn has_icon(&self, icon: Icon) -> bool {
        self.icons.has(icon)
    }

    pub fn add_icon(&mut self, icon: Icon) {
        self.icons.add(icon);
    }

    pub fn remove_icon(&mut self, icon: Icon) {
        self.icons.remove(icon);
    }

    #[must_use]
    pub fn icon_list(&self) -> IconList {
        self.icons.present()
    }

    #[must_use]
    pub fn icons_added(&self) -> IconList {
        self.icons.added()
    }

    #[must_use]
    pub fn icons_removed(&self) -> IconList {
        self.icons.removed()
    }

    #[must_use]
    pub fn number_of_icons(&self) -> usize {
        self.icons.present().len()
    }
}
