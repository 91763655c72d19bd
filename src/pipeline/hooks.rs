//! The interface a card sees of the surrounding game.

use super::event::{GameAction, GameEvent, KillOptions};
use super::queue::Step;
use crate::core::{EntityId, Phase, PlayerId};

/// Read-only game state cards need for derived values.
pub trait GameView {
    /// Current phase for a player.
    fn phase(&self, player: PlayerId) -> Phase;

    /// Gold in a player's pool.
    fn gold(&self, player: PlayerId) -> i64;
}

/// Mutation hooks.
///
/// Implementations decide what "raise", "kill" and "queue" mean. The card
/// only guarantees it calls them at the right moments and in the right order.
pub trait GameHooks: GameView {
    /// Synchronous notification fan-out.
    fn raise_event(&mut self, event: GameEvent);

    /// Ask whether `action` on `card` goes ahead.
    ///
    /// Returns `false` when a reactive ability cancelled it; the caller must
    /// then skip the mutation.
    fn apply_game_action(&mut self, action: GameAction, card: EntityId) -> bool;

    /// Defer a step until the current resolution chain completes.
    fn queue_simple_step(&mut self, step: Step);

    /// Start the death resolution pipeline for a character.
    fn kill_character(&mut self, card: EntityId, options: KillOptions);

    /// Re-evaluate victory after a power change.
    fn check_win_condition(&mut self, player: PlayerId);
}
