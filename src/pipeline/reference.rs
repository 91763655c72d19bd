//! Reference `GameHooks` implementation.
//!
//! `Pipeline` keeps per-player phase and gold, records every raised event,
//! lets reactive abilities cancel actions through interceptors, and turns
//! kill requests and win checks into queued steps for the game loop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::event::{GameAction, GameEvent, KillOptions};
use super::hooks::{GameHooks, GameView};
use super::queue::{Step, StepQueue};
use crate::core::{EntityId, Phase, PlayerId, PlayerMap};

/// Reactive check run before an action resolves. Returning `false` cancels it.
pub type ActionInterceptor = Arc<dyn Fn(GameAction, EntityId) -> bool + Send + Sync>;

/// What the pipeline tracks per seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub phase: Phase,
    pub gold: i64,
}

#[derive(Clone)]
pub struct Pipeline {
    players: PlayerMap<PlayerState>,
    events: Vec<GameEvent>,
    steps: StepQueue,
    interceptors: Vec<ActionInterceptor>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("players", &self.players)
            .field("events", &self.events)
            .field("steps", &self.steps)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl Pipeline {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            players: PlayerMap::with_default(player_count),
            events: Vec::new(),
            steps: StepQueue::new(),
            interceptors: Vec::new(),
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    pub fn set_phase(&mut self, player: PlayerId, phase: Phase) {
        if let Some(state) = self.players.get_mut(player) {
            state.phase = phase;
        }
    }

    /// Move every seat to the same phase.
    pub fn set_phase_all(&mut self, phase: Phase) {
        let players: Vec<_> = self.players.iter().map(|(p, _)| p).collect();
        for player in players {
            self.set_phase(player, phase);
        }
    }

    pub fn set_gold(&mut self, player: PlayerId, gold: i64) {
        if let Some(state) = self.players.get_mut(player) {
            state.gold = gold;
        }
    }

    /// Register a reactive check consulted by `apply_game_action`.
    pub fn add_interceptor(&mut self, interceptor: ActionInterceptor) {
        self.interceptors.push(interceptor);
    }

    pub fn clear_interceptors(&mut self) {
        self.interceptors.clear();
    }

    /// Every event raised so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the event log, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn steps(&self) -> &StepQueue {
        &self.steps
    }

    pub fn next_step(&mut self) -> Option<Step> {
        self.steps.pop()
    }
}

impl GameView for Pipeline {
    fn phase(&self, player: PlayerId) -> Phase {
        self.players.get(player).map(|p| p.phase).unwrap_or_default()
    }

    fn gold(&self, player: PlayerId) -> i64 {
        self.players.get(player).map_or(0, |p| p.gold)
    }
}

impl GameHooks for Pipeline {
    fn raise_event(&mut self, event: GameEvent) {
        trace!(event = event.name(), "raise");
        self.events.push(event);
    }

    fn apply_game_action(&mut self, action: GameAction, card: EntityId) -> bool {
        let allowed = self.interceptors.iter().all(|check| check(action, card));
        if !allowed {
            debug!(%action, %card, "action cancelled by interceptor");
            self.raise_event(GameEvent::ActionCancelled { action, card });
        }
        allowed
    }

    fn queue_simple_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn kill_character(&mut self, card: EntityId, options: KillOptions) {
        debug!(%card, ?options, "kill requested");
        self.steps.push(Step::Kill { card, options });
    }

    fn check_win_condition(&mut self, player: PlayerId) {
        self.steps.push(Step::CheckWinCondition { player });
    }
}
