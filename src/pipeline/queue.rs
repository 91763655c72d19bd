//! Deferred step queue.
//!
//! Steps are plain data so they can be queued while the card that queued
//! them is still borrowed. The game loop drains the queue and dispatches
//! each step against the card registry.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::event::KillOptions;
use crate::core::{EntityId, PlayerId};

/// A unit of deferred work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Resolve a kill requested through `GameHooks::kill_character`.
    Kill { card: EntityId, options: KillOptions },

    /// Commit a strength change that was held back while burn killed the card.
    ApplyBurnStrength { card: EntityId, amount: i32 },

    /// Re-check whether a player has reached the winning power total.
    CheckWinCondition { player: PlayerId },
}

/// FIFO queue of pending steps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StepQueue {
    pending: VecDeque<Step>,
}

impl StepQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.pending.push_back(step);
    }

    /// Take the oldest pending step.
    pub fn pop(&mut self) -> Option<Step> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
