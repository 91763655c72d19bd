//! The event/action pipeline cards report their mutations to.
//!
//! Cards never change observable state silently. Every mutation entry point
//! on `DrawCard` talks to a [`GameHooks`] implementation: it raises events,
//! asks permission for game actions that other abilities may cancel,
//! requests kills and queues follow-up steps.
//!
//! ## Key Components
//!
//! - [`GameView`] / [`GameHooks`]: the narrow interface a card sees of the game
//! - [`GameEvent`]: notifications raised by card mutations
//! - [`GameAction`]: named actions that can be restricted or cancelled
//! - [`Step`] / [`StepQueue`]: deferred work, resolved in FIFO order
//! - [`Pipeline`]: a reference implementation used by [`crate::game::Game`]
//!
//! ## Deferral
//!
//! There is no concurrency. "Later" means "after the current call chain
//! unwinds, when the game loop drains the step queue":
//!
//! ```
//! use drawcard_engine::core::EntityId;
//! use drawcard_engine::pipeline::{Step, StepQueue};
//!
//! let mut queue = StepQueue::new();
//! queue.push(Step::ApplyBurnStrength { card: EntityId(1), amount: -2 });
//! queue.push(Step::ApplyBurnStrength { card: EntityId(2), amount: -1 });
//!
//! assert_eq!(queue.pop(), Some(Step::ApplyBurnStrength { card: EntityId(1), amount: -2 }));
//! ```

mod event;
mod hooks;
mod queue;
mod reference;

pub use event::{GameAction, GameEvent, KillOptions};
pub use hooks::{GameHooks, GameView};
pub use queue::{Step, StepQueue};
pub use reference::{ActionInterceptor, Pipeline, PlayerState};
