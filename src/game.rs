//! Game facade.
//!
//! `Game` wires the pieces together: the card registry owns the entities,
//! the effect engine keeps persistent effects in line, the ability registry
//! runs card scripts on creation, and the pipeline records events and queues
//! deferred steps. Every mutating call drains the step queue before it
//! returns, so callers always observe a settled state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::abilities::{AbilityRegistry, AbilitySetup};
use crate::cards::{CardData, CardRegistry, CardSnapshot, CardSummary, DrawCard, Icon, Location};
use crate::core::{EntityId, GameConfig, Phase, PlayerId, Result};
use crate::effects::{AppliedEffects, EffectEngine, PersistentEffect};
use crate::pipeline::{GameEvent, GameHooks, GameView, KillOptions, Pipeline, Step};

/// Upper bound on step/reapply rounds in one `resolve`.
const MAX_RESOLVE_ROUNDS: usize = 64;

/// A card snapshot plus the effect records its entities held when it was
/// taken. Restoring both together keeps effects from being counted twice.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    pub snapshot: CardSnapshot,
    effects: AppliedEffects,
}

impl Checkpoint {
    #[must_use]
    pub fn effects(&self) -> &AppliedEffects {
        &self.effects
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    cards: CardRegistry,
    effects: EffectEngine,
    abilities: AbilityRegistry,
    pipeline: Pipeline,
    winner: Option<PlayerId>,
}

impl Game {
    /// New game with the bundled core set scripts.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_abilities(config, AbilityRegistry::with_core_set()?)
    }

    pub fn with_abilities(config: GameConfig, abilities: AbilityRegistry) -> Result<Self> {
        config.validate()?;
        info!(players = config.player_count, power_to_win = config.power_to_win, "game created");

        Ok(Self {
            pipeline: Pipeline::new(config.player_count),
            config,
            cards: CardRegistry::new(),
            effects: EffectEngine::new(),
            abilities,
            winner: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn effects(&self) -> &EffectEngine {
        &self.effects
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Direct access for installing interceptors.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn card(&self, id: EntityId) -> Result<&DrawCard> {
        self.cards.require(id)
    }

    /// Mutate a card directly. Effects are not reapplied until the next
    /// mutating call on the game.
    pub fn card_mut(&mut self, id: EntityId) -> Result<&mut DrawCard> {
        self.cards.require_mut(id)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn strength(&self, id: EntityId) -> Result<i32> {
        Ok(self.card(id)?.strength(&self.pipeline))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.pipeline.drain_events()
    }

    // === Setup ===

    /// Create a card out of play and run its ability script, if any.
    pub fn create_card(&mut self, printed: Arc<CardData>, owner: PlayerId) -> Result<EntityId> {
        let script = self.abilities.get(&printed.code).cloned();
        let id = self.cards.create(printed, owner);

        let card = self.cards.require_mut(id)?;
        card.stealth_limit = self.config.default_stealth_limit;
        if let Some(script) = script {
            debug!(card = %id, code = script.code(), "setting up abilities");
            script.setup_abilities(&mut AbilitySetup::new(card, &mut self.effects));
        }

        Ok(id)
    }

    /// Register an extra persistent effect, e.g. from an event card.
    pub fn add_effect(&mut self, effect: PersistentEffect) -> Result<()> {
        self.effects.add(effect);
        self.resolve()
    }

    pub fn put_into_play(&mut self, id: EntityId) -> Result<()> {
        let card = self.cards.require_mut(id)?;
        card.base.move_to(Location::PlayArea, None);
        card.base.new = true;
        debug!(card = %id, name = card.name(), "entered play");
        self.resolve()
    }

    pub fn set_phase(&mut self, phase: Phase) -> Result<()> {
        self.pipeline.set_phase_all(phase);
        self.resolve()
    }

    pub fn set_gold(&mut self, player: PlayerId, gold: i64) -> Result<()> {
        self.pipeline.set_gold(player, gold);
        self.resolve()
    }

    // === Attributes ===

    pub fn modify_strength(&mut self, id: EntityId, amount: i32) -> Result<()> {
        self.cards.require_mut(id)?.modify_strength(amount, true, &mut self.pipeline);
        self.resolve()
    }

    pub fn modify_power(&mut self, id: EntityId, amount: i32) -> Result<()> {
        self.cards.require_mut(id)?.modify_power(amount, &mut self.pipeline);
        self.resolve()
    }

    /// Power on every card `player` controls in play.
    #[must_use]
    pub fn total_power(&self, player: PlayerId) -> u32 {
        self.cards.in_play_for(player).map(DrawCard::power).sum()
    }

    /// Total dominance strength of `player`'s cards in play.
    #[must_use]
    pub fn dominance(&self, player: PlayerId) -> i32 {
        self.cards
            .in_play_for(player)
            .map(|card| card.dominance_strength(&self.pipeline))
            .sum()
    }

    // === Relations ===

    /// Place `attachment` on `target` for `player`, if both sides allow it.
    pub fn attach(&mut self, player: PlayerId, attachment: EntityId, target: EntityId) -> Result<bool> {
        let allowed = {
            let att = self.cards.require(attachment)?;
            let host = self.cards.require(target)?;
            att.can_attach(player, Some(host)) && host.allow_attachment(att)
        };
        if !allowed {
            debug!(%attachment, %target, "attachment rejected");
            return Ok(false);
        }

        self.cards.with_pair(target, attachment, |host, att| host.attach(att))?;
        self.pipeline.raise_event(GameEvent::CardAttached {
            attachment,
            parent: target,
        });
        self.resolve()?;
        Ok(true)
    }

    pub fn add_duplicate(&mut self, card: EntityId, dupe: EntityId) -> Result<bool> {
        let added = self.cards.with_pair(card, dupe, |host, d| host.add_duplicate(d))?;
        if added {
            self.pipeline.raise_event(GameEvent::DupeAdded { card, dupe });
        }
        Ok(added)
    }

    /// Take a dupe off `card` and discard it.
    pub fn remove_duplicate(&mut self, card: EntityId, force: bool) -> Result<Option<EntityId>> {
        let Some(dupe) = self.cards.require_mut(card)?.remove_duplicate(force) else {
            return Ok(None);
        };
        self.discard_out_of_play(dupe)?;
        Ok(Some(dupe))
    }

    // === Challenges ===

    pub fn use_stealth(&mut self, source: EntityId, target: EntityId) -> Result<bool> {
        let bypassed = self
            .cards
            .with_pair(source, target, |s, t| s.use_stealth_to_bypass(t))?;
        if bypassed {
            self.pipeline.raise_event(GameEvent::BypassedByStealth { source, target });
        }
        Ok(bypassed)
    }

    pub fn declare_as_attacker(&mut self, id: EntityId, challenge: Icon) -> Result<bool> {
        self.declare(id, challenge, true)
    }

    pub fn declare_as_defender(&mut self, id: EntityId, challenge: Icon) -> Result<bool> {
        self.declare(id, challenge, false)
    }

    fn declare(&mut self, id: EntityId, challenge: Icon, attacking: bool) -> Result<bool> {
        let card = self.cards.require_mut(id)?;
        let allowed = if attacking {
            card.can_declare_as_attacker(challenge)
        } else {
            card.can_declare_as_defender(challenge)
        };
        if !allowed {
            return Ok(false);
        }

        let stays_standing = if attacking {
            card.challenge_options.does_not_kneel_as_attacker
        } else {
            card.challenge_options.does_not_kneel_as_defender
        };
        card.in_challenge = true;
        if !stays_standing {
            card.kneel();
        }

        self.pipeline.raise_event(GameEvent::CardDeclared {
            card: id,
            challenge,
            attacking,
        });
        self.resolve()?;
        Ok(true)
    }

    /// Start the kill routine for a character and resolve it.
    pub fn kill(&mut self, id: EntityId, options: KillOptions) -> Result<()> {
        self.cards.require(id)?;
        self.pipeline.kill_character(id, options);
        self.resolve()
    }

    // === Leaving play ===

    /// Move a card out of play along with everything attached to it.
    ///
    /// Attachments and dupes go to the discard pile. Effects the card
    /// received are taken back on the following reapply. Effects it provides
    /// stay registered but are suspended until it is in play again.
    pub fn leave_play(&mut self, id: EntityId, destination: Location) -> Result<()> {
        self.remove_from_play(id, destination)?;
        self.resolve()
    }

    fn remove_from_play(&mut self, id: EntityId, destination: Location) -> Result<()> {
        let card = self.cards.require(id)?;
        let parent = card.parent();
        let attachments: Vec<_> = card.attachments().iter().copied().collect();
        let dupes: Vec<_> = card.dupes().collect();

        for attachment in attachments {
            self.remove_from_play(attachment, Location::DiscardPile)?;
        }
        for dupe in dupes {
            self.discard_out_of_play(dupe)?;
        }
        if let Some(parent) = parent {
            if let Some(host) = self.cards.get_mut(parent) {
                host.remove_child_card(id);
            }
        }

        let card = self.cards.require_mut(id)?;
        card.leaves_play();
        card.base.move_to(destination, None);
        debug!(card = %id, ?destination, "left play");

        self.pipeline.raise_event(GameEvent::CardLeftPlay { card: id });
        Ok(())
    }

    /// Discard a card that is not itself in play, such as a dupe.
    fn discard_out_of_play(&mut self, id: EntityId) -> Result<()> {
        let card = self.cards.require_mut(id)?;
        card.leaves_play();
        card.base.move_to(Location::DiscardPile, None);
        Ok(())
    }

    // === Resolution ===

    /// Drain queued steps in FIFO order, reapplying effects between rounds
    /// until no step is pending and the effects have settled.
    pub fn resolve(&mut self) -> Result<()> {
        for _ in 0..MAX_RESOLVE_ROUNDS {
            while let Some(step) = self.pipeline.next_step() {
                self.run_step(step)?;
            }

            let changed = self.effects.reapply(&mut self.cards, &mut self.pipeline);

            if !changed && self.pipeline.steps().is_empty() {
                return Ok(());
            }
        }

        warn!(pending = self.pipeline.steps().len(), "resolution did not settle");
        Ok(())
    }

    fn run_step(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Kill { card, options } => self.resolve_kill(card, options),
            Step::ApplyBurnStrength { card, amount } => {
                self.cards.require_mut(card)?.complete_burn(amount);
                debug!(%card, amount, "burn strength applied");
                Ok(())
            }
            Step::CheckWinCondition { player } => {
                self.check_win_condition(player);
                Ok(())
            }
        }
    }

    fn resolve_kill(&mut self, id: EntityId, options: KillOptions) -> Result<()> {
        let card = self.cards.require_mut(id)?;
        if card.location() != Location::PlayArea {
            return Ok(());
        }
        if !card.can_be_killed() {
            debug!(card = %id, "kill prevented");
            return Ok(());
        }

        if options.allow_save && card.can_be_saved() {
            if let Some(dupe) = card.remove_duplicate(false) {
                card.mark_as_saved();
                self.discard_out_of_play(dupe)?;
                debug!(card = %id, %dupe, "saved by duplicate");
                self.pipeline.raise_event(GameEvent::CardSaved { card: id, dupe });
                return Ok(());
            }
        }

        self.remove_from_play(id, Location::DeadPile)?;
        info!(card = %id, is_burn = options.is_burn, "character killed");
        self.pipeline.raise_event(GameEvent::CharacterKilled {
            card: id,
            is_burn: options.is_burn,
        });
        Ok(())
    }

    fn check_win_condition(&mut self, player: PlayerId) {
        if self.winner.is_some() {
            return;
        }

        let power = self.total_power(player);
        if power >= self.config.power_to_win {
            info!(%player, power, "player reached winning power");
            self.winner = Some(player);
            self.pipeline.raise_event(GameEvent::PlayerWon { player, power });
        }
    }

    // === History and views ===

    /// Capture a card, its children, and the effects applied to them.
    pub fn snapshot(&self, id: EntityId) -> Result<Checkpoint> {
        let snapshot = self.card(id)?.create_snapshot(&self.cards)?;
        let effects = self.effects.capture(&snapshot.ids());
        Ok(Checkpoint { snapshot, effects })
    }

    /// Put every entity in `checkpoint` back as it was captured, then let
    /// effects catch up with whatever changed since.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<()> {
        let Checkpoint { snapshot, effects } = checkpoint;
        let ids = snapshot.ids();
        for card in snapshot.into_cards() {
            self.cards.replace(card);
        }
        self.effects.restore(effects, &ids, &mut self.cards, &mut self.pipeline);
        self.resolve()
    }

    pub fn summary(&self, id: EntityId, active_player: PlayerId, hide_when_faceup: bool) -> Result<CardSummary> {
        self.card(id)?
            .summary(active_player, hide_when_faceup, &self.pipeline, &self.cards)
    }

    /// Phase as seen by `player`.
    #[must_use]
    pub fn phase(&self, player: PlayerId) -> Phase {
        self.pipeline.phase(player)
    }
}
