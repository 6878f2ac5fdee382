//! The combat session: turn cycle and public operation surface.
//!
//! A `CombatSession` exclusively owns everything one encounter needs: the
//! pile store, the player, the enemies, the corruption meter, the RNG and
//! the event queue. Nothing is shared between sessions, so any number can
//! run side by side.
//!
//! ## Turn cycle
//!
//! 1. `start_combat` loads the deck, spawns enemies with their first
//!    intents and draws the starting hand.
//! 2. The player calls `play_card` any number of times.
//! 3. `end_turn` discards the hand, runs every enemy's turn slot, ticks
//!    enemy statuses and starts the next player turn.
//!
//! The combat ends in `Victory` when no enemy is left and in `Defeat` when
//! the player reaches 0 hp. Every rejected call leaves the session exactly
//! as it was.
//!
//! ## Example
//!
//! ```
//! use roguedeck::cards::{CardDefinition, CardType};
//! use roguedeck::core::CombatConfig;
//! use roguedeck::effects::Effect;
//! use roguedeck::enemies::{EnemyDefinition, Intent};
//! use roguedeck::session::{CombatSession, CombatStatus};
//! use roguedeck::status::PlayerProfile;
//!
//! let strike = CardDefinition::new("strike", "Strike", CardType::Attack, 1)
//!     .with_effect(Effect::damage(6));
//! let slime = EnemyDefinition::cycling("slime", "Slime", 6, vec![Intent::Attack { damage: 3, hits: 1 }]);
//!
//! let mut session = CombatSession::new(CombatConfig::default(), 42);
//! session
//!     .start_combat(vec![strike; 5], vec![slime], PlayerProfile::new(50))
//!     .unwrap();
//!
//! session.play_card(0, None).unwrap();
//! assert_eq!(session.status(), CombatStatus::Victory);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::ledger::CardLedger;
use super::snapshot::CombatSnapshot;
use crate::cards::{CardDefinition, CardInstance};
use crate::core::{
    ActionRecord, CombatAction, CombatConfig, CombatError, EnemyId, GameRng, IdAllocator, InstanceId,
    InvariantPolicy, InvariantViolation,
};
use crate::effects::{candidate_targets, draw_cards, select_target, EffectResolver, ResolutionResult, ResolverContext};
use crate::enemies::{Enemy, EnemyDefinition, EnemyTurnReport, IntentContext};
use crate::events::{CombatEvent, EventQueue, EventSink};
use crate::piles::{PileKind, PileStore};
use crate::status::{CorruptionMeter, PlayerProfile, PlayerState};

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStatus {
    /// No combat loaded. `start_combat` is the only useful call.
    NotStarted,
    /// Waiting for the player to play cards or end the turn.
    PlayerTurn,
    Victory,
    Defeat,
}

impl CombatStatus {
    /// Victory or defeat.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, CombatStatus::Victory | CombatStatus::Defeat)
    }
}

/// Result of an accepted card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub card: InstanceId,
    pub target: Option<EnemyId>,
    pub energy_spent: i64,
    pub resolution: ResolutionResult,
    pub exhausted: bool,
    /// Enemies removed from the fight by this play.
    pub defeated: Vec<EnemyId>,
    pub status: CombatStatus,
}

/// Result of an accepted end-turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    /// Cards discarded from the hand.
    pub discarded: Vec<InstanceId>,
    /// One report per enemy that acted, in turn order.
    pub enemy_turns: Vec<(EnemyId, EnemyTurnReport)>,
    /// Hp the player lost during the enemy phase.
    pub damage_taken: i64,
    /// The new turn number, or the last one if the combat ended.
    pub turn: u32,
    /// Cards drawn for the new turn.
    pub drawn: Vec<InstanceId>,
    pub status: CombatStatus,
}

/// One combat encounter.
pub struct CombatSession {
    config: CombatConfig,
    status: CombatStatus,
    turn: u32,
    action_sequence: u32,
    piles: PileStore,
    player: PlayerState,
    enemies: Vec<Enemy>,
    corruption: CorruptionMeter,
    rng: GameRng,
    ids: IdAllocator,
    ledger: CardLedger,
    history: Vector<ActionRecord>,
    events: EventQueue,
    subscribers: Vec<Box<dyn EventSink>>,
}

impl CombatSession {
    /// Create an idle session. `seed` drives every shuffle.
    #[must_use]
    pub fn new(config: CombatConfig, seed: u64) -> Self {
        Self {
            piles: PileStore::new(config.max_hand_size),
            player: idle_player(),
            config,
            status: CombatStatus::NotStarted,
            turn: 0,
            action_sequence: 0,
            enemies: Vec::new(),
            corruption: CorruptionMeter::default(),
            rng: GameRng::new(seed),
            ids: IdAllocator::new(),
            ledger: CardLedger::default(),
            history: Vector::new(),
            events: EventQueue::new(),
            subscribers: Vec::new(),
        }
    }

    // === Lifecycle ===

    /// Load a deck and an encounter and draw the starting hand.
    ///
    /// Every deck entry becomes a fresh card instance. The player's hp and
    /// corruption come from `profile`; energy comes from the config.
    pub fn start_combat(
        &mut self,
        deck: Vec<CardDefinition>,
        enemies: Vec<EnemyDefinition>,
        profile: PlayerProfile,
    ) -> Result<(), CombatError> {
        self.start_combat_inner(deck, enemies, profile)
            .inspect_err(|err| warn!(%err, "start_combat rejected"))
    }

    fn start_combat_inner(
        &mut self,
        deck: Vec<CardDefinition>,
        enemies: Vec<EnemyDefinition>,
        profile: PlayerProfile,
    ) -> Result<(), CombatError> {
        if self.status != CombatStatus::NotStarted {
            return Err(CombatError::AlreadyStarted);
        }
        if enemies.is_empty() {
            return Err(CombatError::EmptyEncounter);
        }

        // Build everything on the side so a failure changes nothing.
        let mut ids = self.ids.clone();
        let enemies = enemies
            .into_iter()
            .map(|definition| Enemy::new(ids.enemy(), definition))
            .collect::<Result<Vec<_>, _>>()?;
        let deck: Vec<CardInstance> = deck
            .into_iter()
            .map(|definition| CardInstance::new(ids.instance(), definition))
            .collect();
        let deck_size = deck.len();

        let mut piles = PileStore::new(self.config.max_hand_size);
        piles.start_combat(deck, &mut self.rng)?;

        self.piles = piles;
        self.ids = ids;
        self.enemies = enemies;
        self.player = PlayerState::new(&profile, self.config.base_energy);
        self.corruption = CorruptionMeter::new(profile.corruption);
        self.ledger = CardLedger::with_deck(deck_size);
        self.history = Vector::new();
        self.status = CombatStatus::PlayerTurn;
        self.turn = 0;

        info!(
            deck = deck_size,
            enemies = self.enemies.len(),
            hp = self.player.combatant.current_hp,
            corruption = self.corruption.value(),
            "combat started"
        );

        self.begin_player_turn(self.config.starting_hand_size);
        self.finish_operation();
        Ok(())
    }

    /// Throw away the combat in progress, if any.
    ///
    /// Piles, combatants, history and pending events are dropped and the
    /// session returns to `NotStarted`. Subscribers and the RNG stream are
    /// kept.
    pub fn abort(&mut self) {
        if self.status != CombatStatus::NotStarted {
            info!(turn = self.turn, "combat aborted");
        }
        self.status = CombatStatus::NotStarted;
        self.turn = 0;
        self.action_sequence = 0;
        self.piles.reset();
        self.player = idle_player();
        self.enemies.clear();
        self.corruption = CorruptionMeter::default();
        self.ledger = CardLedger::default();
        self.history = Vector::new();
        self.events.clear();
    }

    // === Player commands ===

    /// Play the card at `hand_index`.
    ///
    /// `target` indexes the living enemies; it may be omitted when the card
    /// needs no target or exactly one enemy is alive.
    pub fn play_card(&mut self, hand_index: usize, target: Option<usize>) -> Result<PlayOutcome, CombatError> {
        self.play_card_inner(hand_index, target)
            .inspect_err(|err| warn!(%err, hand_index, ?target, "play_card rejected"))
    }

    fn play_card_inner(&mut self, hand_index: usize, target: Option<usize>) -> Result<PlayOutcome, CombatError> {
        self.ensure_player_turn()?;

        let card = self
            .piles
            .hand_card(hand_index)
            .cloned()
            .ok_or(CombatError::InvalidHandIndex {
                index: hand_index,
                hand_size: self.piles.hand().len(),
            })?;
        if !card.definition.is_playable() {
            return Err(CombatError::Unplayable(card.instance_id));
        }
        let cost = card.cost().max(0);
        if cost > self.player.energy {
            return Err(CombatError::InsufficientEnergy {
                cost,
                available: self.player.energy,
            });
        }
        let target_index = select_target(&card.definition, self.enemies.len(), target)?;

        // Accepted: from here on nothing is rejected.
        let target_id = target_index.map(|i| self.enemies[i].id);
        self.player.spend_energy(cost);
        self.record(CombatAction::play(hand_index, target), Some(card.instance_id));
        self.events.push(CombatEvent::CardPlayed {
            instance: card.instance_id,
            card: card.card_id().clone(),
            target: target_id,
            cost,
        });
        debug!(card = %card.card_id(), instance = %card.instance_id, ?target_id, cost, "card played");

        let resolution = {
            let mut ctx = ResolverContext {
                piles: &mut self.piles,
                rng: &mut self.rng,
                events: &mut self.events,
                corruption: &mut self.corruption,
                config: &self.config,
            };
            let enemy = target_index
                .and_then(|i| self.enemies.get_mut(i))
                .map(|e| &mut e.combatant);
            EffectResolver::resolve(&card.definition, &mut self.player, enemy, &mut ctx)
        };

        let exhausted = card.definition.exhaust;
        if exhausted {
            self.piles.move_to_exhaust(card.instance_id)?;
            self.events.push(CombatEvent::CardExhausted {
                instance: card.instance_id,
            });
        } else {
            self.piles.move_to_discard(card.instance_id)?;
        }

        let defeated = self.remove_defeated_enemies();
        self.check_combat_end();
        self.finish_operation();

        Ok(PlayOutcome {
            card: card.instance_id,
            target: target_id,
            energy_spent: cost,
            resolution,
            exhausted,
            defeated,
            status: self.status,
        })
    }

    /// End the player turn and run the enemy phase.
    pub fn end_turn(&mut self) -> Result<TurnSummary, CombatError> {
        self.end_turn_inner()
            .inspect_err(|err| warn!(%err, "end_turn rejected"))
    }

    fn end_turn_inner(&mut self) -> Result<TurnSummary, CombatError> {
        self.ensure_player_turn()?;
        self.record(CombatAction::EndTurn, None);

        let discarded = self.piles.discard_hand();
        debug!(turn = self.turn, discarded = discarded.len(), "turn ended");

        let hp_before = self.player.combatant.current_hp;
        let mut enemy_turns = Vec::with_capacity(self.enemies.len());
        for enemy in &mut self.enemies {
            if self.player.combatant.is_defeated() {
                break;
            }
            let mut ctx = IntentContext {
                events: &mut self.events,
                corruption: &mut self.corruption,
                thresholds: &self.config.corruption_thresholds,
            };
            let report = enemy.take_turn(&mut self.player, &mut ctx);
            enemy_turns.push((enemy.id, report));
        }

        for enemy in &mut self.enemies {
            enemy.combatant.status.tick_down_on_turn_start();
        }
        let damage_taken = hp_before - self.player.combatant.current_hp;

        self.check_combat_end();
        let drawn = if self.status == CombatStatus::PlayerTurn {
            self.begin_player_turn(self.config.draw_per_turn)
        } else {
            Vec::new()
        };
        self.finish_operation();

        Ok(TurnSummary {
            discarded,
            enemy_turns,
            damage_taken,
            turn: self.turn,
            drawn,
            status: self.status,
        })
    }

    /// Dispatch a command from a headless driver.
    pub fn apply(&mut self, action: CombatAction) -> Result<(), CombatError> {
        match action {
            CombatAction::PlayCard { hand_index, target } => self.play_card(hand_index, target).map(|_| ()),
            CombatAction::EndTurn => self.end_turn().map(|_| ()),
        }
    }

    /// Every command the player could issue right now.
    ///
    /// Lists each affordable, playable hand card once per legal target,
    /// then `EndTurn`. Empty outside the player turn.
    #[must_use]
    pub fn legal_plays(&self) -> Vec<CombatAction> {
        if self.status != CombatStatus::PlayerTurn {
            return Vec::new();
        }

        let mut actions: Vec<CombatAction> = self
            .piles
            .hand()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.definition.is_playable() && card.cost().max(0) <= self.player.energy)
            .flat_map(|(index, card)| {
                candidate_targets(&card.definition, self.enemies.len())
                    .into_iter()
                    .map(move |target| CombatAction::play(index, target))
            })
            .collect();
        actions.push(CombatAction::EndTurn);
        actions
    }

    // === Mid-combat card changes ===

    /// Introduce a new card instance into a pile. Returns its id.
    pub fn add_card(&mut self, definition: CardDefinition, pile: PileKind) -> Result<InstanceId, CombatError> {
        self.ensure_player_turn()?;

        let mut ids = self.ids.clone();
        let instance = CardInstance::new(ids.instance(), definition);
        let id = instance.instance_id;
        self.piles.add_card(instance, pile)?;
        self.ids = ids;
        self.ledger.introduce();

        debug!(instance = %id, ?pile, "card added");
        self.finish_operation();
        Ok(id)
    }

    /// Take a card instance out of the combat entirely.
    pub fn remove_card(&mut self, id: InstanceId) -> Result<CardInstance, CombatError> {
        self.ensure_player_turn()?;

        let card = self.piles.remove_card(id)?;
        self.ledger.remove();

        debug!(instance = %id, "card removed");
        self.finish_operation();
        Ok(card)
    }

    // === Persistence ===

    /// Capture the full combat state.
    #[must_use]
    pub fn get_state(&self) -> CombatSnapshot {
        CombatSnapshot {
            status: self.status,
            turn: self.turn,
            action_sequence: self.action_sequence,
            piles: self.piles.clone(),
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            corruption: self.corruption,
            ids: self.ids.clone(),
            ledger: self.ledger,
            rng: self.rng.state(),
            history: self.history.clone(),
        }
    }

    /// Replace the combat state with a snapshot.
    ///
    /// The snapshot is validated first; an inconsistent one is rejected and
    /// the session is left untouched. Pending events are dropped.
    pub fn restore_state(&mut self, snapshot: CombatSnapshot) -> Result<(), CombatError> {
        if let Err(violation) = snapshot.validate() {
            warn!(%violation, "restore_state rejected");
            return Err(CombatError::Snapshot(violation.into()));
        }

        self.status = snapshot.status;
        self.turn = snapshot.turn;
        self.action_sequence = snapshot.action_sequence;
        self.piles = snapshot.piles;
        self.player = snapshot.player;
        self.enemies = snapshot.enemies;
        self.corruption = snapshot.corruption;
        self.ids = snapshot.ids;
        self.ledger = snapshot.ledger;
        self.rng = GameRng::from_state(&snapshot.rng);
        self.history = snapshot.history;
        self.events.clear();

        info!(turn = self.turn, status = ?self.status, "combat restored");
        Ok(())
    }

    // === Notifications ===

    /// Deliver every future event to `sink`, in emission order.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.subscribers.push(Box::new(sink));
    }

    /// Take all buffered events.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    // === Queries ===

    #[must_use]
    pub fn status(&self) -> CombatStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Current turn number. The first player turn is 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Living enemies, in turn order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[must_use]
    pub fn piles(&self) -> &PileStore {
        &self.piles
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        self.piles.hand()
    }

    #[must_use]
    pub fn corruption(&self) -> i64 {
        self.corruption.value()
    }

    #[must_use]
    pub fn ledger(&self) -> CardLedger {
        self.ledger
    }

    /// Accepted commands, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Run-level player stats to carry out of the combat.
    #[must_use]
    pub fn player_profile(&self) -> PlayerProfile {
        PlayerProfile {
            current_hp: self.player.combatant.current_hp,
            max_hp: self.player.combatant.max_hp,
            corruption: self.corruption.value(),
        }
    }

    // === Internals ===

    fn ensure_player_turn(&self) -> Result<(), CombatError> {
        match self.status {
            CombatStatus::NotStarted => Err(CombatError::NotStarted),
            CombatStatus::Victory | CombatStatus::Defeat => Err(CombatError::CombatOver),
            CombatStatus::PlayerTurn => Ok(()),
        }
    }

    fn record(&mut self, action: CombatAction, card: Option<InstanceId>) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord::new(action, card, self.turn, sequence));
    }

    /// Advance the turn counter, refill energy, clear player block and draw.
    fn begin_player_turn(&mut self, draw: usize) -> Vec<InstanceId> {
        self.turn += 1;
        self.action_sequence = 0;
        self.player.refill_energy();
        self.player.combatant.status.reset_block();

        self.events.push(CombatEvent::TurnStarted {
            turn: self.turn,
            energy: self.player.energy,
        });
        draw_cards(&mut self.piles, &mut self.rng, &mut self.events, draw)
    }

    fn remove_defeated_enemies(&mut self) -> Vec<EnemyId> {
        let defeated: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|e| e.is_defeated())
            .map(|e| e.id)
            .collect();
        if !defeated.is_empty() {
            self.enemies.retain(|e| !e.is_defeated());
            debug!(?defeated, remaining = self.enemies.len(), "enemies removed");
        }
        defeated
    }

    fn check_combat_end(&mut self) {
        if self.player.combatant.is_defeated() {
            self.status = CombatStatus::Defeat;
            self.events.push(CombatEvent::CombatDefeat { turn: self.turn });
            info!(turn = self.turn, "combat lost");
        } else if self.enemies.is_empty() {
            self.status = CombatStatus::Victory;
            self.events.push(CombatEvent::CombatVictory { turn: self.turn });
            info!(turn = self.turn, hp = self.player.combatant.current_hp, "combat won");
        }
    }

    /// Check invariants, then deliver new events to subscribers.
    fn finish_operation(&mut self) {
        self.enforce_invariants();
        self.events.deliver(&mut self.subscribers);
    }

    fn enforce_invariants(&mut self) {
        for violation in self.find_violations() {
            match self.config.invariant_policy {
                InvariantPolicy::Panic => panic!("combat invariant violated: {violation}"),
                InvariantPolicy::Repair => {
                    error!(%violation, "combat invariant violated, repairing");
                    self.repair(&violation);
                }
            }
        }
    }

    fn find_violations(&self) -> Vec<InvariantViolation> {
        let mut found = Vec::new();
        if let Err(v) = self.piles.verify(self.ledger.expected()) {
            found.push(v);
        }
        if let Err(v) = self.player.combatant.verify() {
            found.push(v);
        }
        found.extend(self.enemies.iter().filter_map(|e| e.verify().err()));
        if let Err(v) = self.corruption.verify() {
            found.push(v);
        }
        found
    }

    fn repair(&mut self, violation: &InvariantViolation) {
        match violation {
            InvariantViolation::PileCountMismatch { actual, .. } => self.ledger.reset_to(*actual),
            InvariantViolation::DuplicateInstance(_) => {
                self.piles.remove_duplicates();
                self.ledger.reset_to(self.piles.counts().total());
            }
            InvariantViolation::NegativeCounter { .. } | InvariantViolation::HpOutOfRange { .. } => {
                self.player.combatant.repair();
                for enemy in &mut self.enemies {
                    enemy.combatant.repair();
                }
            }
            InvariantViolation::CorruptionOutOfRange(_) => self.corruption.repair(),
            InvariantViolation::CursorOutOfRange { enemy } => {
                if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == *enemy) {
                    enemy.behavior.phase = enemy.selected_phase();
                    enemy.behavior.next_index = 0;
                    if enemy.intents().is_empty() {
                        enemy.behavior.phase = 0;
                    }
                }
            }
            // Only snapshot validation reports this.
            InvariantViolation::UnissuedId(_) => {}
        }
    }
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("status", &self.status)
            .field("turn", &self.turn)
            .field("player", &self.player)
            .field("enemies", &self.enemies.len())
            .field("piles", &self.piles.counts())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn idle_player() -> PlayerState {
    PlayerState::new(&PlayerProfile::new(0), 0)
}
