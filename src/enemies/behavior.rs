//! Enemy behavior at runtime.
//!
//! Each enemy always has a declared intent, visible to the player before
//! the enemy acts. On its turn slot an enemy:
//!
//! 1. clears its own block,
//! 2. re-evaluates its phase (phased enemies only),
//! 3. executes the declared intent,
//! 4. declares the next intent.
//!
//! ## Phase selection
//!
//! The phase table is sorted by threshold descending. A phase qualifies
//! while `hp * 100 <= threshold * max_hp`; the deepest qualifying phase is
//! selected, or the first phase when none qualifies. A changed selection
//! transitions exactly once: the cursor restarts at the new phase's first
//! intent and `on_enter` is applied. The intent declared before the
//! transition still executes this turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::definition::{EnemyDefinition, IntentSource};
use super::intent::{BuffStat, DebuffKind, Intent};
use crate::core::{numeric, CombatantId, ContentError, EnemyId, InvariantViolation};
use crate::effects::{apply_corruption, damage_event, status_event};
use crate::events::{CombatEvent, EventQueue};
use crate::status::{Combatant, CorruptionMeter, PlayerState, StatusKind, StatusTracker};

/// Session state an intent may touch besides the two combatants.
pub struct IntentContext<'a> {
    pub events: &'a mut EventQueue,
    pub corruption: &'a mut CorruptionMeter,
    pub thresholds: &'a [i64],
}

/// Cursor state for intent generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyBehavior {
    /// The intent the enemy will execute on its next turn slot.
    pub declared: Intent,
    /// Index into the active intent list of the intent declared next.
    pub next_index: usize,
    /// Active phase index. Always 0 for cycling enemies.
    pub phase: usize,
}

/// What one enemy turn slot did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyTurnReport {
    pub executed: Intent,
    /// `(from, to)` when the phase changed this turn.
    pub phase_change: Option<(usize, usize)>,
    /// Hp the player lost to this enemy.
    pub damage_to_player: i64,
    /// Block cleared at the start of the slot.
    pub block_cleared: i64,
}

/// An enemy in combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub definition: EnemyDefinition,
    pub combatant: Combatant,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    /// Spawn at full hp with the first intent declared.
    ///
    /// A phased enemy starts in the phase its hp selects, without applying
    /// that phase's `on_enter`.
    pub fn new(id: EnemyId, definition: EnemyDefinition) -> Result<Self, ContentError> {
        definition.validate()?;

        let combatant = Combatant::new(CombatantId::Enemy(id), definition.max_hp);
        let phase = select_phase(&definition.source, &combatant);
        let intents = intent_list(&definition.source, phase);
        let declared = *intents.first().ok_or_else(|| ContentError::NoIntents {
            enemy: definition.id.clone(),
        })?;
        let next_index = 1 % intents.len();

        Ok(Self {
            id,
            definition,
            combatant,
            behavior: EnemyBehavior {
                declared,
                next_index,
                phase,
            },
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn declared_intent(&self) -> Intent {
        self.behavior.declared
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.combatant.is_defeated()
    }

    /// The intent list the cursor walks.
    #[must_use]
    pub fn intents(&self) -> &[Intent] {
        intent_list(&self.definition.source, self.behavior.phase)
    }

    /// Phase the current hp selects.
    #[must_use]
    pub fn selected_phase(&self) -> usize {
        select_phase(&self.definition.source, &self.combatant)
    }

    /// Run this enemy's turn slot against the player.
    pub fn take_turn(&mut self, player: &mut PlayerState, ctx: &mut IntentContext<'_>) -> EnemyTurnReport {
        let block_cleared = self.combatant.status.reset_block();
        let phase_change = self.evaluate_phase(ctx);

        let executed = self.behavior.declared;
        debug!(enemy = %self.id, intent = %executed, "enemy acts");
        let damage_to_player = self.execute(executed, player, ctx);

        self.roll_next_intent();

        EnemyTurnReport {
            executed,
            phase_change,
            damage_to_player,
            block_cleared,
        }
    }

    /// Move to the phase hp selects, if it changed. Returns `(from, to)`.
    pub fn evaluate_phase(&mut self, ctx: &mut IntentContext<'_>) -> Option<(usize, usize)> {
        let IntentSource::Phased(phases) = &self.definition.source else {
            return None;
        };

        let from = self.behavior.phase;
        let to = select_phase(&self.definition.source, &self.combatant);
        if to == from {
            return None;
        }
        let on_enter = phases.get(to).and_then(|p| p.on_enter);

        info!(enemy = %self.id, from, to, hp = self.combatant.current_hp, "phase transition");
        self.behavior.phase = to;
        self.behavior.next_index = 0;
        ctx.events.push(CombatEvent::PhaseChanged {
            enemy: self.id,
            from,
            to,
        });

        if let Some(intent) = on_enter {
            self.apply_to_self(intent, ctx.events);
        }
        Some((from, to))
    }

    /// Declare the next intent from the active list, wrapping.
    pub fn roll_next_intent(&mut self) {
        let intents = self.intents();
        if intents.is_empty() {
            return;
        }
        let index = self.behavior.next_index % intents.len();
        let declared = intents[index];
        let next_index = (index + 1) % intents.len();

        self.behavior.declared = declared;
        self.behavior.next_index = next_index;
    }

    /// Execute one intent. Returns hp the player lost.
    pub fn execute(&mut self, intent: Intent, player: &mut PlayerState, ctx: &mut IntentContext<'_>) -> i64 {
        match intent {
            Intent::Attack { damage, hits }
            | Intent::HeavyAttack { damage, hits }
            | Intent::MultiAttack { damage, hits } => {
                let mut hp_lost = 0;
                for _ in 0..hits {
                    if player.combatant.is_defeated() {
                        break;
                    }
                    let amount = attack_damage(damage, &self.combatant.status, player.status());
                    let report = player.combatant.take_damage(amount);
                    hp_lost += report.hp_lost;
                    ctx.events.push(damage_event(&player.combatant, report));
                }
                hp_lost
            }
            Intent::Debuff { kind, amount } => {
                let status = &mut player.combatant.status;
                match kind {
                    DebuffKind::Corruption => {
                        apply_corruption(ctx.corruption, ctx.thresholds, ctx.events, amount);
                    }
                    DebuffKind::Weak => {
                        let total = status.apply_weak(amount);
                        ctx.events.push(status_event(CombatantId::Player, StatusKind::Weak, amount, total));
                    }
                    DebuffKind::Vulnerable => {
                        let total = status.apply_vulnerable(amount);
                        ctx.events.push(status_event(CombatantId::Player, StatusKind::Vulnerable, amount, total));
                    }
                }
                0
            }
            Intent::Block { .. } | Intent::Buff { .. } | Intent::Heal { .. } => {
                self.apply_to_self(intent, ctx.events);
                0
            }
        }
    }

    fn apply_to_self(&mut self, intent: Intent, events: &mut EventQueue) {
        let me = self.combatant.id;
        match intent {
            Intent::Block { amount } | Intent::Buff { stat: BuffStat::Armor, amount } => {
                let gained = self.combatant.status.add_block(amount);
                events.push(CombatEvent::BlockGained {
                    combatant: me,
                    amount: gained,
                    total: self.combatant.status.block,
                });
            }
            Intent::Buff { stat: BuffStat::Strength, amount } => {
                let total = self.combatant.status.add_strength(amount);
                events.push(status_event(me, StatusKind::Strength, amount, total));
            }
            Intent::Heal { amount } => {
                let healed = self.combatant.heal(amount);
                events.push(CombatEvent::Healed {
                    combatant: me,
                    amount: healed,
                    hp: self.combatant.current_hp,
                });
            }
            _ => {}
        }
    }

    /// Check hp, status and cursor bounds.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        self.combatant.verify()?;
        let cursor_ok = match &self.definition.source {
            IntentSource::Cycle(intents) => {
                self.behavior.phase == 0 && self.behavior.next_index < intents.len()
            }
            IntentSource::Phased(phases) => phases
                .get(self.behavior.phase)
                .is_some_and(|p| self.behavior.next_index < p.intents.len()),
        };
        if cursor_ok {
            Ok(())
        } else {
            Err(InvariantViolation::CursorOutOfRange { enemy: self.id })
        }
    }
}

/// Enemy attack damage per hit: `damage + strength`, x0.75 floored if the
/// attacker is weak, x1.5 floored if the defender is vulnerable, floor 0.
#[must_use]
pub fn attack_damage(damage: i64, attacker: &StatusTracker, defender: &StatusTracker) -> i64 {
    let mut amount = numeric::add(damage, attacker.strength, "enemy damage");
    if attacker.is_weak() {
        amount = numeric::weak_scale(amount);
    }
    if defender.is_vulnerable() {
        amount = numeric::vulnerable_scale(amount);
    }
    amount.max(0)
}

fn select_phase(source: &IntentSource, combatant: &Combatant) -> usize {
    match source {
        IntentSource::Cycle(_) => 0,
        IntentSource::Phased(phases) => phases
            .iter()
            .rposition(|p| combatant.hp_at_or_below_percent(p.hp_threshold))
            .unwrap_or(0),
    }
}

fn intent_list(source: &IntentSource, phase: usize) -> &[Intent] {
    match source {
        IntentSource::Cycle(intents) => intents,
        IntentSource::Phased(phases) => phases.get(phase).map_or(&[], |p| p.intents.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{IntentKind, Phase};
    use crate::status::PlayerProfile;

    struct Fixture {
        events: EventQueue,
        corruption: CorruptionMeter,
        player: PlayerState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                events: EventQueue::new(),
                corruption: CorruptionMeter::new(0),
                player: PlayerState::new(&PlayerProfile::new(80), 3),
            }
        }

        fn turn(&mut self, enemy: &mut Enemy) -> EnemyTurnReport {
            let mut ctx = IntentContext {
                events: &mut self.events,
                corruption: &mut self.corruption,
                thresholds: &[25, 50, 75, 100],
            };
            enemy.take_turn(&mut self.player, &mut ctx)
        }
    }

    fn attack(damage: i64) -> Intent {
        Intent::Attack { damage, hits: 1 }
    }

    fn cultist() -> Enemy {
        let def = EnemyDefinition::cycling(
            "cultist",
            "Cultist",
            40,
            vec![attack(10), Intent::Block { amount: 6 }, Intent::Buff { stat: BuffStat::Strength, amount: 2 }],
        );
        Enemy::new(EnemyId(0), def).unwrap()
    }

    fn boss() -> Enemy {
        let phase = |name: &str, threshold, intents, on_enter| Phase {
            name: name.to_string(),
            hp_threshold: threshold,
            intents,
            on_enter,
        };
        let def = EnemyDefinition::phased(
            "king",
            "King",
            100,
            vec![
                phase("Calm", 100, vec![attack(8), Intent::Block { amount: 6 }], None),
                phase(
                    "Rage",
                    50,
                    vec![Intent::HeavyAttack { damage: 20, hits: 1 }],
                    Some(Intent::Buff { stat: BuffStat::Strength, amount: 3 }),
                ),
                phase(
                    "Despair",
                    20,
                    vec![Intent::MultiAttack { damage: 5, hits: 4 }],
                    Some(Intent::Heal { amount: 15 }),
                ),
            ],
        );
        Enemy::new(EnemyId(1), def).unwrap()
    }

    #[test]
    fn test_cycle_wraps() {
        let mut fx = Fixture::new();
        let mut enemy = cultist();

        let executed: Vec<_> = (0..4).map(|_| fx.turn(&mut enemy).executed.kind()).collect();
        assert_eq!(
            executed,
            vec![IntentKind::Attack, IntentKind::Block, IntentKind::Buff, IntentKind::Attack]
        );
        // Strength from the buff applies to the wrapped attack.
        assert_eq!(fx.player.combatant.current_hp, 80 - 10 - 12);
    }

    #[test]
    fn test_attack_hits_block_then_hp() {
        let mut fx = Fixture::new();
        let mut enemy = cultist();
        fx.player.combatant.status.add_block(5);

        let report = fx.turn(&mut enemy);
        assert_eq!(report.damage_to_player, 5);
        assert_eq!(fx.player.combatant.current_hp, 75);
        assert_eq!(fx.player.status().block, 0);
    }

    #[test]
    fn test_weak_and_vulnerable_modifiers() {
        let attacker = StatusTracker { weak: 1, ..StatusTracker::default() };
        let vulnerable = StatusTracker { vulnerable: 1, ..StatusTracker::default() };
        let plain = StatusTracker::default();

        assert_eq!(attack_damage(10, &attacker, &plain), 7);
        assert_eq!(attack_damage(10, &plain, &vulnerable), 15);
        // Weak first, then vulnerable: floor(floor(10 * 0.75) * 1.5).
        assert_eq!(attack_damage(10, &attacker, &vulnerable), 10);
        assert_eq!(attack_damage(2, &StatusTracker { strength: -5, ..plain.clone() }, &plain), 0);
    }

    #[test]
    fn test_own_block_cleared_at_turn_start() {
        let mut fx = Fixture::new();
        let mut enemy = cultist();
        enemy.combatant.status.add_block(9);

        let report = fx.turn(&mut enemy);
        assert_eq!(report.block_cleared, 9);
    }

    #[test]
    fn test_block_intent_survives_until_next_slot() {
        let mut fx = Fixture::new();
        let mut enemy = cultist();
        fx.turn(&mut enemy);
        fx.turn(&mut enemy);
        assert_eq!(enemy.combatant.status.block, 6);
    }

    #[test]
    fn test_initial_phase_without_on_enter() {
        let enemy = boss();
        assert_eq!(enemy.behavior.phase, 0);
        assert_eq!(enemy.declared_intent(), attack(8));
        assert_eq!(enemy.combatant.status.strength, 0);
    }

    #[test]
    fn test_phase_transition_once() {
        let mut fx = Fixture::new();
        let mut enemy = boss();
        enemy.combatant.current_hp = 50;

        let report = fx.turn(&mut enemy);
        assert_eq!(report.phase_change, Some((0, 1)));
        // The already declared attack executes with the new strength.
        assert_eq!(report.executed, attack(8));
        assert_eq!(report.damage_to_player, 11);
        assert_eq!(enemy.declared_intent(), Intent::HeavyAttack { damage: 20, hits: 1 });

        let report = fx.turn(&mut enemy);
        assert_eq!(report.phase_change, None);
        assert_eq!(enemy.combatant.status.strength, 3);
        assert_eq!(report.damage_to_player, 23);

        let changes = fx
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_phase_skip_goes_deepest() {
        let mut fx = Fixture::new();
        let mut enemy = boss();
        enemy.combatant.current_hp = 10;

        let report = fx.turn(&mut enemy);
        assert_eq!(report.phase_change, Some((0, 2)));
        // Only the entered phase's on_enter applies.
        assert_eq!(enemy.combatant.status.strength, 0);
        assert_eq!(enemy.combatant.current_hp, 25);
    }

    #[test]
    fn test_threshold_boundary_is_exact() {
        let mut enemy = boss();
        enemy.combatant.current_hp = 51;
        assert_eq!(enemy.selected_phase(), 0);
        enemy.combatant.current_hp = 50;
        assert_eq!(enemy.selected_phase(), 1);
    }

    #[test]
    fn test_multi_attack_stops_on_defeat() {
        let mut fx = Fixture::new();
        let mut enemy = boss();
        enemy.combatant.current_hp = 10;
        fx.turn(&mut enemy);
        assert_eq!(enemy.declared_intent(), Intent::MultiAttack { damage: 5, hits: 4 });

        fx.events.clear();
        fx.player.combatant.current_hp = 7;
        fx.turn(&mut enemy);
        assert!(fx.player.combatant.is_defeated());
        let hits = fx
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::PlayerDamaged { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_debuff_corruption() {
        let mut fx = Fixture::new();
        let def = EnemyDefinition::cycling(
            "wisp",
            "Wisp",
            20,
            vec![Intent::Debuff { kind: DebuffKind::Corruption, amount: 30 }],
        );
        let mut enemy = Enemy::new(EnemyId(2), def).unwrap();

        fx.turn(&mut enemy);
        assert_eq!(fx.corruption.value(), 30);
        assert!(fx
            .events
            .iter()
            .any(|e| *e == CombatEvent::CorruptionThreshold { threshold: 25, value: 30 }));
    }

    #[test]
    fn test_invalid_definition_rejected() {
        let def = EnemyDefinition::cycling("empty", "Empty", 10, vec![]);
        assert!(Enemy::new(EnemyId(3), def).is_err());
    }

    #[test]
    fn test_verify_cursor() {
        let mut enemy = cultist();
        assert!(enemy.verify().is_ok());
        enemy.behavior.next_index = 9;
        assert_eq!(enemy.verify(), Err(InvariantViolation::CursorOutOfRange { enemy: EnemyId(0) }));
    }
}
