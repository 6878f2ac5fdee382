//! Card effect resolution.
//!
//! `EffectResolver` applies a card's effect list, in declared order, to the
//! player, an optional enemy target and the borrowed session context. The
//! session has already checked cost, playability and target legality.
//!
//! ## Formulas
//!
//! | Kind         | Rule                                                        |
//! |--------------|-------------------------------------------------------------|
//! | `damage`     | `max(value + strength, 0)`, x1.5 floored if target vulnerable; block first |
//! | `block`      | `max(value + dexterity, 0)` added to player block           |
//! | `draw`       | draw `value` cards (hand limit applies)                      |
//! | `energy`     | add `value` energy, not clamped                              |
//! | `vulnerable` | add stacks to the target                                     |
//! | `weak`       | add stacks to the target                                     |
//! | `strength`   | add to player strength                                       |
//! | `dexterity`  | add to player dexterity                                      |
//! | `heal`       | restore player hp up to max                                  |
//! | `selfDamage` | lose hp ignoring block, never below 1                        |
//! | `corruption` | change run corruption (thresholds reported)                  |

use tracing::debug;

use super::effect::{Effect, EffectKind};
use crate::cards::CardDefinition;
use crate::core::{numeric, CombatConfig, CombatantId, GameRng, InstanceId};
use crate::events::{CombatEvent, EventQueue};
use crate::piles::PileStore;
use crate::status::{Combatant, CorruptionMeter, DamageReport, PlayerState, StatusKind, StatusTracker};

/// Session state the resolver may touch besides the combatants.
pub struct ResolverContext<'a> {
    pub piles: &'a mut PileStore,
    pub rng: &'a mut GameRng,
    pub events: &'a mut EventQueue,
    pub corruption: &'a mut CorruptionMeter,
    pub config: &'a CombatConfig,
}

/// What one card resolution did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Hp removed from the target.
    pub damage_dealt: i64,
    /// Damage absorbed by the target's block.
    pub damage_blocked: i64,
    pub block_gained: i64,
    pub cards_drawn: Vec<InstanceId>,
    pub energy_gained: i64,
    pub healed: i64,
    pub self_damage: i64,
    pub corruption_delta: i64,
    /// Targeted effects skipped for lack of a living target.
    pub skipped: usize,
    /// The target was alive before resolution and is at 0 hp after it.
    pub target_defeated: bool,
}

/// Applies card effects.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve every effect of `card`.
    pub fn resolve(
        card: &CardDefinition,
        player: &mut PlayerState,
        mut target: Option<&mut Combatant>,
        ctx: &mut ResolverContext<'_>,
    ) -> ResolutionResult {
        let mut result = ResolutionResult::default();
        let target_was_alive = target.as_deref().is_some_and(|t| !t.is_defeated());

        for effect in &card.effects {
            if effect.kind.is_targeted() {
                match target.as_deref_mut() {
                    Some(enemy) if !enemy.is_defeated() => {
                        Self::apply_targeted(*effect, player, enemy, ctx, &mut result);
                    }
                    _ => {
                        debug!(card = %card.id, kind = %effect.kind, "no living target, effect skipped");
                        result.skipped += 1;
                    }
                }
            } else {
                Self::apply_to_player(*effect, player, ctx, &mut result);
            }
        }

        if let Some(enemy) = target {
            if target_was_alive && enemy.is_defeated() {
                result.target_defeated = true;
                if let CombatantId::Enemy(id) = enemy.id {
                    ctx.events.push(CombatEvent::EnemyDefeated { enemy: id });
                }
            }
        }

        result
    }

    fn apply_targeted(
        effect: Effect,
        player: &PlayerState,
        target: &mut Combatant,
        ctx: &mut ResolverContext<'_>,
        result: &mut ResolutionResult,
    ) {
        match effect.kind {
            EffectKind::Damage => {
                let amount = card_damage(effect.value, player.status(), &target.status);
                let report = target.take_damage(amount);
                result.damage_dealt += report.hp_lost;
                result.damage_blocked += report.blocked;
                ctx.events.push(damage_event(target, report));
            }
            EffectKind::Vulnerable => {
                let total = target.status.apply_vulnerable(effect.value);
                ctx.events.push(status_event(target.id, StatusKind::Vulnerable, effect.value, total));
            }
            EffectKind::Weak => {
                let total = target.status.apply_weak(effect.value);
                ctx.events.push(status_event(target.id, StatusKind::Weak, effect.value, total));
            }
            _ => {}
        }
    }

    fn apply_to_player(
        effect: Effect,
        player: &mut PlayerState,
        ctx: &mut ResolverContext<'_>,
        result: &mut ResolutionResult,
    ) {
        let me = player.combatant.id;
        let status = &mut player.combatant.status;

        match effect.kind {
            EffectKind::Block => {
                let amount = effect.value.saturating_add(status.dexterity).max(0);
                let gained = status.add_block(amount);
                result.block_gained += gained;
                if gained > 0 {
                    ctx.events.push(CombatEvent::BlockGained {
                        combatant: me,
                        amount: gained,
                        total: status.block,
                    });
                }
            }
            EffectKind::Draw => {
                let count = usize::try_from(effect.value).unwrap_or(0);
                let drawn = draw_cards(ctx.piles, ctx.rng, ctx.events, count);
                result.cards_drawn.extend(drawn);
            }
            EffectKind::Energy => {
                let before = player.energy;
                player.gain_energy(effect.value);
                result.energy_gained += player.energy - before;
            }
            EffectKind::Strength => {
                let total = status.add_strength(effect.value);
                ctx.events.push(status_event(me, StatusKind::Strength, effect.value, total));
            }
            EffectKind::Dexterity => {
                let total = status.add_dexterity(effect.value);
                ctx.events.push(status_event(me, StatusKind::Dexterity, effect.value, total));
            }
            EffectKind::Heal => {
                let healed = player.combatant.heal(effect.value);
                result.healed += healed;
                if healed > 0 {
                    ctx.events.push(CombatEvent::Healed {
                        combatant: me,
                        amount: healed,
                        hp: player.combatant.current_hp,
                    });
                }
            }
            EffectKind::SelfDamage => {
                let lost = player.combatant.lose_hp_nonlethal(effect.value);
                result.self_damage += lost;
                if lost > 0 {
                    ctx.events.push(CombatEvent::PlayerDamaged {
                        blocked: 0,
                        hp_lost: lost,
                        hp: player.combatant.current_hp,
                    });
                }
            }
            EffectKind::Corruption => {
                result.corruption_delta +=
                    apply_corruption(ctx.corruption, &ctx.config.corruption_thresholds, ctx.events, effect.value);
            }
            EffectKind::Damage | EffectKind::Vulnerable | EffectKind::Weak => {}
        }
    }
}

/// Card damage against a target: `max(value + strength, 0)`, then x1.5
/// floored if the target is vulnerable.
#[must_use]
pub fn card_damage(value: i64, attacker: &StatusTracker, defender: &StatusTracker) -> i64 {
    let amount = value.saturating_add(attacker.strength).max(0);
    if defender.is_vulnerable() {
        numeric::vulnerable_scale(amount)
    } else {
        amount
    }
}

/// Draw through the pile store, reporting draws and any reshuffle in the
/// order they happened.
pub fn draw_cards(
    piles: &mut PileStore,
    rng: &mut GameRng,
    events: &mut EventQueue,
    count: usize,
) -> Vec<InstanceId> {
    let draw_before = piles.counts().draw;
    let discard_before = piles.counts().discard;
    let outcome = piles.draw(count, rng);

    // A reshuffle only happens once the draw pile is exhausted.
    let before_reshuffle = if outcome.reshuffled {
        draw_before.min(outcome.drawn.len())
    } else {
        outcome.drawn.len()
    };

    for &instance in &outcome.drawn[..before_reshuffle] {
        events.push(CombatEvent::CardDrawn { instance });
    }
    if outcome.reshuffled {
        events.push(CombatEvent::PileReshuffled { cards: discard_before });
    }
    for &instance in &outcome.drawn[before_reshuffle..] {
        events.push(CombatEvent::CardDrawn { instance });
    }

    if outcome.hand_limited {
        debug!(unfulfilled = outcome.unfulfilled, "hand full, draw stopped");
    }
    outcome.drawn
}

/// Change corruption and report the change and any thresholds crossed.
///
/// Returns the applied delta after clamping.
pub fn apply_corruption(
    meter: &mut CorruptionMeter,
    thresholds: &[i64],
    events: &mut EventQueue,
    delta: i64,
) -> i64 {
    let change = meter.apply(delta, thresholds);
    if change.is_noop() {
        return 0;
    }

    events.push(CombatEvent::CorruptionChanged {
        before: change.before,
        after: change.after,
    });
    for &threshold in &change.crossed {
        debug!(threshold, value = change.after, "corruption threshold crossed");
        events.push(CombatEvent::CorruptionThreshold {
            threshold,
            value: change.after,
        });
    }
    change.delta()
}

/// Damage notification for whichever side was hit.
#[must_use]
pub fn damage_event(target: &Combatant, report: DamageReport) -> CombatEvent {
    match target.id {
        CombatantId::Player => CombatEvent::PlayerDamaged {
            blocked: report.blocked,
            hp_lost: report.hp_lost,
            hp: target.current_hp,
        },
        CombatantId::Enemy(enemy) => CombatEvent::EnemyDamaged {
            enemy,
            blocked: report.blocked,
            hp_lost: report.hp_lost,
            hp: target.current_hp,
        },
    }
}

/// Status change notification.
#[must_use]
pub fn status_event(combatant: CombatantId, status: StatusKind, amount: i64, total: i64) -> CombatEvent {
    CombatEvent::StatusApplied {
        combatant,
        status,
        amount,
        total,
    }
}
