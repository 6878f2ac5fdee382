//! Boss phase tests.
//!
//! These tests run the embedded Hollow King through a session:
//! - Phase selection from hp percentage
//! - `onEnter` effects applied once per transition
//! - Intent cursor reset on transition
//! - Phase notifications never repeating within a band

use roguedeck::content;
use roguedeck::core::CombatConfig;
use roguedeck::enemies::Intent;
use roguedeck::events::{CombatEvent, EventLog};
use roguedeck::session::CombatSession;
use roguedeck::status::PlayerProfile;

fn boss_session(seed: u64) -> (CombatSession, EventLog) {
    let cards = content::card_registry().unwrap();
    let enemies = content::enemy_registry().unwrap();
    let defend = cards.get("defend").unwrap().clone();
    let encounter = content::encounter(&enemies, "boss").unwrap();

    let log = EventLog::new();
    let mut session = CombatSession::new(CombatConfig::default(), seed);
    session.subscribe(log.clone());
    session
        .start_combat(vec![defend; 10], encounter, PlayerProfile::new(200))
        .unwrap();
    (session, log)
}

fn set_boss_hp(session: &mut CombatSession, hp: i64) {
    let mut snapshot = session.get_state();
    snapshot.enemies[0].combatant.current_hp = hp;
    session.restore_state(snapshot).unwrap();
}

fn phase_changes(log: &EventLog) -> usize {
    log.count(|e| matches!(e, CombatEvent::PhaseChanged { .. }))
}

/// Test that the boss opens in its first phase with no transition.
#[test]
fn test_boss_starts_in_first_phase() {
    let (session, log) = boss_session(1);
    let boss = &session.enemies()[0];

    assert_eq!(boss.behavior.phase, 0);
    assert_eq!(boss.declared_intent(), Intent::Attack { damage: 12, hits: 1 });
    assert_eq!(phase_changes(&log), 0);
}

/// Test the Regal to Wrath transition at 60%.
#[test]
fn test_wrath_transition() {
    let (mut session, log) = boss_session(2);
    set_boss_hp(&mut session, 72);

    let summary = session.end_turn().unwrap();
    let (_, report) = &summary.enemy_turns[0];
    assert_eq!(report.phase_change, Some((0, 1)));

    let boss = &session.enemies()[0];
    assert_eq!(boss.behavior.phase, 1);
    assert_eq!(boss.combatant.status.strength, 2);
    // The declared Regal attack still lands, boosted by the new strength.
    assert_eq!(report.executed, Intent::Attack { damage: 12, hits: 1 });
    assert_eq!(summary.damage_taken, 14);
    // The cursor restarted at the top of the Wrath list.
    assert_eq!(boss.declared_intent(), Intent::HeavyAttack { damage: 22, hits: 1 });

    assert_eq!(phase_changes(&log), 1);
    assert!(log.events().contains(&CombatEvent::PhaseChanged {
        enemy: boss.id,
        from: 0,
        to: 1,
    }));
}

/// Test that a boss one hp above the threshold stays put.
#[test]
fn test_no_transition_above_threshold() {
    let (mut session, log) = boss_session(3);
    set_boss_hp(&mut session, 73);

    session.end_turn().unwrap();
    assert_eq!(session.enemies()[0].behavior.phase, 0);
    assert_eq!(phase_changes(&log), 0);
}

/// Test that the phase notification does not repeat within one band.
#[test]
fn test_transition_fires_once() {
    let (mut session, log) = boss_session(4);
    set_boss_hp(&mut session, 70);

    session.end_turn().unwrap();
    set_boss_hp(&mut session, 50);
    session.end_turn().unwrap();
    session.end_turn().unwrap();

    assert_eq!(phase_changes(&log), 1);
    assert_eq!(session.enemies()[0].combatant.status.strength, 2);
}

/// Test a big hit skipping straight to the last phase.
#[test]
fn test_skip_to_last_stand() {
    let (mut session, log) = boss_session(5);
    set_boss_hp(&mut session, 10);

    let summary = session.end_turn().unwrap();
    assert_eq!(summary.enemy_turns[0].1.phase_change, Some((0, 2)));

    let boss = &session.enemies()[0];
    // Only Last Stand's heal applies; Wrath's buff is skipped.
    assert_eq!(boss.combatant.current_hp, 30);
    assert_eq!(boss.combatant.status.strength, 0);
    assert_eq!(boss.declared_intent(), Intent::Debuff {
        kind: roguedeck::enemies::DebuffKind::Corruption,
        amount: 6,
    });
    assert_eq!(phase_changes(&log), 1);
    assert_eq!(
        log.count(|e| matches!(e, CombatEvent::Healed { amount: 20, .. })),
        1
    );
}

/// Test that Last Stand's corruption debuff reaches the run meter.
#[test]
fn test_last_stand_corrupts_player() {
    let (mut session, log) = boss_session(6);
    set_boss_hp(&mut session, 10);
    session.end_turn().unwrap();

    session.end_turn().unwrap();
    assert_eq!(session.corruption(), 6);
    assert!(log.events().contains(&CombatEvent::CorruptionChanged { before: 0, after: 6 }));
}
