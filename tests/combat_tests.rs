//! Combat flow tests.
//!
//! These tests drive a `CombatSession` through whole turns:
//! - Card play against live enemies, with and without vulnerable
//! - Enemy attacks against player block
//! - Corruption threshold notifications
//! - Victory, defeat and rejected commands

use roguedeck::cards::{CardDefinition, CardRegistry, CardType};
use roguedeck::content;
use roguedeck::core::{CombatAction, CombatConfig, CombatError};
use roguedeck::effects::Effect;
use roguedeck::enemies::{EnemyDefinition, Intent};
use roguedeck::events::{CombatEvent, EventLog};
use roguedeck::piles::PileKind;
use roguedeck::session::{CombatSession, CombatStatus};
use roguedeck::status::PlayerProfile;

fn cards() -> CardRegistry {
    content::card_registry().expect("embedded cards load")
}

fn dummy(hp: i64, intent: Intent) -> EnemyDefinition {
    EnemyDefinition::cycling("dummy", "Training Dummy", hp, vec![intent])
}

/// Route library logs to the test output; `RUST_LOG=roguedeck=debug` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn hand_index(session: &CombatSession, card: &str) -> usize {
    session
        .hand()
        .iter()
        .position(|c| c.card_id().as_str() == card)
        .expect("card should be in hand")
}

/// Test Strike, then Bash against an enemy made vulnerable.
#[test]
fn test_strike_then_bash_on_vulnerable_enemy() {
    let cards = cards();
    let deck = content::starter_deck(&cards).unwrap();
    let config = CombatConfig::default().with_starting_hand_size(10);
    let mut session = CombatSession::new(config, 7);
    session
        .start_combat(deck, vec![dummy(20, Intent::Attack { damage: 1, hits: 1 })], PlayerProfile::new(80))
        .unwrap();
    assert_eq!(session.hand().len(), 10);

    let outcome = session.play_card(hand_index(&session, "strike"), None).unwrap();
    assert_eq!(outcome.resolution.damage_dealt, 6);
    assert_eq!(session.enemies()[0].combatant.current_hp, 14);

    let mut snapshot = session.get_state();
    snapshot.enemies[0].combatant.status.apply_vulnerable(2);
    session.restore_state(snapshot).unwrap();

    let outcome = session.play_card(hand_index(&session, "bash"), None).unwrap();
    assert_eq!(outcome.resolution.damage_dealt, 12);
    assert_eq!(session.enemies()[0].combatant.current_hp, 2);
    assert_eq!(session.enemies()[0].combatant.status.vulnerable, 4);
    assert_eq!(session.player().energy, 0);
}

/// Test that Bash's own vulnerable boosts the next attack, not itself.
#[test]
fn test_bash_then_strike() {
    let cards = cards();
    let deck = content::starter_deck(&cards).unwrap();
    let config = CombatConfig::default().with_starting_hand_size(10);
    let mut session = CombatSession::new(config, 7);
    session
        .start_combat(deck, vec![dummy(30, Intent::Attack { damage: 1, hits: 1 })], PlayerProfile::new(80))
        .unwrap();

    let bash = session.play_card(hand_index(&session, "bash"), None).unwrap();
    assert_eq!(bash.resolution.damage_dealt, 8);

    let strike = session.play_card(hand_index(&session, "strike"), None).unwrap();
    assert_eq!(strike.resolution.damage_dealt, 9);
    assert_eq!(session.enemies()[0].combatant.current_hp, 13);
}

/// Test that vulnerable stops scaling damage once its stacks run out.
#[test]
fn test_vulnerable_expires() {
    let cards = cards();
    let mut deck = vec![cards.get("bash").unwrap().clone()];
    deck.extend(std::iter::repeat(cards.get("strike").unwrap().clone()).take(4));

    let mut session = CombatSession::new(CombatConfig::default(), 13);
    session
        .start_combat(deck, vec![dummy(40, Intent::Attack { damage: 1, hits: 1 })], PlayerProfile::new(80))
        .unwrap();

    let bash = session.play_card(hand_index(&session, "bash"), None).unwrap();
    assert_eq!(bash.resolution.damage_dealt, 8);
    assert_eq!(session.enemies()[0].combatant.status.vulnerable, 2);

    // Stacks tick at the start of the enemy's turn.
    session.end_turn().unwrap();
    assert_eq!(session.enemies()[0].combatant.status.vulnerable, 1);
    let strike = session.play_card(hand_index(&session, "strike"), None).unwrap();
    assert_eq!(strike.resolution.damage_dealt, 9);

    session.end_turn().unwrap();
    assert_eq!(session.enemies()[0].combatant.status.vulnerable, 0);
    let strike = session.play_card(hand_index(&session, "strike"), None).unwrap();
    assert_eq!(strike.resolution.damage_dealt, 6);
    assert_eq!(session.enemies()[0].combatant.current_hp, 40 - 8 - 9 - 6);
}

/// Test an enemy attack of 10 against 5 block.
#[test]
fn test_enemy_attack_hits_block_first() {
    let cards = cards();
    let defend = cards.get("defend").unwrap().clone();
    let log = EventLog::new();

    let mut session = CombatSession::new(CombatConfig::default(), 11);
    session.subscribe(log.clone());
    session
        .start_combat(vec![defend; 5], vec![dummy(40, Intent::Attack { damage: 10, hits: 1 })], PlayerProfile::new(50))
        .unwrap();

    session.play_card(0, None).unwrap();
    assert_eq!(session.player().combatant.status.block, 5);

    let summary = session.end_turn().unwrap();
    assert_eq!(summary.damage_taken, 5);
    assert_eq!(session.player().combatant.current_hp, 45);
    assert_eq!(session.player().combatant.status.block, 0);
    assert!(log.events().contains(&CombatEvent::PlayerDamaged {
        blocked: 5,
        hp_lost: 5,
        hp: 45,
    }));
}

/// Test that block gained this turn does not carry past the next turn start.
#[test]
fn test_player_block_clears_on_turn_start() {
    let cards = cards();
    let defend = cards.get("defend").unwrap().clone();
    let mut session = CombatSession::new(CombatConfig::default(), 3);
    session
        .start_combat(vec![defend; 10], vec![dummy(40, Intent::Block { amount: 3 })], PlayerProfile::new(50))
        .unwrap();

    session.play_card(0, None).unwrap();
    session.play_card(0, None).unwrap();
    assert_eq!(session.player().combatant.status.block, 10);

    session.end_turn().unwrap();
    assert_eq!(session.player().combatant.status.block, 0);
    // Enemy block survives into the player turn.
    assert_eq!(session.enemies()[0].combatant.status.block, 3);
}

/// Test corruption going from 24 to 27 fires the 25 threshold once.
#[test]
fn test_corruption_crosses_threshold_once() {
    let pact = CardDefinition::new("pact", "Pact", CardType::Corrupted, 0).with_effect(Effect::corruption(3));
    let log = EventLog::new();

    let mut session = CombatSession::new(CombatConfig::default(), 5);
    session.subscribe(log.clone());
    session
        .start_combat(
            vec![pact; 5],
            vec![dummy(20, Intent::Attack { damage: 1, hits: 1 })],
            PlayerProfile::new(50).with_corruption(24),
        )
        .unwrap();

    session.play_card(0, None).unwrap();
    assert_eq!(session.corruption(), 27);

    let crossings = log.count(|e| matches!(e, CombatEvent::CorruptionThreshold { .. }));
    assert_eq!(crossings, 1);
    assert!(log.events().contains(&CombatEvent::CorruptionThreshold {
        threshold: 25,
        value: 27,
    }));

    // Staying above the threshold does not fire it again.
    session.play_card(0, None).unwrap();
    assert_eq!(session.corruption(), 30);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::CorruptionThreshold { .. })), 1);
    assert_eq!(session.player_profile().corruption, 30);
}

/// Test that killing the last enemy ends the combat in victory.
#[test]
fn test_victory() {
    let cards = cards();
    let strike = cards.get("strike").unwrap().clone();
    let mut session = CombatSession::new(CombatConfig::default(), 1);
    session
        .start_combat(vec![strike; 5], vec![dummy(12, Intent::Attack { damage: 1, hits: 1 })], PlayerProfile::new(50))
        .unwrap();

    let first = session.play_card(0, None).unwrap();
    assert!(first.defeated.is_empty());

    let second = session.play_card(0, None).unwrap();
    assert_eq!(second.defeated.len(), 1);
    assert_eq!(second.status, CombatStatus::Victory);
    assert!(session.enemies().is_empty());

    assert!(matches!(session.play_card(0, None), Err(CombatError::CombatOver)));
    assert!(matches!(session.end_turn(), Err(CombatError::CombatOver)));
    assert!(session.legal_plays().is_empty());
}

/// Test that the enemy phase can defeat the player.
#[test]
fn test_defeat() {
    let cards = cards();
    let defend = cards.get("defend").unwrap().clone();
    let log = EventLog::new();

    let mut session = CombatSession::new(CombatConfig::default(), 1);
    session.subscribe(log.clone());
    session
        .start_combat(
            vec![defend; 5],
            vec![
                dummy(40, Intent::Attack { damage: 15, hits: 1 }),
                dummy(40, Intent::Attack { damage: 15, hits: 1 }),
            ],
            PlayerProfile::new(50).with_hp(10),
        )
        .unwrap();

    let summary = session.end_turn().unwrap();
    assert_eq!(summary.status, CombatStatus::Defeat);
    // The second enemy never acts once the player is down.
    assert_eq!(summary.enemy_turns.len(), 1);
    assert_eq!(session.player().combatant.current_hp, 0);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::CombatDefeat { .. })), 1);
}

/// Test that a targeted card needs an explicit target among several enemies.
#[test]
fn test_targeting_with_two_enemies() {
    let cards = cards();
    let strike = cards.get("strike").unwrap().clone();
    let mut session = CombatSession::new(CombatConfig::default(), 9);
    session
        .start_combat(
            vec![strike; 5],
            vec![
                dummy(20, Intent::Attack { damage: 1, hits: 1 }),
                dummy(20, Intent::Attack { damage: 1, hits: 1 }),
            ],
            PlayerProfile::new(50),
        )
        .unwrap();

    assert!(matches!(
        session.play_card(0, None),
        Err(CombatError::TargetRequired { enemies: 2 })
    ));
    assert!(matches!(
        session.play_card(0, Some(2)),
        Err(CombatError::InvalidTarget { index: 2, enemies: 2 })
    ));
    assert_eq!(session.player().energy, 3);
    assert_eq!(session.hand().len(), 5);

    let outcome = session.play_card(0, Some(1)).unwrap();
    assert_eq!(outcome.target, Some(session.enemies()[1].id));
    assert_eq!(session.enemies()[1].combatant.current_hp, 14);
    assert_eq!(session.enemies()[0].combatant.current_hp, 20);
}

/// Test that rejected plays leave the session untouched.
#[test]
fn test_rejections_do_not_mutate() {
    let cards = cards();
    let bash = cards.get("bash").unwrap().clone();
    let regret = cards.get("regret").unwrap().clone();
    let mut deck = vec![bash; 4];
    deck.push(regret);

    let mut session = CombatSession::new(CombatConfig::default(), 2);
    session
        .start_combat(deck, vec![dummy(60, Intent::Attack { damage: 1, hits: 1 })], PlayerProfile::new(50))
        .unwrap();

    let before = session.get_state();
    assert!(matches!(
        session.play_card(hand_index(&session, "regret"), None),
        Err(CombatError::Unplayable(_))
    ));
    assert!(matches!(
        session.play_card(9, None),
        Err(CombatError::InvalidHandIndex { index: 9, hand_size: 5 })
    ));
    assert_eq!(session.get_state(), before);

    session.play_card(hand_index(&session, "bash"), None).unwrap();
    let before = session.get_state();
    assert!(matches!(
        session.play_card(hand_index(&session, "bash"), None),
        Err(CombatError::InsufficientEnergy { cost: 2, available: 1 })
    ));
    assert_eq!(session.get_state(), before);
}

/// Test that commands before start are rejected.
#[test]
fn test_not_started() {
    let mut session = CombatSession::new(CombatConfig::default(), 2);
    assert!(matches!(session.end_turn(), Err(CombatError::NotStarted)));
    assert!(matches!(session.play_card(0, None), Err(CombatError::NotStarted)));
    assert!(matches!(
        session.start_combat(Vec::new(), Vec::new(), PlayerProfile::new(10)),
        Err(CombatError::EmptyEncounter)
    ));
    assert_eq!(session.status(), CombatStatus::NotStarted);
}

/// Test that the discard pile is reshuffled when the draw pile runs out.
#[test]
fn test_reshuffle_across_turns() {
    let cards = cards();
    let defend = cards.get("defend").unwrap().clone();
    let log = EventLog::new();

    let mut session = CombatSession::new(CombatConfig::default(), 21);
    session.subscribe(log.clone());
    session
        .start_combat(vec![defend; 7], vec![dummy(40, Intent::Block { amount: 1 })], PlayerProfile::new(50))
        .unwrap();

    let summary = session.end_turn().unwrap();
    assert_eq!(summary.drawn.len(), 5);
    assert_eq!(session.piles().counts().total(), 7);
    assert_eq!(log.count(|e| matches!(e, CombatEvent::PileReshuffled { .. })), 1);
}

/// Test adding and removing cards mid-combat keeps the ledger consistent.
#[test]
fn test_add_and_remove_cards() {
    let cards = cards();
    let deck = content::starter_deck(&cards).unwrap();
    let mut session = CombatSession::new(CombatConfig::default(), 4);
    session
        .start_combat(deck, vec![dummy(40, Intent::Block { amount: 1 })], PlayerProfile::new(50))
        .unwrap();

    let regret = cards.get("regret").unwrap().clone();
    let id = session.add_card(regret, PileKind::Discard).unwrap();
    assert_eq!(session.piles().find(id), Some(PileKind::Discard));
    assert_eq!(session.ledger().expected(), 11);

    let removed = session.remove_card(id).unwrap();
    assert_eq!(removed.instance_id, id);
    assert_eq!(session.ledger().expected(), 10);
    assert!(session.remove_card(id).is_err());
    assert_eq!(session.piles().counts().total(), 10);
}

/// Test a full scripted fight against the starter encounter.
#[test]
fn test_scripted_fight_ends() {
    init_tracing();
    let cards = cards();
    let enemies = content::enemy_registry().unwrap();
    let deck = content::starter_deck(&cards).unwrap();
    let encounter = content::encounter(&enemies, "slime").unwrap();

    let mut session = CombatSession::new(CombatConfig::default(), 99);
    session.start_combat(deck, encounter, PlayerProfile::new(80)).unwrap();

    let mut steps = 0;
    while !session.is_over() && steps < 500 {
        let actions = session.legal_plays();
        // Always play the first card, end the turn when nothing is left.
        let action = actions[0];
        session.apply(action).unwrap();
        steps += 1;
        if action == CombatAction::EndTurn {
            assert_eq!(session.player().energy, session.config().base_energy);
        }
    }

    assert!(session.is_over());
    assert_eq!(session.piles().counts().total(), 10);
}
