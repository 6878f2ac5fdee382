//! Scripted combat benchmarks.
//!
//! Measures a full starter-deck fight driven through `legal_plays`, and the
//! cost of snapshot capture and restore mid-fight.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use roguedeck::cards::CardDefinition;
use roguedeck::content;
use roguedeck::core::CombatConfig;
use roguedeck::enemies::EnemyDefinition;
use roguedeck::session::{CombatSession, CombatSnapshot};
use roguedeck::status::PlayerProfile;

fn setup(encounter: &str) -> (Vec<CardDefinition>, Vec<EnemyDefinition>) {
    let cards = content::card_registry().expect("cards");
    let enemies = content::enemy_registry().expect("enemies");
    let deck = content::starter_deck(&cards).expect("deck");
    let encounter = content::encounter(&enemies, encounter).expect("encounter");
    (deck, encounter)
}

fn run_fight(deck: Vec<CardDefinition>, encounter: Vec<EnemyDefinition>, seed: u64) -> CombatSession {
    let mut session = CombatSession::new(CombatConfig::default(), seed);
    session
        .start_combat(deck, encounter, PlayerProfile::new(80))
        .expect("start");
    while !session.is_over() && session.turn() < 100 {
        let action = session.legal_plays()[0];
        session.apply(action).expect("legal action");
    }
    session
}

fn bench_full_fight(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_fight");
    for name in ["slime", "pair", "boss"] {
        let (deck, encounter) = setup(name);
        group.bench_function(name, |b| {
            b.iter_batched(
                || (deck.clone(), encounter.clone()),
                |(deck, encounter)| black_box(run_fight(deck, encounter, 42)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_snapshots(c: &mut Criterion) {
    let (deck, encounter) = setup("pair");
    let mut session = CombatSession::new(CombatConfig::default(), 7);
    session
        .start_combat(deck, encounter, PlayerProfile::new(80))
        .expect("start");
    for _ in 0..6 {
        let action = session.legal_plays()[0];
        session.apply(action).expect("legal action");
    }

    c.bench_function("get_state", |b| b.iter(|| black_box(session.get_state())));

    let snapshot = session.get_state();
    let bytes = snapshot.to_bytes().expect("encode");
    c.bench_function("snapshot_bincode_decode", |b| {
        b.iter(|| black_box(CombatSnapshot::from_bytes(&bytes).expect("decode")))
    });

    let json = snapshot.to_json().expect("encode");
    c.bench_function("snapshot_json_decode", |b| {
        b.iter(|| black_box(CombatSnapshot::from_json(&json).expect("decode")))
    });

    c.bench_function("restore_state", |b| {
        b.iter_batched(
            || snapshot.clone(),
            |snapshot| session.restore_state(snapshot).expect("restore"),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_full_fight, bench_snapshots);
criterion_main!(benches);
