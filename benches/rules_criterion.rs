use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_chess_rules::{is_checkmate, legal_destinations, legal_moves, Color, GameState, Square};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    placement: &'static str,
    side: Color,
    expected_moves: Option<usize>,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "initial",
        placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        side: Color::White,
        expected_moves: Some(20),
    },
    BenchCase {
        name: "open_middlegame",
        placement: "r3k2r/pppq1ppp/2npbn2/4p3/2B1P3/2NP1N2/PPPQ1PPP/R3K2R",
        side: Color::White,
        expected_moves: None,
    },
    BenchCase {
        name: "back_rank_mate",
        placement: "6k1/8/8/8/8/8/6PP/r6K",
        side: Color::White,
        expected_moves: Some(0),
    },
];

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let state = GameState::from_placement(case.placement, case.side).expect("benchmark placement should parse");

        // Correctness guard before benchmarking.
        let moves = legal_moves(&state).expect("move listing should run");
        if let Some(expected) = case.expected_moves {
            assert_eq!(moves.len(), expected, "move count mismatch for {}", case.name);
        }

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &state, |b, state| {
            b.iter(|| black_box(legal_moves(black_box(state)).expect("move listing should run").len()));
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let initial = GameState::new();
    let knight = Square::from_algebraic("g1").expect("valid square");
    group.bench_function("legal_destinations_g1", |b| {
        b.iter(|| black_box(legal_destinations(black_box(&initial), knight).expect("query should run")));
    });

    let mated = GameState::from_placement("6k1/8/8/8/8/8/6PP/r6K", Color::White).expect("placement should parse");
    assert!(is_checkmate(&mated, Color::White).expect("query should run"));
    group.bench_function("is_checkmate_back_rank", |b| {
        b.iter(|| black_box(is_checkmate(black_box(&mated), Color::White).expect("query should run")));
    });
    group.finish();
}

criterion_group!(rules_benches, bench_legal_moves, bench_queries);
criterion_main!(rules_benches);
