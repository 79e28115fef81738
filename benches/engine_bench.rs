use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::{SmallRng, StdRng};
use rand::SeedableRng;

use quarry::annotate::Annotations;
use quarry::board::{Faction, PlacementKind};
use quarry::game::{Game, Player, Rules};
use quarry::setup;
use quarry::sim::random_playout;

fn bench_generate(c: &mut Criterion) {
    let rules = Rules::default();
    c.bench_function("generate_25x25_board", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            setup::generate(black_box(&rules), &mut rng)
        })
    });
}

fn bench_annotation(c: &mut Criterion) {
    let game = Game::new(
        Player::new("survivor"),
        Player::new("hunter"),
        Rules::default(),
        SmallRng::seed_from_u64(42),
    );
    c.bench_function("annotate_fresh_board", |b| {
        b.iter(|| {
            Annotations::compute(
                black_box(game.board()),
                Some(Faction::Survivor),
                PlacementKind::Roadblock,
            )
        })
    });
}

fn bench_playout(c: &mut Criterion) {
    let rules = Rules::default();
    c.bench_function("random_playout_full_match", |b| {
        b.iter(|| random_playout(black_box(7), &rules))
    });
}

criterion_group!(benches, bench_generate, bench_annotation, bench_playout);
criterion_main!(benches);
