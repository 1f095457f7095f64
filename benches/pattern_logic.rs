use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pattern_pulse::core::pattern::generate;
use pattern_pulse::core::{CardGrid, GameSession, HighScoreBoard, HighScoreEntry, SimpleRng};
use pattern_pulse::types::Difficulty;

fn bench_generate_pattern(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_pattern_hard_level_30", |b| {
        b.iter(|| generate(black_box(30), Difficulty::Hard, &mut rng))
    });
}

fn bench_deal_grid(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("deal_card_grid", |b| b.iter(|| CardGrid::deal(&mut rng)));
}

fn bench_evaluate_input(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut session = GameSession::new(Difficulty::Hard);
    let pattern = generate(30, Difficulty::Hard, &mut rng);
    session.set_pattern(pattern.clone());
    session.player_input = pattern.sequence;

    c.bench_function("evaluate_full_input", |b| {
        b.iter(|| black_box(&session).input_matches_pattern())
    });
}

fn bench_leaderboard_submissions(c: &mut Criterion) {
    c.bench_function("leaderboard_100_submissions", |b| {
        b.iter(|| {
            let mut board = HighScoreBoard::default();
            for i in 0..100u32 {
                board.submit(HighScoreEntry::draft(
                    black_box(i * 37 % 997 + 1),
                    Difficulty::Medium,
                    i,
                ));
            }
            board
        })
    });
}

criterion_group!(
    benches,
    bench_generate_pattern,
    bench_deal_grid,
    bench_evaluate_input,
    bench_leaderboard_submissions
);
criterion_main!(benches);
