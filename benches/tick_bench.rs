use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use slither_sprint::game::{FrameInput, GameRng, GameSettings, GameState};

const FRAME_MS: u32 = 16;

fn run_session(settings: GameSettings, frames: u32) {
    let mut state = GameState::new(settings);
    let mut rng = GameRng::new(7);
    for _ in 0..frames {
        state.update(FRAME_MS, FrameInput::default(), &mut rng);
        let _ = state.snapshot();
    }
}

fn bench_default_race() {
    // Runs a full race to the finish banner, then frozen frames.
    run_session(GameSettings::default(), 2000);
}

fn bench_endless_corridor() {
    let settings = GameSettings {
        finish_line_y: -1_000_000,
        ..GameSettings::default()
    };
    run_session(settings, 2000);
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.measurement_time(Duration::from_secs(10));

    group.bench_function("default_race_2000_frames", |b| b.iter(bench_default_race));

    group.bench_function("endless_corridor_2000_frames", |b| {
        b.iter(bench_endless_corridor)
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
