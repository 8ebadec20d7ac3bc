//! Simulation benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench -p pool-engine --bench tick
//! Filter:     cargo bench -p pool-engine --bench tick -- break

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pool_engine::core::collision;
use pool_engine::glam::Vec2;
use pool_engine::{Ball, GameConfig, InputEvent, Simulation};

/// A fresh table with the break shot already struck.
fn broken_rack(power_drag: f32) -> Simulation {
    let mut sim = Simulation::new(GameConfig::default());
    let cue = sim.cue_ball().map(|b| b.pos).unwrap_or(Vec2::new(425.0, 450.0));
    sim.handle_input(&InputEvent::PointerDown { x: cue.x, y: cue.y });
    sim.handle_input(&InputEvent::PointerUp {
        x: cue.x - power_drag,
        y: cue.y + 1.0,
    });
    sim
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick/break");
    for &drag in &[40.0_f32, 120.0, 400.0] {
        group.bench_with_input(BenchmarkId::from_parameter(drag as u32), &drag, |b, &drag| {
            b.iter_batched(
                || broken_rack(drag),
                |mut sim| {
                    for _ in 0..120 {
                        black_box(sim.tick());
                    }
                    sim
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();

    let mut idle = Simulation::new(GameConfig::default());
    c.bench_function("tick/idle_rack", |b| {
        b.iter(|| black_box(idle.tick()));
    });
}

fn bench_collision(c: &mut Criterion) {
    c.bench_function("collision/head_on", |b| {
        b.iter(|| {
            let mut a = Ball::new(0, Vec2::new(100.0, 100.0), 20.0);
            let mut other = Ball::new(1, Vec2::new(139.0, 100.0), 20.0);
            a.vel = Vec2::new(5.0, 0.0);
            black_box(collision::resolve(&mut a, &mut other))
        });
    });
}

criterion_group!(benches, bench_tick, bench_collision);
criterion_main!(benches);
