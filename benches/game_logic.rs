use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_snake::core::{GameSnapshot, GameState, SimpleRng};
use tui_snake::term::{FrameBuffer, GameView, Viewport};
use tui_snake::types::{Direction, GameConfig};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    let mut steer = SimpleRng::new(7);

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.change_direction(Direction::ALL[(steer.next_u32() % 4) as usize]);
            black_box(state.tick());
        })
    });
}

fn bench_reset(c: &mut Criterion) {
    let config = GameConfig {
        width: 200,
        height: 200,
        ..GameConfig::default()
    };
    let mut state = GameState::new(config, SimpleRng::new(1));

    c.bench_function("reset_200x200", |b| {
        b.iter(|| {
            state.reset();
            black_box(state.food());
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let mut state = GameState::with_seed(99);
    for _ in 0..10 {
        state.tick();
    }
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    c.bench_function("snapshot_into_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), Viewport::new(120, 40), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_reset,
    bench_snapshot_and_render
);
criterion_main!(benches);
