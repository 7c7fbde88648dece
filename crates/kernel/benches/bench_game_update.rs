use std::hint::black_box;
use std::time::Instant;

use skyflap_kernel::{FlappyGame, GameConfig};

fn bench_update(ticks: usize) {
    let mut game = FlappyGame::with_seed(GameConfig::default(), 42).expect("default config");

    let start = Instant::now();
    for t in 0..ticks {
        if t % 30 == 0 {
            game.jump();
        }
        game.update();
        game.drain_events();
    }
    let elapsed = start.elapsed();
    let per_tick = elapsed / ticks as u32;
    println!("  update ({ticks} ticks): {per_tick:?}/tick, total {elapsed:?}");
    black_box(game.state_hash());
}

fn bench_renderables(iterations: usize) {
    let game = FlappyGame::with_seed(GameConfig::default(), 42).expect("default config");

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(black_box(&game).renderables());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  renderables ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_wide_window(pipe_count: usize, ticks: usize) {
    let config = GameConfig {
        pipe_count,
        cloud_count: pipe_count * 4,
        ..GameConfig::default()
    };
    let mut game = FlappyGame::with_seed(config, 7).expect("valid config");

    let start = Instant::now();
    for _ in 0..ticks {
        game.update();
        black_box(game.renderables());
    }
    let elapsed = start.elapsed();
    let per_tick = elapsed / ticks as u32;
    println!("  update+renderables ({pipe_count} pipes, {ticks} ticks): {per_tick:?}/tick");
}

fn main() {
    println!("=== Game Kernel Benchmarks ===\n");

    println!("Tick:");
    bench_update(10_000);
    bench_update(100_000);

    println!("\nRenderable projection:");
    bench_renderables(100_000);

    println!("\nScaled windows:");
    bench_wide_window(8, 10_000);
    bench_wide_window(64, 10_000);
    bench_wide_window(512, 1_000);

    println!("\n=== Done ===");
}
