use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skyflap_input::{Action, ActionQueue};
use skyflap_kernel::{FlappyGame, GameConfig, GameEvent};
use skyflap_render::{DebugTextRenderer, Frame, FrameDriver, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyflap-cli", about = "Headless runner for the skyflap game")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the game headless and print the final state
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Queue a jump every N ticks
        #[arg(short, long)]
        jump_every: Option<u64>,
        /// JSON game config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the final snapshot as JSON instead of a frame listing
        #[arg(long)]
        json: bool,
    },
    /// Run the same simulation twice and compare state hashes
    Verify {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "1000")]
        ticks: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

/// Event counts collected over a run.
#[derive(Debug, Default)]
struct RunStats {
    jumps: usize,
    kill_plane_resets: usize,
    collisions: usize,
    spawns: usize,
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped { .. } => self.jumps += 1,
                GameEvent::KillPlaneReset { .. } => self.kill_plane_resets += 1,
                GameEvent::Collided { .. } => self.collisions += 1,
                GameEvent::PipeSpawned { .. } => self.spawns += 1,
                GameEvent::Reset { .. } => {}
            }
        }
    }
}

/// Drive `game` for `ticks` frames the way the desktop host does, queueing a
/// jump every `jump_every` ticks. Returns the last frame built.
fn run(
    game: &mut FlappyGame,
    ticks: u64,
    jump_every: Option<u64>,
    stats: &mut RunStats,
) -> Option<Frame> {
    let mut driver = FrameDriver::new(RenderView::default(), 800, 600);
    let mut actions = ActionQueue::new();
    let mut last = None;

    for t in 1..=ticks {
        if jump_every.is_some_and(|n| n > 0 && t % n == 0) {
            actions.push(Action::Jump);
        }
        last = Some(driver.tick(game, &mut actions, (800, 600)));
        stats.record(&game.drain_events());
    }
    last
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skyflap-cli v{}", env!("CARGO_PKG_VERSION"));
            let config = GameConfig::default();
            println!(
                "kernel: pipes={}, clouds={}, gravity={}, jump={}",
                config.pipe_count, config.cloud_count, config.gravity, config.jump_velocity
            );
            println!("input: {}", skyflap_input::crate_info());
            println!("render: {}", skyflap_render::crate_info());
        }
        Commands::Simulate {
            ticks,
            seed,
            jump_every,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => GameConfig::from_json_file(&path)?,
                None => GameConfig::default(),
            };
            let mut game = FlappyGame::with_seed(config, seed)?;
            tracing::info!(seed, ticks, "simulation starting");

            let mut stats = RunStats::default();
            let frame = run(&mut game, ticks, jump_every, &mut stats);

            if json {
                println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
                return Ok(());
            }

            println!("Simulation: seed={seed}, ticks={ticks}");
            println!(
                "Player: position={:.2}, velocity={:.2}",
                game.player_position(),
                game.player_velocity()
            );
            println!("Score: {}", game.score());
            println!(
                "Events: jumps={}, kill_plane_resets={}, collisions={}, spawns={}",
                stats.jumps, stats.kill_plane_resets, stats.collisions, stats.spawns
            );
            println!("State hash: {:#018x}", game.state_hash());
            if let Some(frame) = frame {
                print!("{}", DebugTextRenderer::new().render(&frame));
            }
        }
        Commands::Verify { ticks, seed } => {
            println!("Determinism check: seed={seed}, ticks={ticks}");

            let mut hashes = [0u64; 2];
            for hash in &mut hashes {
                let mut game = FlappyGame::with_seed(GameConfig::default(), seed)?;
                run(&mut game, ticks, Some(17), &mut RunStats::default());
                *hash = game.state_hash();
            }

            println!("Run 1: hash={:#018x}", hashes[0]);
            println!("Run 2: hash={:#018x}", hashes[1]);
            if hashes[0] != hashes[1] {
                anyhow::bail!("state hashes differ for seed {seed}");
            }
            println!("Match: OK");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> FlappyGame {
        FlappyGame::with_seed(GameConfig::default(), 42).unwrap()
    }

    #[test]
    fn jump_schedule_fires_every_n_ticks() {
        let mut g = game();
        let mut stats = RunStats::default();
        let frame = run(&mut g, 30, Some(10), &mut stats);
        assert_eq!(stats.jumps, 3);
        assert_eq!(frame.map(|f| f.tick), Some(30));
        assert_eq!(g.tick(), 30);
    }

    #[test]
    fn zero_or_missing_schedule_never_jumps() {
        for schedule in [None, Some(0)] {
            let mut stats = RunStats::default();
            run(&mut game(), 50, schedule, &mut stats);
            assert_eq!(stats.jumps, 0, "schedule {schedule:?}");
        }
    }

    #[test]
    fn zero_ticks_builds_no_frame() {
        let mut stats = RunStats::default();
        assert!(run(&mut game(), 0, Some(1), &mut stats).is_none());
        assert_eq!(stats.jumps, 0);
    }

    #[test]
    fn record_counts_each_event_kind() {
        let mut stats = RunStats::default();
        stats.record(&[
            GameEvent::Jumped { tick: 1 },
            GameEvent::Jumped { tick: 2 },
            GameEvent::KillPlaneReset { tick: 46, position: 258.75 },
            GameEvent::PipeSpawned { tick: 300, dropped: 10.0, height: 20.0 },
            GameEvent::Collided { tick: 301, position: 0.0, pipe_offset: -570.0 },
            GameEvent::Reset { tick: 301 },
        ]);
        assert_eq!(stats.jumps, 2);
        assert_eq!(stats.kill_plane_resets, 1);
        assert_eq!(stats.spawns, 1);
        assert_eq!(stats.collisions, 1);
    }

    #[test]
    fn falling_from_rest_hits_the_kill_plane() {
        let mut stats = RunStats::default();
        run(&mut game(), 46, None, &mut stats);
        assert_eq!(stats.kill_plane_resets, 1);
    }
}
