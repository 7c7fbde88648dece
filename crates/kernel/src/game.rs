use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use skyflap_common::{Material, RenderObject};
use std::f32::consts::PI;

use crate::config::{ConfigError, GameConfig};
use crate::pipes::PipeWindow;

/// The only pipe tested for collision. Fixed by the scroll/spawn geometry:
/// with the default spacing this is the pipe passing the player's column.
pub const COLLISION_PIPE_INDEX: usize = 2;

/// A new pipe spawns once the window has scrolled this many spacings left.
const SPAWN_LAG_PIPES: f32 = 3.0;

// Player hitbox, in game units.
const PLAYER_HIT_X: f32 = -580.0;
const PLAYER_HIT_HEIGHT: f32 = 250.0;
const PIPE_HIT_WIDTH: f32 = 40.0;

/// Drawn player and hitbox both sit this far below the physics position.
const PLAYER_DROP: f32 = 50.0;
const PLAYER_DRAW_X: f32 = -200.0;
/// Offset between a pipe's opening edge and its mesh origin.
const PIPE_MESH_DROP: f32 = 200.0;
const BOTTOM_PIPE_DEPTH: f32 = -10.0;

/// Every entity is drawn upside down: the mesh is authored with +Y pointing down.
const FLIP: Vec3 = Vec3::new(0.0, 0.0, PI);

const PLAYER_SCALE: Vec3 = Vec3::splat(0.4);
const BOTTOM_PIPE_SCALE: Vec3 = Vec3::new(1.0, 1.5, 1.0);
const CLOUD_SCALE: Vec3 = Vec3::new(10.0, 1.0, 1.0);

const PLAYER_MATERIAL: Material = Material::solid([1.0, 1.0, 0.5, 1.0], 1.0, 1.0);
const PIPE_MATERIAL: Material = Material::solid([0.0, 1.0, 0.0, 1.0], 1.0, 1.0);
const CLOUD_MATERIAL: Material = Material {
    base_color: [1.0, 1.0, 1.0, 0.0],
    diffuse_color: [1.0, 1.0, 1.0, 0.0],
    specular_color: [0.0, 0.0, 0.0, 0.0],
    shininess: 0.0,
    specular_strength: 0.0,
};

/// A record of every notable state transition, stamped with the tick it
/// happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump input applied.
    Jumped { tick: u64 },
    /// Player crossed the kill plane at `position` and was teleported to 0.
    KillPlaneReset { tick: u64, position: f32 },
    /// Oldest pipe `dropped`, new pipe with gap centre `height` appended.
    PipeSpawned { tick: u64, dropped: f32, height: f32 },
    /// Player hit the collision pipe; a full reset follows.
    Collided { tick: u64, position: f32, pipe_offset: f32 },
    /// Player, pipes and clouds regenerated.
    Reset { tick: u64 },
}

/// Errors from restoring a [`GameSnapshot`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot has {actual} pipes, game window holds {expected}")]
    PipeCountMismatch { expected: usize, actual: usize },
}

/// Plain copy of the full game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub score: u32,
    pub player_position: f32,
    pub player_velocity: f32,
    pub pipe_offset: f32,
    /// Gap centres, oldest first.
    pub pipe_heights: Vec<f32>,
    pub clouds: Vec<Vec3>,
}

/// Flappy game state machine.
///
/// There is no separate "dead" state: a kill-plane crossing or a pipe
/// collision resets inside the same `update` and play continues.
#[derive(Debug, Clone)]
pub struct FlappyGame<R = StdRng> {
    config: GameConfig,
    rng: R,
    player_position: f32,
    player_velocity: f32,
    pipe_offset: f32,
    pipes: PipeWindow,
    clouds: Vec<Vec3>,
    tick: u64,
    /// Pipes spawned since the last full reset.
    score: u32,
    event_log: Vec<GameEvent>,
}

impl FlappyGame<StdRng> {
    /// Game driven by a seeded generator. Equal seeds give equal pipe and
    /// cloud sequences.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Game seeded from OS entropy.
    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> FlappyGame<R> {
    /// Validate `config` and build a game in its reset state.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            config,
            rng,
            player_position: 0.0,
            player_velocity: 0.0,
            pipe_offset: 0.0,
            pipes: PipeWindow::from_heights([]),
            clouds: Vec::new(),
            tick: 0,
            score: 0,
            event_log: Vec::new(),
        };
        game.regenerate();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_position(&self) -> f32 {
        self.player_position
    }

    pub fn player_velocity(&self) -> f32 {
        self.player_velocity
    }

    pub fn pipe_offset(&self) -> f32 {
        self.pipe_offset
    }

    pub fn pipes(&self) -> &PipeWindow {
        &self.pipes
    }

    pub fn clouds(&self) -> &[Vec3] {
        &self.clouds
    }

    /// Ticks advanced since construction. Not cleared by `reset`.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance the game by one tick.
    pub fn update(&mut self) {
        self.tick += 1;

        self.player_position += self.player_velocity;
        self.player_velocity += self.config.gravity;
        self.pipe_offset -= self.config.pipe_speed;

        if self.player_position.abs() > self.config.kill_plane {
            tracing::debug!(
                tick = self.tick,
                position = self.player_position,
                "player crossed kill plane"
            );
            self.event_log.push(GameEvent::KillPlaneReset {
                tick: self.tick,
                position: self.player_position,
            });
            self.player_position = 0.0;
            self.player_velocity = 0.0;
        }

        if self.pipe_offset < -self.config.pipe_spacing * SPAWN_LAG_PIPES {
            self.pipe_offset += self.config.pipe_spacing;
            let height = self.spawn_height();
            if let Some(dropped) = self.pipes.rotate_in(height) {
                self.score += 1;
                tracing::trace!(tick = self.tick, height, "pipe spawned");
                self.event_log.push(GameEvent::PipeSpawned {
                    tick: self.tick,
                    dropped,
                    height,
                });
            }
        }

        for cloud in &mut self.clouds {
            cloud.x -= self.config.cloud_speed;
            if cloud.x < -self.config.cloud_wrap {
                cloud.x = self.config.cloud_wrap;
            }
        }

        if self.collides() {
            tracing::debug!(
                tick = self.tick,
                score = self.score,
                "player hit pipe, resetting"
            );
            self.event_log.push(GameEvent::Collided {
                tick: self.tick,
                position: self.player_position,
                pipe_offset: self.pipe_offset,
            });
            self.reset();
        }
    }

    /// Regenerate player, pipes and clouds.
    pub fn reset(&mut self) {
        self.regenerate();
        self.event_log.push(GameEvent::Reset { tick: self.tick });
    }

    /// Set the player velocity to the jump velocity. Always applies, however
    /// often it is called.
    pub fn jump(&mut self) {
        self.player_velocity = self.config.jump_velocity;
        self.event_log.push(GameEvent::Jumped { tick: self.tick });
    }

    /// Drawable entities in fixed order: player, top pipes, bottom pipes,
    /// clouds. Has no side effects.
    pub fn renderables(&self) -> Vec<RenderObject> {
        let mut out = Vec::with_capacity(1 + 2 * self.pipes.len() + self.clouds.len());

        out.push(RenderObject {
            position: Vec3::new(PLAYER_DRAW_X, self.player_position - PLAYER_DROP, 0.0),
            rotation: FLIP,
            scale: PLAYER_SCALE,
            material: PLAYER_MATERIAL,
        });

        let gap = self.config.pipe_gap_half_height;
        out.extend(self.pipes.iter().enumerate().map(|(i, height)| RenderObject {
            position: Vec3::new(self.pipe_x(i), height + (gap - PIPE_MESH_DROP), 0.0),
            rotation: FLIP,
            scale: Vec3::ONE,
            material: PIPE_MATERIAL,
        }));
        out.extend(self.pipes.iter().enumerate().map(|(i, height)| RenderObject {
            position: Vec3::new(
                self.pipe_x(i),
                height - (gap + PIPE_MESH_DROP),
                BOTTOM_PIPE_DEPTH,
            ),
            rotation: FLIP,
            scale: BOTTOM_PIPE_SCALE,
            material: PIPE_MATERIAL,
        }));

        out.extend(self.clouds.iter().map(|&cloud| RenderObject {
            position: cloud,
            rotation: FLIP,
            scale: CLOUD_SCALE,
            material: CLOUD_MATERIAL,
        }));

        out
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.tick,
            score: self.score,
            player_position: self.player_position,
            player_velocity: self.player_velocity,
            pipe_offset: self.pipe_offset,
            pipe_heights: self.pipes.to_vec(),
            clouds: self.clouds.clone(),
        }
    }

    /// Replace the full state with `snapshot`. The pipe window length is fixed
    /// by the config, so a snapshot with a different pipe count is rejected.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
        if snapshot.pipe_heights.len() != self.config.pipe_count {
            return Err(SnapshotError::PipeCountMismatch {
                expected: self.config.pipe_count,
                actual: snapshot.pipe_heights.len(),
            });
        }
        self.tick = snapshot.tick;
        self.score = snapshot.score;
        self.player_position = snapshot.player_position;
        self.player_velocity = snapshot.player_velocity;
        self.pipe_offset = snapshot.pipe_offset;
        self.pipes = PipeWindow::from_heights(snapshot.pipe_heights.iter().copied());
        self.clouds = snapshot.clouds.clone();
        Ok(())
    }

    /// FNV-1a hash over the bit patterns of the full state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.score.to_le_bytes());
        mix(&mut h, &self.player_position.to_le_bytes());
        mix(&mut h, &self.player_velocity.to_le_bytes());
        mix(&mut h, &self.pipe_offset.to_le_bytes());
        for height in self.pipes.iter() {
            mix(&mut h, &height.to_le_bytes());
        }
        for cloud in &self.clouds {
            mix(&mut h, &cloud.x.to_le_bytes());
            mix(&mut h, &cloud.y.to_le_bytes());
            mix(&mut h, &cloud.z.to_le_bytes());
        }
        h
    }

    fn pipe_x(&self, index: usize) -> f32 {
        self.pipe_offset + index as f32 * self.config.pipe_spacing
    }

    fn spawn_height(&mut self) -> f32 {
        self.rng.gen_range(0.0..self.config.pipe_height_range)
    }

    fn regenerate(&mut self) {
        self.player_position = 0.0;
        self.player_velocity = 0.0;
        self.pipe_offset = 0.0;
        self.score = 0;

        let heights: Vec<f32> = (0..self.config.pipe_count)
            .map(|_| self.spawn_height())
            .collect();
        self.pipes = PipeWindow::from_heights(heights);

        let spread = self.config.cloud_spread;
        let depth = self.config.cloud_near..self.config.cloud_far;
        let rng = &mut self.rng;
        self.clouds = (0..self.config.cloud_count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-spread..spread),
                    rng.gen_range(-spread..spread),
                    rng.gen_range(depth.clone()),
                )
            })
            .collect();
    }

    /// Tests the player hitbox against the collision pipe only.
    fn collides(&self) -> bool {
        let Some(height) = self.pipes.get(COLLISION_PIPE_INDEX) else {
            return false;
        };
        let gap = self.config.pipe_gap_half_height;
        let pipe_top = height + gap;
        let pipe_bottom = height - gap;
        let pipe_left = self.pipe_offset;
        let pipe_right = self.pipe_offset + PIPE_HIT_WIDTH;

        let player_y = self.player_position - PLAYER_DROP;
        let outside_gap = player_y < pipe_bottom || player_y + PLAYER_HIT_HEIGHT > pipe_top;
        let in_column = PLAYER_HIT_X > pipe_left && PLAYER_HIT_X < pipe_right;
        outside_gap && in_column
    }
}
