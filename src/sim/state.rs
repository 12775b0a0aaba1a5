//! Game state and core simulation types
//!
//! One `GameState` value owns every component the frame step coordinates,
//! replacing the process-wide globals of the original design. Side effects
//! the outside world cares about (scene adds/removes, life loss, game over)
//! are queued as [`GameEvent`]s for the host loop to drain after each step.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::avatar::AvatarMotion;
use super::difficulty::DifficultyScheduler;
use super::obstacles::{ObstacleId, ObstaclePool};
use super::timers::Timers;
use crate::consts::*;
use crate::tuning::Tuning;

/// Simulation side effects for the host loop (scene sync, HUD redraw)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { id: ObstacleId, pos: Vec3 },
    ObstacleRemoved { id: ObstacleId },
    LifeLost { remaining: u8 },
    GameOver,
}

/// Remaining-lives counter with a terminal game-over latch
#[derive(Debug, Clone)]
pub struct LivesState {
    lives: u8,
    max_lives: u8,
    game_over: bool,
}

/// Read-only view for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivesSnapshot {
    pub lives: u8,
    pub max_lives: u8,
    pub is_game_over: bool,
}

impl LivesState {
    pub fn new(max_lives: u8) -> Self {
        Self {
            lives: max_lives,
            max_lives,
            game_over: false,
        }
    }

    /// Confirmed collision: lose one life. Once the counter reaches zero
    /// the game-over latch is set and further hits change nothing.
    pub fn on_hit(&mut self) {
        if self.game_over {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn snapshot(&self) -> LivesSnapshot {
        LivesSnapshot {
            lives: self.lives,
            max_lives: self.max_lives,
            is_game_over: self.game_over,
        }
    }
}

/// Complete per-session game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for spawn rolls
    pub rng: Pcg32,
    /// Game-time clock, accumulated from per-frame deltas (ms)
    pub now_ms: f64,
    /// Frame step counter
    pub frame: u64,

    pub avatar: AvatarMotion,
    /// Set once the avatar model finishes loading; jump and collision
    /// logic are skipped until then
    pub avatar_ready: bool,

    pub obstacles: ObstaclePool,
    pub difficulty: DifficultyScheduler,
    pub lives: LivesState,
    pub timers: Timers,

    /// Ground texture scroll offset, advanced every frame
    pub ground_scroll: f32,
    /// Run-animation clip time (seconds)
    pub anim_time: f32,
    /// Mirrors `avatar.is_jumping()`; the run clip pauses mid-air
    pub anim_paused: bool,

    /// Balance values this session was built from
    pub tuning: Tuning,

    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default balance values
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            frame: 0,
            avatar: AvatarMotion::new(tuning.rest_y, tuning.peak_y),
            avatar_ready: false,
            obstacles: ObstaclePool::new(),
            difficulty: DifficultyScheduler::new(
                tuning.spawn_interval_slow_ms,
                tuning.spawn_interval_fast_ms,
                tuning.ramp_duration_ms,
                tuning.spawn_chance,
            ),
            lives: LivesState::new(tuning.max_lives),
            timers: Timers::new(),
            ground_scroll: 0.0,
            anim_time: 0.0,
            anim_paused: false,
            tuning,
            events: Vec::new(),
        }
    }

    /// Flip the readiness gate after the async model load completes
    pub fn set_avatar_ready(&mut self) {
        self.avatar_ready = true;
    }

    /// Avatar world position (fixed lane slot, vertical from the jump arc)
    pub fn avatar_position(&self) -> Vec3 {
        Vec3::new(0.0, self.avatar.y(), AVATAR_Z)
    }

    /// Drain queued side effects, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
