//! Lane Runner - an endless-runner browser game
//!
//! Core modules:
//! - `sim`: Deterministic game core (jump kinematics, obstacle pool,
//!   difficulty ramp, collision probe, lives)
//! - `scene`: Narrow bridge to an external 3D scene-graph engine
//! - `ui`: 2D overlay surface for the life arc and game-over screen
//! - `tuning`: Data-driven game balance

pub mod scene;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Avatar rest height (feet on the ground plane)
    pub const AVATAR_REST_Y: f32 = -0.24;
    /// Avatar height at the top of a jump
    pub const AVATAR_PEAK_Y: f32 = 0.15;
    /// Avatar lane position (depth along the lane)
    pub const AVATAR_Z: f32 = 0.5;
    /// Phase-angle increment per jump step (radians)
    pub const JUMP_PHASE_STEP: f32 = 0.05;
    /// Landing tolerance on the half-sine easing parameter
    pub const JUMP_LAND_TOLERANCE: f32 = 0.05;

    /// Obstacle spawn depth (far end of the lane)
    pub const OBSTACLE_SPAWN_Z: f32 = -2.0;
    /// Obstacle resting height
    pub const OBSTACLE_Y: f32 = -0.2;
    /// Obstacle half extents (box is 0.5 x 0.05 x 0.1 world units)
    pub const OBSTACLE_HALF_EXTENTS: [f32; 3] = [0.25, 0.025, 0.05];
    /// Forward advance per simulation step, NOT scaled by dt.
    /// The obstacles move a constant amount per display refresh, so
    /// simulation speed tracks the refresh rate.
    pub const OBSTACLE_STEP: f32 = 0.01;
    /// Lifetime of an obstacle before scheduled cleanup (ms)
    pub const OBSTACLE_CLEANUP_DELAY_MS: f64 = 8000.0;

    /// Spawn interval at difficulty 0 (ms)
    pub const SPAWN_INTERVAL_SLOW_MS: f32 = 1600.0;
    /// Spawn interval at difficulty 1 (ms)
    pub const SPAWN_INTERVAL_FAST_MS: f32 = 550.0;
    /// Time for the difficulty accumulator to ramp from 0 to 1 (ms)
    pub const RAMP_DURATION_MS: f32 = 60_000.0;
    /// Per-frame spawn probability while the gate is open
    pub const SPAWN_CHANCE: f32 = 0.4;

    /// Maximum probe distance that still counts as a hit (world units)
    pub const HIT_TOLERANCE: f32 = 0.05;
    /// Lives at session start
    pub const MAX_LIVES: u8 = 5;

    /// Ground texture scroll per frame (offset units)
    pub const GROUND_SCROLL_STEP: f32 = 0.025;
}

/// Linear interpolation: `a + t * (b - a)`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
