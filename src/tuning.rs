//! Data-driven game balance
//!
//! Every balance value the sim consumes, as one deserializable struct.
//! Defaults mirror the constants in [`crate::consts`]; a JSON blob can
//! override any subset of fields for playtesting without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance values for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Avatar rest height
    pub rest_y: f32,
    /// Avatar height at the jump apex
    pub peak_y: f32,
    /// Obstacle lifetime before scheduled cleanup (ms)
    pub cleanup_delay_ms: f64,
    /// Spawn cooldown at difficulty 0 (ms)
    pub spawn_interval_slow_ms: f32,
    /// Spawn cooldown at difficulty 1 (ms)
    pub spawn_interval_fast_ms: f32,
    /// Time for the difficulty ramp to saturate (ms)
    pub ramp_duration_ms: f32,
    /// Per-frame spawn probability while the gate is open
    pub spawn_chance: f32,
    /// Probe distance that still counts as a hit
    pub hit_tolerance: f32,
    /// Lives at session start
    pub max_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rest_y: AVATAR_REST_Y,
            peak_y: AVATAR_PEAK_Y,
            cleanup_delay_ms: OBSTACLE_CLEANUP_DELAY_MS,
            spawn_interval_slow_ms: SPAWN_INTERVAL_SLOW_MS,
            spawn_interval_fast_ms: SPAWN_INTERVAL_FAST_MS,
            ramp_duration_ms: RAMP_DURATION_MS,
            spawn_chance: SPAWN_CHANCE,
            hit_tolerance: HIT_TOLERANCE,
            max_lives: MAX_LIVES,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
