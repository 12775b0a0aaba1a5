//! Difficulty ramp and randomized spawn gating
//!
//! Spawn cadence is deliberately bursty: while the gate is open every frame
//! rolls against a fixed chance, and a successful roll closes the gate for
//! the current interval. The interval shrinks as the ramp accumulator rises,
//! so pressure builds over the session without becoming strictly periodic.

use rand::Rng;
use rand_pcg::Pcg32;

use super::timers::{TimerAction, Timers};
use crate::consts::*;
use crate::lerp;

/// Ramps spawn frequency over elapsed session time
#[derive(Debug, Clone)]
pub struct DifficultyScheduler {
    /// Ramp progress in [0, 1], monotone non-decreasing
    progress: f32,
    /// False while a spawn-interval cooldown is pending
    gate_open: bool,
    interval_slow_ms: f32,
    interval_fast_ms: f32,
    ramp_duration_ms: f32,
    spawn_chance: f32,
}

impl Default for DifficultyScheduler {
    fn default() -> Self {
        Self {
            progress: 0.0,
            gate_open: true,
            interval_slow_ms: SPAWN_INTERVAL_SLOW_MS,
            interval_fast_ms: SPAWN_INTERVAL_FAST_MS,
            ramp_duration_ms: RAMP_DURATION_MS,
            spawn_chance: SPAWN_CHANCE,
        }
    }
}

impl DifficultyScheduler {
    pub fn new(
        interval_slow_ms: f32,
        interval_fast_ms: f32,
        ramp_duration_ms: f32,
        spawn_chance: f32,
    ) -> Self {
        Self {
            progress: 0.0,
            gate_open: true,
            interval_slow_ms,
            interval_fast_ms,
            ramp_duration_ms,
            spawn_chance,
        }
    }

    /// Advance the ramp by elapsed wall time, saturating at 1.
    pub fn tick(&mut self, dt_ms: f64) {
        self.progress = (self.progress + dt_ms as f32 / self.ramp_duration_ms).min(1.0);
    }

    /// Current cooldown between spawns: slow bound at ramp 0, fast bound at
    /// ramp 1.
    pub fn spawn_interval_ms(&self) -> f32 {
        lerp(self.interval_slow_ms, self.interval_fast_ms, self.progress)
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn gate_open(&self) -> bool {
        self.gate_open
    }

    /// Roll the spawn gate. On success the gate closes and a reopening task
    /// is scheduled after the current interval. Returns whether to spawn.
    pub fn try_spawn(&mut self, now_ms: f64, rng: &mut Pcg32, timers: &mut Timers) -> bool {
        if !self.gate_open {
            return false;
        }
        if rng.random::<f32>() >= self.spawn_chance {
            return false;
        }
        self.gate_open = false;
        let due = now_ms + self.spawn_interval_ms() as f64;
        timers.schedule(due, TimerAction::ReopenSpawnGate);
        true
    }

    /// Fired by the gate-reopening task.
    pub fn reopen_gate(&mut self) {
        self.gate_open = true;
    }
}
