//! Obstacle pool: spawn, forward motion, and exactly-once removal
//!
//! The pool owns every live obstacle and is keyed by id, so removal mutates
//! pool state in place. Expiry and collision both funnel into [`ObstaclePool::remove`],
//! which is a no-op for ids that already left the pool.

use glam::Vec3;

use super::state::GameEvent;
use super::timers::{TimerAction, TimerId, Timers};
use crate::consts::*;

/// Unique obstacle identifier, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub u32);

/// A timed, collidable entity scrolling toward the avatar
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// World position; only `z` advances per frame
    pub pos: Vec3,
    /// Game-time clock reading at spawn (ms)
    pub spawned_at_ms: f64,
    /// Scheduled cleanup deadline (ms)
    pub expires_at_ms: f64,
    /// Pending expiry task, cancelled on early (collision) removal
    expiry_timer: TimerId,
}

/// Set of currently active obstacles, sorted by id for deterministic iteration
#[derive(Debug, Default)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one obstacle at the lane spawn position and schedule its
    /// cleanup `cleanup_delay_ms` from now.
    pub fn spawn(
        &mut self,
        now_ms: f64,
        cleanup_delay_ms: f64,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let expires_at_ms = now_ms + cleanup_delay_ms;
        let expiry_timer = timers.schedule(expires_at_ms, TimerAction::RemoveObstacle(id));

        let pos = Vec3::new(0.0, OBSTACLE_Y, OBSTACLE_SPAWN_Z);
        self.obstacles.push(Obstacle {
            id,
            pos,
            spawned_at_ms: now_ms,
            expires_at_ms,
            expiry_timer,
        });
        events.push(GameEvent::ObstacleSpawned { id, pos });
        id
    }

    /// Advance every obstacle one step toward the avatar.
    ///
    /// The step is a constant per invocation, not scaled by elapsed time;
    /// see [`OBSTACLE_STEP`].
    pub fn advance_all(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.z += OBSTACLE_STEP;
        }
    }

    /// Remove an obstacle and cancel its pending expiry.
    ///
    /// Idempotent: returns false (and does nothing) if `id` is not in the
    /// pool, so the expiry path and the collision path can both call this
    /// without coordinating.
    pub fn remove(
        &mut self,
        id: ObstacleId,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let Some(index) = self.obstacles.iter().position(|o| o.id == id) else {
            return false;
        };
        let obstacle = self.obstacles.remove(index);
        timers.cancel(obstacle.expiry_timer);
        events.push(GameEvent::ObstacleRemoved { id });
        true
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
impl Obstacle {
    /// Bare obstacle for collision tests, with a dummy expiry task.
    pub(crate) fn test_at(id: ObstacleId, pos: Vec3) -> Self {
        let mut timers = Timers::new();
        let expiry_timer = timers.schedule(0.0, TimerAction::RemoveObstacle(id));
        Self {
            id,
            pos,
            spawned_at_ms: 0.0,
            expires_at_ms: 0.0,
            expiry_timer,
        }
    }
}
