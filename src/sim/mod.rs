//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical step per display refresh
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies; side effects surface as [`GameEvent`]s

pub mod avatar;
pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod state;
pub mod tick;
pub mod timers;

pub use avatar::AvatarMotion;
pub use collision::{ProbeHit, check_ground_hit, probe};
pub use difficulty::DifficultyScheduler;
pub use obstacles::{Obstacle, ObstacleId, ObstaclePool};
pub use state::{GameEvent, GameState, LivesSnapshot, LivesState};
pub use tick::{TickInput, tick};
pub use timers::{TimerAction, TimerId, Timers};
