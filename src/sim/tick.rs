//! Frame orchestrator
//!
//! One logical step per display refresh, in fixed order: deferred timers,
//! ground scroll, obstacle motion, jump kinematics, animation sync,
//! grounded collision check, difficulty ramp and gated spawning. The host
//! loop renders and re-schedules the next step; nothing here blocks or
//! recurses.

use super::collision;
use super::state::{GameEvent, GameState};
use super::timers::TimerAction;
use crate::consts::*;

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete jump trigger (Space). One-shot; cleared by the host loop
    /// after the step consumes it.
    pub jump: bool,
}

/// Advance the game by one step. `dt` is the real elapsed time since the
/// previous step, in seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.frame += 1;
    let dt_ms = dt as f64 * 1000.0;
    state.now_ms += dt_ms;

    // Deferred work scheduled by earlier steps: obstacle expiry and
    // spawn-gate reopening. Removal is idempotent, so an expiry task for an
    // obstacle that already left via collision is absorbed silently.
    for action in state.timers.drain_due(state.now_ms) {
        match action {
            TimerAction::RemoveObstacle(id) => {
                state
                    .obstacles
                    .remove(id, &mut state.timers, &mut state.events);
            }
            TimerAction::ReopenSpawnGate => state.difficulty.reopen_gate(),
        }
    }

    // Background and obstacles advance a constant amount per step
    state.ground_scroll -= GROUND_SCROLL_STEP;
    state.obstacles.advance_all();

    // Jump and collision logic are gated on the async model load; until the
    // avatar is ready the lane keeps moving but input is ignored.
    if state.avatar_ready {
        if input.jump {
            state.avatar.request_jump();
        }
        state.avatar.step();

        // The run clip pauses while airborne; clip time only advances on
        // the ground.
        state.anim_paused = state.avatar.is_jumping();
        if !state.anim_paused {
            state.anim_time += dt;
        }

        // Grounded collision check: airborne frames dodge the obstacle.
        // After game over the check is short-circuited along with spawning.
        if !state.avatar.is_jumping() && !state.lives.is_game_over() {
            let hit = collision::check_ground_hit(
                state.avatar_position(),
                state.obstacles.iter(),
                state.tuning.hit_tolerance,
            );
            if let Some(hit) = hit {
                state
                    .obstacles
                    .remove(hit.id, &mut state.timers, &mut state.events);
                state.lives.on_hit();
                let snapshot = state.lives.snapshot();
                state.events.push(GameEvent::LifeLost {
                    remaining: snapshot.lives,
                });
                log::info!(
                    "hit obstacle {:?} at distance {:.3}, {} lives left",
                    hit.id,
                    hit.distance,
                    snapshot.lives
                );
                if snapshot.is_game_over {
                    state.events.push(GameEvent::GameOver);
                    log::info!("game over after {} frames", state.frame);
                }
            }
        }
    }

    // Spawning stops once the session ends; obstacles already in flight
    // keep scrolling and expiring behind the game-over overlay.
    if !state.lives.is_game_over() {
        state.difficulty.tick(dt_ms);
        if state
            .difficulty
            .try_spawn(state.now_ms, &mut state.rng, &mut state.timers)
        {
            state.obstacles.spawn(
                state.now_ms,
                state.tuning.cleanup_delay_ms,
                &mut state.timers,
                &mut state.events,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    /// 60 Hz display refresh
    const DT: f32 = 1.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        // No random spawning; tests place obstacles by hand
        Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn eager_tuning() -> Tuning {
        // Spawn on every open-gate frame, short cooldown
        Tuning {
            spawn_chance: 1.0,
            spawn_interval_slow_ms: 200.0,
            spawn_interval_fast_ms: 200.0,
            ..Tuning::default()
        }
    }

    fn step_n(state: &mut GameState, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            tick(state, &TickInput::default(), DT);
            events.extend(state.take_events());
        }
        events
    }

    #[test]
    fn test_spawn_then_expiry_removes_exactly_once() {
        let mut state = GameState::with_tuning(1, eager_tuning());

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.obstacles.len(), 1);

        // Run past the cleanup delay; the ticks in between spawn more
        // obstacles, so count removals for the first id only.
        let first_id = state.obstacles.iter().next().unwrap().id;
        let frames = (OBSTACLE_CLEANUP_DELAY_MS / (DT as f64 * 1000.0)) as u32 + 2;
        let events = step_n(&mut state, frames);

        let removals = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleRemoved { id } if *id == first_id))
            .count();
        assert_eq!(removals, 1);
        assert!(state.obstacles.get(first_id).is_none());
    }

    #[test]
    fn test_grounded_collision_costs_a_life() {
        let mut state = GameState::with_tuning(2, quiet_tuning());
        state.set_avatar_ready();

        state.obstacles.spawn(
            state.now_ms,
            state.tuning.cleanup_delay_ms,
            &mut state.timers,
            &mut state.events,
        );

        // Obstacle needs 240 steps to scroll from z=-2 into probe range
        let events = step_n(&mut state, 260);

        let life_losses: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .collect();
        assert_eq!(life_losses.len(), 1);
        assert_eq!(state.lives.snapshot().lives, MAX_LIVES - 1);
        // The hit removed the obstacle; the expiry later is a no-op
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_dodges_obstacle() {
        let mut state = GameState::with_tuning(3, quiet_tuning());
        state.set_avatar_ready();

        state.obstacles.spawn(
            state.now_ms,
            state.tuning.cleanup_delay_ms,
            &mut state.timers,
            &mut state.events,
        );

        // Jump shortly before the obstacle reaches the probe window; the
        // arc (~90 steps) covers the whole passage.
        step_n(&mut state, 200);
        tick(&mut state, &TickInput { jump: true }, DT);
        step_n(&mut state, 120);

        assert_eq!(state.lives.snapshot().lives, MAX_LIVES);
        // Dodged, not destroyed: the obstacle scrolls on past the avatar
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_unready_avatar_ignores_input_and_collisions() {
        let mut state = GameState::with_tuning(4, quiet_tuning());
        // Model load never completed

        state.obstacles.spawn(
            state.now_ms,
            state.tuning.cleanup_delay_ms,
            &mut state.timers,
            &mut state.events,
        );
        step_n(&mut state, 250);
        tick(&mut state, &TickInput { jump: true }, DT);

        assert!(!state.avatar.is_jumping());
        assert_eq!(state.lives.snapshot().lives, MAX_LIVES);
        // Background motion still ran
        assert!(state.ground_scroll < 0.0);
    }

    #[test]
    fn test_anim_pause_mirrors_jump_state() {
        let mut state = GameState::with_tuning(5, quiet_tuning());
        state.set_avatar_ready();

        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.anim_paused);
        let grounded_anim_time = state.anim_time;

        tick(&mut state, &TickInput { jump: true }, DT);
        assert!(state.anim_paused);
        assert_eq!(state.anim_time, grounded_anim_time);

        while state.avatar.is_jumping() {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(!state.anim_paused);
        assert!(state.anim_time > grounded_anim_time);
    }

    #[test]
    fn test_five_hits_end_the_session() {
        let mut state = GameState::with_tuning(6, eager_tuning());
        state.set_avatar_ready();

        // Never jump: every obstacle eventually lands a hit
        let mut events = Vec::new();
        let mut frames = 0;
        while !state.lives.is_game_over() {
            tick(&mut state, &TickInput::default(), DT);
            events.extend(state.take_events());
            frames += 1;
            assert!(frames < 100_000, "session never ended");
        }

        let losses = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count();
        assert_eq!(losses, MAX_LIVES as usize);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver))
                .count(),
            1
        );
        assert_eq!(state.lives.snapshot().lives, 0);

        // Spawning and life loss stop; the latch never clears
        let after = step_n(&mut state, 200);
        assert!(
            after
                .iter()
                .all(|e| matches!(e, GameEvent::ObstacleRemoved { .. }))
        );
        assert!(state.lives.is_game_over());
    }

    #[test]
    fn test_determinism_across_runs() {
        let mut a = GameState::with_tuning(99, eager_tuning());
        let mut b = GameState::with_tuning(99, eager_tuning());
        a.set_avatar_ready();
        b.set_avatar_ready();

        for frame in 0..2000 {
            let input = TickInput { jump: frame % 97 == 0 };
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }

        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.lives.snapshot(), b.lives.snapshot());
        assert_eq!(a.now_ms, b.now_ms);
        assert_eq!(a.difficulty.progress(), b.difficulty.progress());
    }
}
