//! 2D overlay: life arc and game-over screen
//!
//! The overlay is redrawn only when the lives snapshot changes or the
//! viewport is resized, not every frame. Drawing goes through the
//! [`OverlaySurface`] primitives so the HUD logic stays testable off-canvas.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::sim::LivesSnapshot;

/// Life arc placement (canvas pixels)
const LIFE_ARC_X: f32 = 100.0;
const LIFE_ARC_Y: f32 = 75.0;
const LIFE_ARC_RADIUS: f32 = 50.0;
const LIFE_ARC_COLOR: &str = "yellow";

const OVERLAY_DIM_COLOR: &str = "rgba(0, 0, 0, 0.6)";
const GAME_OVER_TEXT: &str = "GAME OVER";
const GAME_OVER_FONT: &str = "48px sans-serif";
const GAME_OVER_COLOR: &str = "white";

/// 2D drawing primitives the overlay needs from its canvas
pub trait OverlaySurface {
    /// Current viewport size in pixels
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    /// Filled arc from `start_angle` to `end_angle` (radians, clockwise)
    fn fill_arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

/// Life/game-over overlay with change detection
#[derive(Debug, Default)]
pub struct Hud {
    last_drawn: Option<LivesSnapshot>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw if the snapshot changed since the last draw. Returns whether
    /// a draw happened.
    pub fn update(&mut self, snapshot: LivesSnapshot, surface: &mut impl OverlaySurface) -> bool {
        if self.last_drawn == Some(snapshot) {
            return false;
        }
        self.draw(snapshot, surface);
        self.last_drawn = Some(snapshot);
        true
    }

    /// Force a redraw on the next update (viewport resize)
    pub fn mark_dirty(&mut self) {
        self.last_drawn = None;
    }

    fn draw(&self, snapshot: LivesSnapshot, surface: &mut impl OverlaySurface) {
        surface.clear();

        // Life arc: full circle with all lives, sweep shrinks with each hit
        let fraction = if snapshot.max_lives == 0 {
            0.0
        } else {
            snapshot.lives as f32 / snapshot.max_lives as f32
        };
        let start = -FRAC_PI_2;
        surface.fill_arc(
            LIFE_ARC_X,
            LIFE_ARC_Y,
            LIFE_ARC_RADIUS,
            start,
            start + TAU * fraction,
            LIFE_ARC_COLOR,
        );

        if snapshot.is_game_over {
            let (w, h) = surface.size();
            surface.fill_rect(0.0, 0.0, w, h, OVERLAY_DIM_COLOR);
            surface.fill_text(
                GAME_OVER_TEXT,
                w / 2.0,
                h / 2.0,
                GAME_OVER_FONT,
                GAME_OVER_COLOR,
            );
        }
    }
}

/// Recorded drawing command, for tests and headless runs
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Arc {
        x: f32,
        y: f32,
        radius: f32,
        start: f32,
        end: f32,
        color: String,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: String,
    },
    Text { text: String, color: String },
}

/// In-memory overlay surface recording every command
#[derive(Debug)]
pub struct RecordingOverlay {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingOverlay {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

impl OverlaySurface for RecordingOverlay {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, color: &str) {
        self.ops.push(DrawOp::Arc {
            x,
            y,
            radius,
            start,
            end,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _font: &str, color: &str) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LIVES;
    use crate::sim::{GameState, TickInput, tick};
    use crate::tuning::Tuning;

    fn arc_sweep(ops: &[DrawOp]) -> Option<f32> {
        ops.iter().find_map(|op| match op {
            DrawOp::Arc { start, end, .. } => Some(end - start),
            _ => None,
        })
    }

    #[test]
    fn test_full_lives_draws_full_circle() {
        let mut hud = Hud::new();
        let mut surface = RecordingOverlay::new(800.0, 600.0);
        let snapshot = LivesSnapshot {
            lives: MAX_LIVES,
            max_lives: MAX_LIVES,
            is_game_over: false,
        };
        assert!(hud.update(snapshot, &mut surface));
        assert!((arc_sweep(&surface.ops).unwrap() - TAU).abs() < 1e-5);
    }

    #[test]
    fn test_unchanged_snapshot_skips_redraw() {
        let mut hud = Hud::new();
        let mut surface = RecordingOverlay::new(800.0, 600.0);
        let snapshot = LivesSnapshot {
            lives: 3,
            max_lives: MAX_LIVES,
            is_game_over: false,
        };
        assert!(hud.update(snapshot, &mut surface));
        assert!(!hud.update(snapshot, &mut surface));

        // Resize forces a redraw of the same snapshot
        hud.mark_dirty();
        assert!(hud.update(snapshot, &mut surface));
    }

    #[test]
    fn test_game_over_session_draws_empty_arc_and_overlay() {
        // Run a real session into the ground: never jump, eager spawns
        let tuning = Tuning {
            spawn_chance: 1.0,
            spawn_interval_slow_ms: 200.0,
            spawn_interval_fast_ms: 200.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(21, tuning);
        state.set_avatar_ready();

        let mut frames = 0;
        while !state.lives.is_game_over() {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            frames += 1;
            assert!(frames < 100_000, "session never ended");
        }

        let mut hud = Hud::new();
        let mut surface = RecordingOverlay::new(800.0, 600.0);
        assert!(hud.update(state.lives.snapshot(), &mut surface));

        // 0% life arc
        assert_eq!(arc_sweep(&surface.ops), Some(0.0));
        // Dim rect plus the game-over text
        assert!(
            surface
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::Rect { .. }))
        );
        assert!(surface.ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text == GAME_OVER_TEXT)
        ));
    }
}
