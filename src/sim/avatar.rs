//! Avatar jump state machine
//!
//! Vertical motion follows a half-sine easing curve driven by a phase
//! accumulator. The phase is never reset: a jump request while airborne is
//! absorbed by the arc already in flight, and the next jump continues from
//! wherever the accumulator landed.

use crate::consts::*;
use crate::lerp;

/// Jump state and vertical kinematics for the runner
#[derive(Debug, Clone)]
pub struct AvatarMotion {
    /// Monotone phase-angle accumulator (radians)
    phase: f32,
    /// Current vertical position, always within `[rest_y, peak_y]`
    y: f32,
    is_jumping: bool,
    returning_to_rest: bool,
    rest_y: f32,
    peak_y: f32,
}

impl Default for AvatarMotion {
    fn default() -> Self {
        Self::new(AVATAR_REST_Y, AVATAR_PEAK_Y)
    }
}

impl AvatarMotion {
    pub fn new(rest_y: f32, peak_y: f32) -> Self {
        Self {
            phase: 0.0,
            y: rest_y,
            is_jumping: false,
            returning_to_rest: false,
            rest_y,
            peak_y,
        }
    }

    /// Begin a jump. Ignored while airborne: the existing arc continues
    /// rather than restarting.
    pub fn request_jump(&mut self) {
        if !self.is_jumping {
            self.is_jumping = true;
        }
    }

    /// Advance the jump arc by one step. No-op while resting.
    pub fn step(&mut self) {
        if !self.is_jumping {
            return;
        }

        self.phase += JUMP_PHASE_STEP;
        let t = (self.phase.sin() / 2.0) + 0.5;

        // Landing check runs before the position update, so the final
        // resting height is the last value computed on the way down.
        if self.returning_to_rest && t < JUMP_LAND_TOLERANCE {
            self.returning_to_rest = false;
            self.is_jumping = false;
            return;
        }

        self.y = lerp(self.rest_y, self.peak_y, t);

        // Apex: y rounds to the peak at 2 decimal places
        if (self.y * 100.0).round() / 100.0 >= self.peak_y {
            self.returning_to_rest = true;
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// True while a jump arc is in flight. Gates collision checks and the
    /// run-animation pause flag.
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn rest_y(&self) -> f32 {
        self.rest_y
    }

    pub fn peak_y(&self) -> f32 {
        self.peak_y
    }
}
