//! The player's bird
//!
//! Two motion regimes: a scripted idle bob on the ready screen, and
//! semi-implicit Euler integration once the run has started.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Outcome of one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdStep {
    Airborne,
    /// Bottom edge reached the ground line (position already clamped)
    Grounded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub vel: f32,
    pub size: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_START_Y,
            vel: 0.0,
            size: BIRD_SIZE,
        }
    }
}

impl Bird {
    /// Ready-screen bob; a pure function of the frame counter
    pub fn idle(&mut self, frames: u64) {
        self.y = BIRD_START_Y + (frames as f32 / IDLE_PERIOD_DIVISOR).cos() * IDLE_AMPLITUDE;
    }

    /// Gravity then position, clamped at the ground line
    pub fn integrate(&mut self) -> BirdStep {
        self.vel += GRAVITY;
        self.y += self.vel;

        if self.y + self.size >= GROUND_Y {
            self.y = GROUND_Y - self.size;
            BirdStep::Grounded
        } else {
            BirdStep::Airborne
        }
    }

    /// Overrides the current velocity, it does not add to it
    pub fn flap(&mut self) {
        self.vel = -JUMP;
    }

    pub fn reset_speed(&mut self) {
        self.vel = 0.0;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Where trail particles are emitted
    pub fn tail(&self) -> Vec2 {
        Vec2::new(self.x, self.y + TRAIL_OFFSET_Y)
    }

    /// Cosmetic tilt in radians derived from velocity
    pub fn tilt(&self) -> f32 {
        (self.vel * 0.1).clamp(crate::deg(-25.0), crate::deg(90.0))
    }
}
