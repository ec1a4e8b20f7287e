//! Collision detection between the bird and pipes
//!
//! Everything is axis-aligned. Pipe hits use a hitbox shrunk by
//! `COLLISION_PADDING` on every side; the ground check in `bird` uses none.

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipes::Pipe;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink inward by `pad` on all four sides
    pub fn inset(&self, pad: f32) -> Self {
        Self::new(self.x + pad, self.y + pad, self.w - 2.0 * pad, self.h - 2.0 * pad)
    }

    /// Strict overlap on the horizontal axis (touching edges do not count)
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.x < right
    }
}

impl Bird {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// Does the bird's padded hitbox touch either body of this pipe?
///
/// A hit needs horizontal overlap with the pipe column and a hitbox that is
/// not fully inside the gap.
pub fn pipe_hit(bird: &Bird, pipe: &Pipe) -> bool {
    let hitbox = bird.bounds().inset(COLLISION_PADDING);

    if !hitbox.overlaps_x(pipe.x, pipe.right()) {
        return false;
    }

    hitbox.y < pipe.gap_top || hitbox.bottom() > pipe.gap_bottom()
}
