//! Neon Flap - A neon/retro flappy arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, particles, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `persistence`: Best score slot in LocalStorage
//! - `events`: Routing of sim events to audio and storage
//! - `theme`: Cosmetic color palettes
//! - `settings`: URL-driven preferences
//! - `clock`: Frame timing / FPS

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod clock;
pub mod events;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;

pub use clock::FrameClock;
pub use persistence::BestScoreSlot;
pub use settings::Settings;
pub use theme::{Theme, ThemeId};

/// Game configuration constants
///
/// All distances are in logical canvas pixels, all rates are per frame.
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 320.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 80.0;
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Bird defaults
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = 150.0;
    pub const BIRD_SIZE: f32 = 20.0;
    pub const GRAVITY: f32 = 0.25;
    /// Upward impulse applied by a flap (velocity becomes -JUMP)
    pub const JUMP: f32 = 4.6;
    /// Idle bob while waiting on the ready screen
    pub const IDLE_AMPLITUDE: f32 = 5.0;
    pub const IDLE_PERIOD_DIVISOR: f32 = 15.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 110.0;
    pub const PIPE_SPEED: f32 = 2.0;
    pub const PIPE_SPAWN_INTERVAL: u64 = 100;
    /// Gap never starts closer than this to the top of the canvas
    pub const PIPE_MIN_TOP: f32 = 50.0;
    /// Vertical room reserved under the gap top (gap plus margin above the ground)
    pub const PIPE_BOTTOM_RESERVE: f32 = 150.0;
    /// Hitbox shrink on every side of the bird against pipes (not the ground)
    pub const COLLISION_PADDING: f32 = 4.0;

    /// Frames after death before a restart is accepted
    pub const RESTART_COOLDOWN_FRAMES: u64 = 30;
    /// Frames after death during which the bird still blinks
    pub const DEATH_BLINK_FRAMES: u64 = 10;

    /// Camera shake
    pub const SHAKE_START: f32 = 20.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_CUTOFF: f32 = 0.5;

    /// Particles
    pub const EXPLOSION_PARTICLES: usize = 20;
    pub const FLAP_TRAIL_PARTICLES: usize = 3;
    pub const TRAIL_INTERVAL: u64 = 5;
    /// Trail particles spawn this far below the bird's top edge
    pub const TRAIL_OFFSET_Y: f32 = 10.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}
