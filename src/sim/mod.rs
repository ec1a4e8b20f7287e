//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies (side effects leave as `GameEvent`s)

pub mod bird;
pub mod collision;
pub mod particles;
pub mod pipes;
pub mod score;
pub mod state;
pub mod tick;

pub use bird::{Bird, BirdStep};
pub use collision::{Rect, pipe_hit};
pub use particles::{Particle, ParticleKind, Particles};
pub use pipes::{Pipe, Pipes};
pub use score::Score;
pub use state::{Cue, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, activate, autopilot_wants_flap, game_over, tick};
