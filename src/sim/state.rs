//! Game state and core simulation types
//!
//! `GameState` is the whole world: every gameplay object is owned here and
//! threaded through `tick` by the frame driver.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::particles::Particles;
use super::pipes::Pipes;
use super::score::Score;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird bobs in place, waiting for the first input
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; restart unlocks after a short cooldown
    GameOver,
}

/// Named sound cues raised by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Start of a run and every flap
    Jump,
    /// Pipe passed
    Score,
    /// Bird hit a pipe or the ground
    Crash,
}

/// Side effects the simulation asks the outside world to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(Cue),
    /// Best score went up; persist it
    NewBest(u32),
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Frame counter, reset to 0 on restart
    pub frames: u64,
    /// Frame at which the last GameOver began
    pub die_frame: u64,
    /// Camera shake magnitude (pixels, decays every frame)
    pub screen_shake: f32,
    pub bird: Bird,
    pub pipes: Pipes,
    pub particles: Particles,
    pub score: Score,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Gameplay RNG (pipe gaps, particle scatter)
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new game state with the given seed and stored best score
    pub fn new(seed: u64, best: u32) -> Self {
        Self {
            seed,
            phase: GamePhase::Ready,
            frames: 0,
            die_frame: 0,
            screen_shake: 0.0,
            bird: Bird::default(),
            pipes: Pipes::new(),
            particles: Particles::new(),
            score: Score::with_best(best),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Frames elapsed since the bird died
    pub fn frames_since_death(&self) -> u64 {
        self.frames.saturating_sub(self.die_frame)
    }

    /// Has the post-death cooldown elapsed?
    pub fn can_restart(&self) -> bool {
        self.phase == GamePhase::GameOver
            && self.frames_since_death() >= crate::consts::RESTART_COOLDOWN_FRAMES
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
