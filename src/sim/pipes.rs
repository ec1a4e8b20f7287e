//! Pipe obstacles
//!
//! Pipes are kept in spawn order. Since they all scroll left at the same
//! speed, the front of the queue is always the oldest and leftmost pipe, so
//! retirement only ever pops from the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::collision::pipe_hit;
use crate::consts::*;

/// A top/bottom pipe pair sharing one gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Top of the gap (bottom edge of the top body)
    pub gap_top: f32,
}

impl Pipe {
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + PIPE_GAP
    }

    /// Fully past the left edge of the canvas
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Pick a gap top for a new pipe from a uniform roll in [0, 1)
///
/// Never closer than `PIPE_MIN_TOP` to the top, and never low enough to push
/// the gap bottom within `PIPE_BOTTOM_RESERVE - PIPE_GAP` of the ground.
pub fn gap_top_from_roll(roll: f32) -> f32 {
    (roll * (GROUND_Y - PIPE_BOTTOM_RESERVE)).max(PIPE_MIN_TOP)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipes {
    queue: VecDeque<Pipe>,
}

impl Pipes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Should a pipe spawn on this frame?
    pub fn spawn_due(frames: u64) -> bool {
        frames.is_multiple_of(PIPE_SPAWN_INTERVAL)
    }

    /// Append a pipe at the right edge of the canvas
    pub fn spawn(&mut self, rng: &mut impl Rng) {
        let gap_top = gap_top_from_roll(rng.random::<f32>());
        self.queue.push_back(Pipe {
            x: CANVAS_WIDTH,
            gap_top,
        });
        log::debug!("Pipe spawned, gap_top={:.1} ({} live)", gap_top, self.queue.len());
    }

    /// Scroll every pipe left by one frame
    pub fn advance(&mut self) {
        for pipe in &mut self.queue {
            pipe.x -= PIPE_SPEED;
        }
    }

    /// Does the bird hit any pipe?
    pub fn hits(&self, bird: &Bird) -> bool {
        self.queue.iter().any(|pipe| pipe_hit(bird, pipe))
    }

    /// Pop the oldest pipe if it has scrolled fully off-screen
    pub fn retire_front(&mut self) -> Option<Pipe> {
        if self.queue.front().is_some_and(Pipe::is_offscreen) {
            self.queue.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.queue.iter()
    }

    /// First pipe whose right edge is still ahead of the given x
    pub fn next_ahead_of(&self, x: f32) -> Option<&Pipe> {
        self.queue.iter().find(|pipe| pipe.right() > x)
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, pipe: Pipe) {
        self.queue.push_back(pipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pipes = Pipes::new();
        pipes.spawn(&mut rng);
        let pipe = pipes.iter().next().copied().unwrap();
        assert_eq!(pipe.x, CANVAS_WIDTH);
        assert!(pipe.gap_top >= PIPE_MIN_TOP);
    }

    #[test]
    fn test_advance_fifty_frames() {
        let mut pipes = Pipes::new();
        pipes.push(Pipe {
            x: CANVAS_WIDTH,
            gap_top: 100.0,
        });
        for _ in 0..50 {
            pipes.advance();
            assert!(pipes.retire_front().is_none());
        }
        assert_eq!(pipes.iter().next().unwrap().x, CANVAS_WIDTH - 100.0);
        assert_eq!(pipes.len(), 1);
    }

    #[test]
    fn test_retire_only_when_fully_offscreen() {
        let mut pipes = Pipes::new();
        pipes.push(Pipe {
            x: -PIPE_WIDTH + 2.0,
            gap_top: 100.0,
        });
        assert!(pipes.retire_front().is_none());
        pipes.advance();
        assert!(pipes.retire_front().is_some());
        assert!(pipes.is_empty());
    }

    #[test]
    fn test_spawn_due() {
        assert!(Pipes::spawn_due(0));
        assert!(!Pipes::spawn_due(1));
        assert!(!Pipes::spawn_due(99));
        assert!(Pipes::spawn_due(100));
        assert!(Pipes::spawn_due(300));
    }

    #[test]
    fn test_gap_extremes() {
        assert_eq!(gap_top_from_roll(0.0), PIPE_MIN_TOP);
        let max = gap_top_from_roll(0.999_999);
        assert!(max + PIPE_GAP < GROUND_Y);
    }

    proptest! {
        #[test]
        fn prop_gap_within_bounds(roll in 0.0f32..1.0) {
            let top = gap_top_from_roll(roll);
            prop_assert!(top >= PIPE_MIN_TOP);
            prop_assert!(top + PIPE_GAP <= GROUND_Y - (PIPE_BOTTOM_RESERVE - PIPE_GAP));
        }

        #[test]
        fn prop_queue_stays_ordered(seed in any::<u64>(), frames in 1u64..2000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pipes = Pipes::new();
            for frame in 0..frames {
                if Pipes::spawn_due(frame) {
                    pipes.spawn(&mut rng);
                }
                pipes.advance();
                while pipes.retire_front().is_some() {}

                let xs: Vec<f32> = pipes.iter().map(|p| p.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
                prop_assert!(pipes.iter().all(|p| !p.is_offscreen()));
            }
        }
    }
}
