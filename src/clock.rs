//! Frame timing
//!
//! The simulation advances exactly one tick per displayed frame, so the
//! clock only measures; it never decides how many ticks to run.

/// Number of frames averaged by the FPS meter
const WINDOW: usize = 60;

/// Rolling FPS meter fed with `requestAnimationFrame` timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_times: [f64; WINDOW],
    index: usize,
    recorded: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            index: 0,
            recorded: 0,
            fps: 0,
        }
    }

    /// Record a frame timestamp (ms) and return the current FPS estimate
    pub fn record(&mut self, time_ms: f64) -> u32 {
        self.frame_times[self.index] = time_ms;
        self.index = (self.index + 1) % WINDOW;
        self.recorded = (self.recorded + 1).min(WINDOW);

        // Oldest sample sits at the next write slot once the ring is full
        if self.recorded == WINDOW {
            let oldest = self.frame_times[self.index];
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (((WINDOW - 1) as f64 * 1000.0) / elapsed).round() as u32;
            }
        }

        self.fps
    }

    /// Last computed FPS (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
