//! Run score and best score

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Pipes passed this run
    pub value: u32,
    /// Highest value ever reached (loaded from storage at startup)
    pub best: u32,
}

impl Score {
    pub fn with_best(best: u32) -> Self {
        Self { value: 0, best }
    }

    /// Count one passed pipe.
    /// Returns the new best if this increment raised it.
    pub fn increment(&mut self) -> Option<u32> {
        self.value += 1;
        if self.value > self.best {
            self.best = self.value;
            Some(self.best)
        } else {
            None
        }
    }

    /// Start a new run; best is kept
    pub fn reset(&mut self) {
        self.value = 0;
    }
}
