//! Routing of drained simulation events
//!
//! Both drivers hand the frame's events to `dispatch`: cues go to whatever
//! plays them and every new best is written to the best score slot.

use crate::persistence::BestScoreSlot;
use crate::sim::{Cue, GameEvent};

/// Persist new bests and forward cues in emission order
pub fn dispatch(
    events: impl IntoIterator<Item = GameEvent>,
    best_slot: &mut BestScoreSlot,
    mut on_cue: impl FnMut(Cue),
) {
    for event in events {
        match event {
            GameEvent::Cue(cue) => on_cue(cue),
            GameEvent::NewBest(best) => {
                log::info!("New best score: {}", best);
                best_slot.save(best);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{GameState, Pipe, TickInput, activate, tick};

    fn memory_slot() -> BestScoreSlot {
        BestScoreSlot::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_passing_best_reaches_storage() {
        let mut slot = memory_slot();
        slot.save(3);

        let mut state = GameState::new(12345, slot.load());
        state.frames = 1;
        activate(&mut state);
        state.drain_events();
        state.bird.y = BIRD_START_Y;
        state.bird.vel = 0.0;
        state.score.value = 4;
        state.pipes.push(Pipe {
            x: -PIPE_WIDTH + 1.0,
            gap_top: 100.0,
        });
        tick(&mut state, &TickInput::default());

        let mut cues = Vec::new();
        dispatch(state.drain_events(), &mut slot, |cue| cues.push(cue));
        assert_eq!(cues, vec![Cue::Score]);
        assert_eq!(slot.load(), 5);
    }

    #[test]
    fn test_cues_only_leave_storage_alone() {
        let mut slot = memory_slot();
        slot.save(9);

        let mut cues = Vec::new();
        dispatch(
            [GameEvent::Cue(Cue::Jump), GameEvent::Cue(Cue::Crash)],
            &mut slot,
            |cue| cues.push(cue),
        );
        assert_eq!(cues, vec![Cue::Jump, Cue::Crash]);
        assert_eq!(slot.load(), 9);
    }

    #[test]
    fn test_latest_best_wins() {
        let mut slot = memory_slot();
        dispatch(
            [
                GameEvent::NewBest(1),
                GameEvent::Cue(Cue::Score),
                GameEvent::NewBest(2),
            ],
            &mut slot,
            |_| {},
        );
        assert_eq!(slot.load(), 2);
    }
}
