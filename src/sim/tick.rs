//! Per-frame simulation tick
//!
//! Core game loop that advances the world by exactly one display frame and
//! owns every phase transition.

use super::bird::BirdStep;
use super::particles::ParticleKind;
use super::state::{Cue, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// The one gameplay action (key, click or tap)
    pub activate: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let activate = input.activate || (input.autopilot && autopilot_wants_activate(state));
    if activate {
        self::activate(state);
    }

    // Decay screen shake
    if state.screen_shake > 0.0 {
        state.screen_shake *= SHAKE_DECAY;
        if state.screen_shake < SHAKE_CUTOFF {
            state.screen_shake = 0.0;
        }
    }

    match state.phase {
        GamePhase::Ready => state.bird.idle(state.frames),
        GamePhase::Playing | GamePhase::GameOver => {
            // The bird keeps falling after a crash until it lands
            if state.bird.integrate() == BirdStep::Grounded && state.phase == GamePhase::Playing {
                log::debug!("Ground hit at frame {}", state.frames);
                game_over(state);
            }
        }
    }

    if state.phase == GamePhase::Playing {
        update_pipes(state);
    }

    state.particles.update();

    if state.phase == GamePhase::Playing && state.frames.is_multiple_of(TRAIL_INTERVAL) {
        let tail = state.bird.tail();
        state
            .particles
            .burst(tail, ParticleKind::Trail, 1, &mut state.rng);
    }

    state.frames += 1;
}

/// Spawn, scroll, collide and retire pipes (Playing only)
fn update_pipes(state: &mut GameState) {
    if super::pipes::Pipes::spawn_due(state.frames) {
        state.pipes.spawn(&mut state.rng);
    }

    state.pipes.advance();

    if state.pipes.hits(&state.bird) {
        log::debug!("Pipe hit at frame {}", state.frames);
        game_over(state);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    while state.pipes.retire_front().is_some() {
        state.emit(GameEvent::Cue(Cue::Score));
        if let Some(best) = state.score.increment() {
            state.emit(GameEvent::NewBest(best));
        }
    }
}

/// Handle the activate action for the current phase
///
/// Ready starts the run, Playing flaps, GameOver restarts once the cooldown
/// has elapsed (earlier presses are ignored).
pub fn activate(state: &mut GameState) {
    match state.phase {
        GamePhase::Ready => {
            state.phase = GamePhase::Playing;
            state.emit(GameEvent::Cue(Cue::Jump));
            log::info!("Run started (best {})", state.score.best);
        }
        GamePhase::Playing => {
            state.bird.flap();
            state.emit(GameEvent::Cue(Cue::Jump));
            let tail = state.bird.tail();
            state.particles.burst(
                tail,
                ParticleKind::Trail,
                FLAP_TRAIL_PARTICLES,
                &mut state.rng,
            );
        }
        GamePhase::GameOver => {
            if state.can_restart() {
                reset(state);
            }
        }
    }
}

/// Enter GameOver. A no-op if the run is already over.
pub fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.phase = GamePhase::GameOver;
    state.emit(GameEvent::Cue(Cue::Crash));
    let center = state.bird.center();
    state.particles.burst(
        center,
        ParticleKind::Explosion,
        EXPLOSION_PARTICLES,
        &mut state.rng,
    );
    state.screen_shake = SHAKE_START;
    state.die_frame = state.frames;

    log::info!(
        "Game over at frame {} with score {} (best {})",
        state.frames,
        state.score.value,
        state.score.best
    );
}

/// Back to the ready screen with a fresh run
fn reset(state: &mut GameState) {
    state.bird.reset_speed();
    state.pipes.clear();
    state.score.reset();
    state.particles.clear();
    state.screen_shake = 0.0;
    state.frames = 0;
    state.phase = GamePhase::Ready;
}

/// Target line for the autopilot: a little below the middle of the next gap
fn autopilot_target(state: &GameState) -> f32 {
    state
        .pipes
        .next_ahead_of(state.bird.x)
        .map(|pipe| pipe.gap_top + PIPE_GAP * 0.65)
        .unwrap_or(GROUND_Y * 0.5)
}

/// Should the autopilot flap this frame?
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    state.bird.y + state.bird.size > autopilot_target(state)
}

fn autopilot_wants_activate(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::Playing => autopilot_wants_flap(state),
        GamePhase::GameOver => state.can_restart(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Pipe;

    const PRESS: TickInput = TickInput {
        activate: true,
        autopilot: false,
    };
    const IDLE: TickInput = TickInput {
        activate: false,
        autopilot: false,
    };

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 0);
        // Start on a frame that doesn't spawn a pipe
        state.frames = 1;
        activate(&mut state);
        state.drain_events();
        state.bird.y = BIRD_START_Y;
        state.bird.vel = 0.0;
        state
    }

    #[test]
    fn test_ready_to_playing() {
        let mut state = GameState::new(12345, 0);
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::Ready);

        tick(&mut state, &PRESS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Cue(Cue::Jump))
        );
    }

    #[test]
    fn test_ready_ignores_physics() {
        let mut state = GameState::new(1, 0);
        for _ in 0..100 {
            tick(&mut state, &IDLE);
            assert!((state.bird.y - BIRD_START_Y).abs() <= IDLE_AMPLITUDE + 1e-4);
            assert_eq!(state.bird.vel, 0.0);
        }
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_one_playing_frame() {
        let mut state = playing_state();
        tick(&mut state, &IDLE);
        assert_eq!(state.bird.vel, 0.25);
        assert_eq!(state.bird.y, 150.25);
    }

    #[test]
    fn test_flap_sets_jump_and_trail() {
        let mut state = playing_state();
        state.bird.vel = 3.0;
        let before = state.particles.len();
        activate(&mut state);
        assert_eq!(state.bird.vel, -JUMP);
        assert_eq!(state.particles.len(), before + FLAP_TRAIL_PARTICLES);
        assert_eq!(state.drain_events(), vec![GameEvent::Cue(Cue::Jump)]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ground_hit_ends_run() {
        let mut state = playing_state();
        state.bird.y = GROUND_Y - BIRD_SIZE - 0.1;
        state.bird.vel = 2.0;
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.y, GROUND_Y - BIRD_SIZE);
        assert_eq!(state.screen_shake, SHAKE_START);
        assert!(state.drain_events().contains(&GameEvent::Cue(Cue::Crash)));
    }

    #[test]
    fn test_game_over_idempotent() {
        let mut state = playing_state();
        state.frames = 40;
        game_over(&mut state);
        let particles = state.particles.len();
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Cue(Cue::Crash)]);
        assert_eq!(state.die_frame, 40);
        assert_eq!(particles, EXPLOSION_PARTICLES);

        state.frames = 45;
        game_over(&mut state);
        assert_eq!(state.particles.len(), particles);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.die_frame, 40);
    }

    #[test]
    fn test_restart_cooldown() {
        let mut state = playing_state();
        state.frames = 100;
        game_over(&mut state);

        state.frames = 100 + RESTART_COOLDOWN_FRAMES - 1;
        activate(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.frames = 100 + RESTART_COOLDOWN_FRAMES;
        activate(&mut state);
        assert_eq!(state.phase, GamePhase::Ready);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = playing_state();
        state.score.value = 3;
        state.score.best = 5;
        state.pipes.push(Pipe {
            x: 100.0,
            gap_top: 80.0,
        });
        state.frames = 200;
        game_over(&mut state);
        state.frames = 260;
        state.bird.vel = 6.0;

        activate(&mut state);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.frames, 0);
        assert_eq!(state.bird.vel, 0.0);
        assert!(state.pipes.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score.value, 0);
        assert_eq!(state.score.best, 5);
        assert_eq!(state.screen_shake, 0.0);
    }

    #[test]
    fn test_cooldown_through_ticks() {
        let mut state = playing_state();
        game_over(&mut state);
        let die_frame = state.die_frame;

        // Mashing the button every frame only restarts once the cooldown is over
        while state.phase == GamePhase::GameOver {
            let before = state.frames;
            tick(&mut state, &PRESS);
            if state.phase == GamePhase::Ready {
                assert_eq!(before - die_frame, RESTART_COOLDOWN_FRAMES);
            }
        }
    }

    #[test]
    fn test_pipe_spawned_at_frame_zero() {
        let mut state = GameState::new(5, 0);
        state.phase = GamePhase::Playing;
        // Keep the bird from falling out of the sky
        for _ in 0..50 {
            state.bird.y = 150.0;
            state.bird.vel = 0.0;
            tick(&mut state, &IDLE);
        }
        assert_eq!(state.pipes.len(), 1);
        let pipe = state.pipes.iter().next().unwrap();
        assert_eq!(pipe.x, CANVAS_WIDTH - 100.0);
        assert_eq!(state.score.value, 0);
    }

    #[test]
    fn test_retirement_scores_and_persists_best() {
        let mut state = playing_state();
        state.score.value = 4;
        state.score.best = 3;
        state.pipes.push(Pipe {
            x: -PIPE_WIDTH + 1.0,
            gap_top: 100.0,
        });
        tick(&mut state, &IDLE);
        assert_eq!(state.score.value, 5);
        assert_eq!(state.score.best, 5);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Cue(Cue::Score), GameEvent::NewBest(5)]
        );
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_pipes_frozen_outside_playing() {
        let mut state = playing_state();
        state.pipes.push(Pipe {
            x: 200.0,
            gap_top: 100.0,
        });
        game_over(&mut state);
        for _ in 0..10 {
            tick(&mut state, &IDLE);
        }
        assert_eq!(state.pipes.iter().next().unwrap().x, 200.0);
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut state = playing_state();
        game_over(&mut state);
        tick(&mut state, &IDLE);
        assert!((state.screen_shake - SHAKE_START * SHAKE_DECAY).abs() < 1e-4);
        for _ in 0..100 {
            tick(&mut state, &IDLE);
        }
        assert_eq!(state.screen_shake, 0.0);
    }

    #[test]
    fn test_trail_every_fifth_frame() {
        let mut state = playing_state();
        state.frames = 5;
        tick(&mut state, &IDLE);
        assert_eq!(state.particles.len(), 1);
        tick(&mut state, &IDLE);
        assert_eq!(state.particles.len(), 1);
    }

    #[test]
    fn test_autopilot_survives() {
        let mut state = GameState::new(2024, 0);
        let input = TickInput {
            activate: false,
            autopilot: true,
        };
        for _ in 0..2000 {
            tick(&mut state, &input);
        }
        assert!(state.score.best >= 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);

        for frame in 0..600u32 {
            let input = TickInput {
                activate: frame % 23 == 0,
                autopilot: false,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
