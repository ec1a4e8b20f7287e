//! Audio system using Web Audio API
//!
//! Every cue is synthesized from a single oscillator; no sound files.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::Cue;

/// Exponential ramps cannot reach zero
const MIN_GAIN: f32 = 0.0001;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context or without audio hardware
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx
            && ctx.state() == AudioContextState::Suspended
        {
            let _ = ctx.resume();
        }
    }

    /// Play a gameplay cue
    pub fn play(&self, cue: Cue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        self.resume();

        match cue {
            Cue::Jump => self.play_jump(ctx),
            Cue::Score => self.play_score(ctx),
            Cue::Crash => self.play_crash(ctx),
        }
    }

    /// Scaled gain, never below what an exponential ramp accepts
    fn gain(&self, level: f32) -> f32 {
        (level * self.volume).max(MIN_GAIN)
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Flap - quick rising chirp
    fn play_jump(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .linear_ramp_to_value_at_time(600.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(self.gain(0.1), t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(self.gain(0.01), t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Pipe passed - two-step ding
    fn play_score(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 1000.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(1000.0, t).ok();
        osc.frequency().set_value_at_time(2000.0, t + 0.1).ok();
        gain.gain().set_value_at_time(self.gain(0.1), t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.gain(0.01), t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Crash - falling buzz
    fn play_crash(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(10.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(self.gain(0.2), t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(self.gain(0.01), t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}
