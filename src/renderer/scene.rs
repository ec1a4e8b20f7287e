//! Frame composition
//!
//! Turns a read-only view of the world into one triangle list in canvas
//! pixels. Nothing here mutates `GameState`; cosmetic randomness (star
//! twinkle, shake jitter) comes from the caller's own RNG.

use glam::Vec2;
use rand::Rng;

use super::shapes;
use super::vertex::Vertex;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Pipe, Rect};
use crate::theme::{Theme, hex, hexa, with_alpha};

const W: f32 = CANVAS_WIDTH;
const H: f32 = CANVAS_HEIGHT;

const SUN_CENTER: Vec2 = Vec2::new(W / 2.0, 350.0);
const SUN_RADIUS: f32 = 80.0;
/// Vertical band the sun gradient runs over
const SUN_GRADIENT: (f32, f32) = (100.0, 300.0);

/// Ground scroll per frame
const GROUND_SCROLL: u64 = 3;
/// Death blink half period
const BLINK_MS: f64 = 200.0;

/// Everything `build` reads besides the world itself
pub struct Frame<'a> {
    pub theme: &'a Theme,
    pub settings: &'a Settings,
    /// Wall clock in milliseconds
    pub time_ms: f64,
}

/// Build the vertex list for one frame
pub fn build(state: &GameState, frame: &Frame<'_>, rng: &mut impl Rng) -> Vec<Vertex> {
    let theme = frame.theme;
    let mut vertices = Vec::with_capacity(4096);

    background(&mut vertices, state.frames, theme, rng);
    for pipe in state.pipes.iter() {
        pipe_pair(&mut vertices, pipe, theme);
    }
    ground(&mut vertices, state.frames, theme);
    if frame.settings.effective_particles() {
        particles(&mut vertices, state, theme);
    }
    if bird_visible(state, frame.time_ms) {
        bird(&mut vertices, state, theme);
    }

    if state.screen_shake > 0.0 && frame.settings.effective_screen_shake() {
        let offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * state.screen_shake,
            (rng.random::<f32>() - 0.5) * state.screen_shake,
        );
        for v in &mut vertices {
            v.translate(offset);
        }
    }

    if theme.scanlines {
        scanlines(&mut vertices);
    }

    vertices
}

/// Is the bird drawn this frame? Always outside GameOver; after a crash it
/// blinks for a few frames, then disappears.
///
/// Drawing happens after the tick advanced `frames`, so the crash frame
/// itself is already one frame since death.
pub fn bird_visible(state: &GameState, time_ms: f64) -> bool {
    if state.phase != GamePhase::GameOver {
        return true;
    }
    let blink_on = (time_ms / BLINK_MS).floor() as i64 % 2 == 1;
    state.frames_since_death() <= DEATH_BLINK_FRAMES && blink_on
}

fn background(out: &mut Vec<Vertex>, frames: u64, theme: &Theme, rng: &mut impl Rng) {
    out.extend(shapes::gradient_rect(
        Rect::new(0.0, 0.0, W, H),
        theme.bg_top,
        theme.bg_bottom,
    ));

    match theme.sun {
        Some((low, high)) => {
            if theme.glow {
                out.extend(shapes::circle_glow(SUN_CENTER, SUN_RADIUS, 20.0, low));
            }
            out.extend(shapes::gradient_circle(
                SUN_CENTER,
                SUN_RADIUS,
                SUN_GRADIENT,
                high,
                low,
                48,
            ));
            // Retro-wave cut lines, thicker toward the horizon
            for y in (280..430).step_by(8) {
                let h = if y > 350 { 4.0 } else { 2.0 };
                out.extend(shapes::rect(
                    Rect::new(W / 2.0 - 90.0, y as f32, 180.0, h),
                    theme.bg_bottom,
                ));
            }
        }
        None => {
            let cloud_x = (frames as f32 * 0.5) % (W + 100.0) - 50.0;
            let white = hexa(0xffffff, 0.5);
            for (dx, dy, r) in [(0.0, 100.0, 30.0), (20.0, 90.0, 40.0), (50.0, 100.0, 30.0)] {
                out.extend(shapes::circle(Vec2::new(cloud_x + dx, dy), r, white, 24));
            }
        }
    }

    if theme.glow && frames.is_multiple_of(10) && rng.random::<f32>() > 0.8 {
        let x = rng.random::<f32>() * W;
        let y = rng.random::<f32>() * 200.0;
        out.extend(shapes::rect(Rect::new(x, y, 2.0, 2.0), hex(0xffffff)));
    }
}

fn pipe_body(out: &mut Vec<Vertex>, body: Rect, theme: &Theme) {
    if body.h <= 0.0 {
        return;
    }
    if theme.glow {
        out.extend(shapes::rect_glow(body, 10.0, theme.pipe_border));
    }
    out.extend(shapes::rect(body, theme.pipe));
    out.extend(shapes::rect_outline(body, 2.0, theme.pipe_border));
}

fn pipe_pair(out: &mut Vec<Vertex>, pipe: &Pipe, theme: &Theme) {
    let top = Rect::new(pipe.x, 0.0, PIPE_WIDTH, pipe.gap_top);
    let bottom = Rect::new(
        pipe.x,
        pipe.gap_bottom(),
        PIPE_WIDTH,
        GROUND_Y - pipe.gap_bottom(),
    );

    pipe_body(out, top, theme);
    pipe_body(out, bottom, theme);

    for body in [top, bottom] {
        out.extend(shapes::rect(
            Rect::new(body.x + 10.0, body.y, 5.0, body.h),
            theme.pipe_highlight,
        ));
    }

    if !theme.glow {
        let caps = [
            Rect::new(pipe.x - 2.0, pipe.gap_top - 20.0, PIPE_WIDTH + 4.0, 20.0),
            Rect::new(pipe.x - 2.0, pipe.gap_bottom(), PIPE_WIDTH + 4.0, 20.0),
        ];
        for cap in caps {
            out.extend(shapes::rect(cap, theme.pipe));
            out.extend(shapes::rect_outline(cap, 2.0, theme.pipe_border));
        }
    }
}

fn ground(out: &mut Vec<Vertex>, frames: u64, theme: &Theme) {
    out.extend(shapes::rect(
        Rect::new(0.0, GROUND_Y, W, GROUND_HEIGHT),
        theme.ground,
    ));

    let offset = ((frames * GROUND_SCROLL) % 40) as f32;

    if theme.glow {
        // Horizon line
        out.extend(shapes::rect_glow(
            Rect::new(0.0, GROUND_Y - 1.5, W, 3.0),
            10.0,
            theme.grid,
        ));
        out.extend(shapes::line(
            Vec2::new(0.0, GROUND_Y),
            Vec2::new(W, GROUND_Y),
            3.0,
            theme.grid,
        ));

        // Perspective grid fanning out from the center
        for i in (0..(W as u32 + 40)).step_by(40) {
            let x = i as f32 - offset;
            let slant = (x - W / 2.0) * 0.8;
            out.extend(shapes::line(
                Vec2::new(x, GROUND_Y),
                Vec2::new(x + slant, H),
                1.0,
                theme.grid,
            ));
        }
        for y in (GROUND_Y as u32..H as u32).step_by(20) {
            out.extend(shapes::line(
                Vec2::new(0.0, y as f32),
                Vec2::new(W, y as f32),
                1.0,
                theme.grid,
            ));
        }
    } else {
        let strip = Rect::new(0.0, GROUND_Y, W, 10.0);
        out.extend(shapes::rect(strip, theme.grid));
        out.extend(shapes::rect_outline(strip, 2.0, hex(0x000000)));

        let mut i = -40.0;
        while i < W {
            let x = i - offset;
            out.extend(shapes::quad(
                [
                    Vec2::new(x, GROUND_Y + 10.0),
                    Vec2::new(x - 10.0, H),
                    Vec2::new(x + 5.0, H),
                    Vec2::new(x + 15.0, GROUND_Y + 10.0),
                ],
                [theme.grid; 4],
            ));
            i += 20.0;
        }
    }
}

fn particles(out: &mut Vec<Vertex>, state: &GameState, theme: &Theme) {
    for p in state.particles.iter() {
        let color = with_alpha(theme.particle_color(p.kind), p.life.clamp(0.0, 1.0));
        out.extend(shapes::rect(
            Rect::new(p.pos.x, p.pos.y, p.size, p.size),
            color,
        ));
    }
}

fn bird(out: &mut Vec<Vertex>, state: &GameState, theme: &Theme) {
    let bird = &state.bird;
    let center = bird.center();
    let angle = bird.tilt();
    let size = bird.size;

    if theme.glow {
        out.extend(shapes::square_glow(center, size, angle, 15.0, theme.bird));
        out.extend(shapes::rotated_square(center, size, angle, theme.bird));
    } else {
        // 2px stroke straddling the edge
        out.extend(shapes::rotated_square(center, size + 2.0, angle, theme.bird_border));
        out.extend(shapes::rotated_square(center, size - 2.0, angle, theme.bird));
    }

    let half = size / 2.0;
    out.extend(shapes::rotated_rect(
        center,
        Rect::new(-half + 12.0, -half + 4.0, 6.0, 6.0),
        angle,
        theme.bird_border,
    ));
}

fn scanlines(out: &mut Vec<Vertex>) {
    let shade = hexa(0x000000, 0.25);
    let mut y = 2.0;
    while y < H {
        out.extend(shapes::rect(Rect::new(0.0, y, W, 2.0), shade));
        y += 4.0;
    }
}
