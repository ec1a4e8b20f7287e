//! Visual themes
//!
//! Two immutable palettes selected by `ThemeId`. Switching themes swaps which
//! static record the renderer reads; it never touches gameplay state.

use serde::{Deserialize, Serialize};

use crate::sim::ParticleKind;

/// RGBA color in 0-1 floats, written straight to the surface
pub type Color = [f32; 4];

/// Opaque color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Color {
    hexa(rgb, 1.0)
}

/// Color from a 0xRRGGBB literal with explicit alpha
pub const fn hexa(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Explosion particles use this regardless of theme
pub const EXPLOSION_COLOR: Color = hex(0xff0055);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeId {
    #[default]
    Neon,
    Retro,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Neon => "neon",
            ThemeId::Retro => "retro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "neon" => Some(ThemeId::Neon),
            "retro" => Some(ThemeId::Retro),
            _ => None,
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemeId::Neon => ThemeId::Retro,
            ThemeId::Retro => ThemeId::Neon,
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeId::Neon => &NEON,
            ThemeId::Retro => &RETRO,
        }
    }

    /// Label for the toggle button
    pub fn label(self) -> &'static str {
        match self {
            ThemeId::Neon => "MODE: NEON",
            ThemeId::Retro => "MODE: RETRO",
        }
    }
}

/// Palette and style flags for one theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: ThemeId,
    pub bg_top: Color,
    pub bg_bottom: Color,
    pub bird: Color,
    pub bird_border: Color,
    pub pipe: Color,
    pub pipe_border: Color,
    /// Translucent stripe painted down each pipe
    pub pipe_highlight: Color,
    pub ground: Color,
    pub grid: Color,
    /// Sun gradient (bottom, top); `None` draws clouds instead
    pub sun: Option<(Color, Color)>,
    pub particle: Color,
    /// Soft halos around bright shapes
    pub glow: bool,
    /// CRT scanline overlay
    pub scanlines: bool,
}

impl Theme {
    pub fn particle_color(&self, kind: ParticleKind) -> Color {
        match kind {
            ParticleKind::Trail => self.particle,
            ParticleKind::Explosion => EXPLOSION_COLOR,
        }
    }
}

pub static NEON: Theme = Theme {
    id: ThemeId::Neon,
    bg_top: hex(0x1a0b2e),
    bg_bottom: hex(0x2d1b4e),
    bird: hex(0x00ffff),
    bird_border: hex(0xffffff),
    pipe: hex(0x111111),
    pipe_border: hex(0xb026ff),
    pipe_highlight: hexa(0xb026ff, 0.2),
    ground: hex(0x000000),
    grid: hex(0xb026ff),
    sun: Some((hex(0xff0055), hex(0xffcc00))),
    particle: hex(0x00ffff),
    glow: true,
    scanlines: true,
};

pub static RETRO: Theme = Theme {
    id: ThemeId::Retro,
    bg_top: hex(0x70c5ce),
    bg_bottom: hex(0x70c5ce),
    bird: hex(0xf1c40f),
    bird_border: hex(0x000000),
    pipe: hex(0x2ecc71),
    pipe_border: hex(0x27ae60),
    pipe_highlight: hexa(0xffffff, 0.2),
    ground: hex(0xded895),
    grid: hex(0xd4ce80),
    sun: None,
    particle: hex(0xffffff),
    glow: false,
    scanlines: false,
};
