//! Game settings and preferences
//!
//! Read once at startup from the page URL query string, e.g.
//! `?theme=retro&volume=0.5&shake=0`. Nothing here is persisted.
//! The browser decodes the query with `URLSearchParams`; natively the same
//! syntax arrives plain through an environment variable.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeId;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Theme shown at startup (the toggle button can still switch it)
    pub theme: ThemeId,

    // === Visual Effects ===
    /// Camera shake on crash
    pub screen_shake: bool,
    /// Trail and explosion particles
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no particles)
    pub reduced_motion: bool,

    // === Debug ===
    /// Fixed run seed instead of the clock
    pub seed: Option<u64>,
    /// Start with the autopilot playing
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeId::Neon,

            screen_shake: true,
            particles: true,

            master_volume: 1.0,
            muted: false,

            reduced_motion: false,

            seed: None,
            autopilot: false,
        }
    }
}

/// Parse a query flag: `1`/`true`/`on`/`yes` or `0`/`false`/`off`/`no`
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Every key `apply` understands
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const KEYS: [&str; 9] = [
    "theme",
    "shake",
    "particles",
    "mute",
    "muted",
    "reduced_motion",
    "autopilot",
    "volume",
    "seed",
];

impl Settings {
    /// Build settings from already decoded key/value pairs, applied in order.
    /// Unknown keys and malformed values are logged and skipped.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if !settings.apply(key, value) {
                log::warn!("Ignoring setting {}={:?}", key, value);
            }
        }
        settings
    }

    /// Build settings from a plain `key=value&...` string (leading `?`
    /// optional). No percent-decoding; the browser path goes through
    /// `URLSearchParams` instead.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(
            query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|pair| pair.split_once('=').unwrap_or((pair, ""))),
        )
    }

    /// Apply one key/value pair; false if it was not understood
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "theme" => ThemeId::from_str(value).map(|t| self.theme = t).is_some(),
            "shake" => parse_flag(value).map(|f| self.screen_shake = f).is_some(),
            "particles" => parse_flag(value).map(|f| self.particles = f).is_some(),
            "mute" | "muted" => parse_flag(value).map(|f| self.muted = f).is_some(),
            "reduced_motion" => parse_flag(value)
                .map(|f| self.reduced_motion = f)
                .is_some(),
            "autopilot" => parse_flag(value).map(|f| self.autopilot = f).is_some(),
            "volume" => value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| self.master_volume = v.clamp(0.0, 1.0))
                .is_some(),
            "seed" => value.parse::<u64>().ok().map(|s| self.seed = Some(s)).is_some(),
            _ => false,
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle drawing (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Volume after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        let pairs: Vec<(&str, String)> = match web_sys::UrlSearchParams::new_with_str(&search) {
            Ok(params) => KEYS
                .iter()
                .filter_map(|&key| params.get(key).map(|value| (key, value)))
                .collect(),
            Err(e) => {
                log::warn!("Unreadable query string {:?}: {:?}", search, e);
                Vec::new()
            }
        };

        let settings = Self::from_pairs(pairs);
        match serde_json::to_string(&settings) {
            Ok(json) => log::info!("Settings: {}", json),
            Err(e) => log::warn!("Settings not printable: {}", e),
        }
        settings
    }

    /// Native: settings come from the `NEON_FLAP` environment variable,
    /// using the same `key=value&...` syntax
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        std::env::var("NEON_FLAP")
            .map(|query| Self::from_query(&query))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_full_query() {
        let s = Settings::from_query("?theme=retro&volume=0.5&mute=1&shake=off&particles=0&seed=42&autopilot");
        assert_eq!(s.theme, ThemeId::Retro);
        assert_eq!(s.master_volume, 0.5);
        assert!(s.muted);
        assert!(!s.screen_shake);
        assert!(!s.particles);
        assert_eq!(s.seed, Some(42));
        assert!(s.autopilot);
    }

    #[test]
    fn test_bad_values_ignored() {
        let s = Settings::from_query("theme=vapor&volume=loud&seed=-1&bogus=1");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_decoded_pairs() {
        // What URLSearchParams hands back for `?theme=%72etro&volume=0%2E25&autopilot`
        let s = Settings::from_pairs([("theme", "retro"), ("volume", "0.25"), ("autopilot", "")]);
        assert_eq!(s.theme, ThemeId::Retro);
        assert_eq!(s.master_volume, 0.25);
        assert!(s.autopilot);
    }

    #[test]
    fn test_later_pair_wins() {
        let s = Settings::from_pairs(vec![
            ("mute".to_string(), "1".to_string()),
            ("muted".to_string(), "0".to_string()),
        ]);
        assert!(!s.muted);
    }

    #[test]
    fn test_every_key_is_understood() {
        let mut s = Settings::default();
        for key in KEYS {
            let value = match key {
                "theme" => "retro",
                "volume" => "0.5",
                "seed" => "7",
                _ => "1",
            };
            assert!(s.apply(key, value), "{} rejected", key);
        }
        assert!(!s.apply("bogus", "1"));
    }

    #[test]
    fn test_volume_clamped() {
        assert_eq!(Settings::from_query("volume=3").master_volume, 1.0);
        assert_eq!(Settings::from_query("volume=-2").master_volume, 0.0);
    }

    #[test]
    fn test_reduced_motion_wins() {
        let s = Settings::from_query("reduced_motion=1");
        assert!(s.screen_shake && s.particles);
        assert!(!s.effective_screen_shake());
        assert!(!s.effective_particles());
    }

    #[test]
    fn test_effective_volume() {
        let mut s = Settings::default();
        assert_eq!(s.effective_volume(), 1.0);
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
    }
}
