use serde::{Deserialize, Serialize};

use crate::scroll::ScrollOptions;
use crate::Result;

/// Top-level configuration structure for the engine.
///
/// Defaults carry the canonical tuning constants; JSON round-trips through
/// [`AppConfig::from_json_str`] and [`AppConfig::to_json`] so hosts can ship
/// overrides next to the page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub scroll: ScrollOptions,
}

impl AppConfig {
    pub fn live_defaults() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Host page details that cannot be derived from the stage itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageConfig {
    /// Calendar year written into the year-display element, when present.
    pub year: Option<i32>,
}

/// Tuning for the particle field simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Lower bound on the particle count regardless of surface size.
    pub min_count: usize,
    /// One particle per this many square pixels of surface area.
    pub density_divisor: f32,
    /// Quiet period after the last resize before the field regenerates.
    pub resize_debounce: f32,
    /// Velocity magnitude range per axis, centred on zero.
    pub speed: f32,
    pub radius_min: f32,
    pub radius_range: f32,
    /// Fill alpha; low on purpose, the flicker-trail look depends on it.
    pub alpha: f32,
    pub hue_base: f32,
    pub hue_swing: f32,
    pub hue_rate: f32,
    /// How far combined bin energy can push the radius past baseline.
    pub amp_gain: f32,
    /// Frequency bins sampled for the amplitude factor (low/mid/high).
    pub amp_bins: [usize; 3],
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            min_count: 40,
            density_divisor: 20_000.0,
            resize_debounce: 0.2,
            speed: 0.6,
            radius_min: 0.6,
            radius_range: 2.0,
            alpha: 0.08,
            hue_base: 180.0,
            hue_swing: 30.0,
            hue_rate: 0.3,
            amp_gain: 0.6,
            amp_bins: [10, 30, 60],
        }
    }
}

/// Configuration for the microphone spectrum analyser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    /// Per-bin magnitude smoothing constant, matching the analyser the
    /// original audio graph was built around.
    pub smoothing: f32,
    /// Decibel floor mapped to byte energy 0.
    pub min_db: f32,
    /// Decibel ceiling mapped to byte energy 255.
    pub max_db: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

/// Tuning for the custom cursor follower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered each frame.
    pub damping: f32,
    /// Fixed square size of the cursor element in pixels.
    pub size: f32,
    /// Viewports at or below this width keep the native cursor.
    pub min_viewport_width: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            damping: 0.18,
            size: 24.0,
            min_viewport_width: 640.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_canonical_constants() {
        let config = AppConfig::live_defaults();
        assert_eq!(config.particles.min_count, 40);
        assert_eq!(config.particles.density_divisor, 20_000.0);
        assert_eq!(config.particles.resize_debounce, 0.2);
        assert_eq!(config.particles.amp_bins, [10, 30, 60]);
        assert_eq!(config.cursor.damping, 0.18);
        assert_eq!(config.cursor.min_viewport_width, 640.0);
        assert_eq!(config.scroll.duration, 1.1);
        assert!(config.scroll.smooth_wheel);
        assert!(!config.scroll.smooth_touch);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = AppConfig::live_defaults();
        config.page.year = Some(2026);
        config.particles.min_count = 12;

        let json = config.to_json().unwrap();
        let restored = AppConfig::from_json_str(&json).unwrap();
        assert_eq!(restored.page.year, Some(2026));
        assert_eq!(restored.particles.min_count, 12);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = AppConfig::from_json_str("{\"page\":{\"year\":2025}}").unwrap();
        assert_eq!(config.page.year, Some(2025));
        assert_eq!(config.audio.smoothing, 0.8);
    }
}
