//! Engine tuning
//!
//! Read once at startup. Missing fields fall back to the defaults, which
//! match the classic two-paddle shape-motion scene.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_HZ;

/// Tunable parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Timer interrupts per second
    pub tick_hz: u32,
    /// Run the engine once every this many interrupts
    pub advance_every: u32,

    // === Motion ===
    /// Ball velocity at start and after reset
    pub ball_velocity: [i32; 2],
    /// Decorative arrow velocity
    pub arrow_velocity: [i32; 2],
    /// Horizontal speed of the computer-steered top paddle
    pub ai_paddle_speed: i32,
    /// Horizontal speed of the button-steered bottom paddle
    pub player_paddle_speed: i32,
    /// Vertical speed the ball leaves a paddle with
    pub paddle_bounce_speed: i32,

    // === Shapes ===
    pub paddle_half_size: [i32; 2],
    pub ball_radius: i32,
    pub arrow_span: i32,

    // === Audio ===
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            advance_every: 1,

            ball_velocity: [2, 1],
            arrow_velocity: [1, 0],
            ai_paddle_speed: 1,
            player_paddle_speed: 2,
            paddle_bounce_speed: 2,

            paddle_half_size: [20, 3],
            ball_radius: 8,
            arrow_span: 30,

            mute: false,
        }
    }
}

impl Settings {
    /// Environment variable naming a JSON settings file
    pub const CONFIG_ENV: &'static str = "LAYER_PONG_CONFIG";

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {e}", path.display()),
            },
            Err(e) => log::warn!("Cannot read {}: {e}", path.display()),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load from the file named by [`Self::CONFIG_ENV`], if set
    pub fn load() -> Self {
        match std::env::var_os(Self::CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Milliseconds between timer interrupts
    pub fn tick_period_ms(&self) -> u64 {
        1000 / u64::from(self.tick_hz.max(1))
    }
}
