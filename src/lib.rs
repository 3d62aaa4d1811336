//! Layer Pong - shape compositor and bounce engine for a two-paddle toy
//!
//! Core modules:
//! - `sim`: Deterministic engine (shapes, layers, fence, collisions, scores)
//! - `renderer`: Painter's-algorithm compositor over an `embedded-graphics` target
//! - `platform`: Switch and buzzer interfaces plus host stand-ins
//! - `shared`: State shared between the timer context and the main loop
//! - `settings`: Data-driven tuning

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shared;
pub mod sim;

pub use settings::Settings;
pub use shared::SharedState;

use glam::IVec2;

/// Display and timing constants
pub mod consts {
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};

    /// LCD dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Timer interrupt rate
    pub const TICK_HZ: u32 = 15;

    /// Background shown wherever no layer claims a pixel
    pub const BG_COLOR: Rgb565 = Rgb565::BLACK;

    pub const TOP_PADDLE_COLOR: Rgb565 = Rgb565::CSS_ORANGE;
    pub const BOTTOM_PADDLE_COLOR: Rgb565 = Rgb565::CSS_VIOLET;
    pub const FIELD_COLOR: Rgb565 = Rgb565::GREEN;
    pub const BALL_COLOR: Rgb565 = Rgb565::WHITE;
    pub const ARROW_COLOR: Rgb565 = Rgb565::WHITE;
    pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;
}

/// Center of the screen
#[inline]
pub fn screen_center() -> IVec2 {
    IVec2::new(consts::SCREEN_WIDTH / 2, consts::SCREEN_HEIGHT / 2)
}
