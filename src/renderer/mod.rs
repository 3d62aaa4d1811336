//! Rendering module
//!
//! Software compositing onto any `embedded-graphics` RGB565 target.

pub mod compositor;
pub mod framebuffer;
pub mod hud;

pub use compositor::{draw_layer, draw_scene, paint_region, probe, repaint};
pub use framebuffer::Framebuffer;
pub use hud::draw_scores;
