//! Deterministic engine module
//!
//! Shapes, layers and the motion/collision step. This module must stay pure:
//! - Integer arithmetic only
//! - Fixed step per tick
//! - Stable iteration order (draw order)
//! - No display or platform dependencies

pub mod collision;
pub mod layer;
pub mod region;
pub mod score;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{Edge, FenceBounce, fence_bounce, paddle_contact};
pub use layer::{Layer, LayerId, Scene};
pub use region::Region;
pub use score::ScoreDigits;
pub use shape::Shape;
pub use state::{GameState, Handles, Side, TickSignals};
pub use tick::{TickInput, advance, tick};
