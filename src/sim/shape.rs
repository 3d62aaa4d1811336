//! Primitive shapes with axis-aligned bounding-box probing
//!
//! A shape carries only its size parameters. The layer drawing it supplies
//! the position, so one shape value can be reused by any number of layers.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::region::Region;

/// Primitive shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle, `half` pixels from center to each edge
    Rect { half: IVec2 },
    /// One-pixel border of a rectangle; decoration only, never collided as a solid
    RectOutline { half: IVec2 },
    /// Filled circle
    Circle { radius: i32 },
    /// Triangular wedge pointing right, `span` pixels wide and tall
    Arrow { span: i32 },
}

impl Shape {
    /// Bounding box of the shape centered at `center`
    pub fn bounds(&self, center: IVec2) -> Region {
        match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => Region::around(center, half),
            Shape::Circle { radius } => Region::around(center, IVec2::splat(radius)),
            Shape::Arrow { span } => Region::around(center, IVec2::splat(span / 2)),
        }
    }

    /// Whether `pixel` is drawn by the shape centered at `center`
    pub fn contains(&self, center: IVec2, pixel: IVec2) -> bool {
        let bounds = self.bounds(center);
        if !bounds.contains(pixel) {
            return false;
        }

        match *self {
            Shape::Rect { .. } => true,
            Shape::RectOutline { .. } => {
                pixel.x == bounds.top_left.x
                    || pixel.x == bounds.bot_right.x
                    || pixel.y == bounds.top_left.y
                    || pixel.y == bounds.bot_right.y
            }
            Shape::Circle { radius } => {
                let d = pixel - center;
                d.length_squared() <= radius * radius
            }
            Shape::Arrow { span } => {
                // Base on the left edge, apex at the right edge on the center row
                let half = span / 2;
                let d = pixel - center;
                2 * d.y.abs() <= half - d.x
            }
        }
    }
}
