//! Axis-aligned pixel regions
//!
//! Both corners are inclusive: a region from (1,1) to (3,3) covers nine pixels.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box between two inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: IVec2,
    pub bot_right: IVec2,
}

impl Region {
    pub fn new(top_left: IVec2, bot_right: IVec2) -> Self {
        debug_assert!(
            top_left.cmple(bot_right).all(),
            "inverted region {top_left} .. {bot_right}"
        );
        Self {
            top_left,
            bot_right,
        }
    }

    /// Region centered on `center` extending `half` pixels each way
    pub fn around(center: IVec2, half: IVec2) -> Self {
        Self::new(center - half, center + half)
    }

    /// Width and height in pixels
    pub fn size(&self) -> IVec2 {
        self.bot_right - self.top_left + IVec2::ONE
    }

    pub fn area(&self) -> i64 {
        let size = self.size();
        i64::from(size.x) * i64::from(size.y)
    }

    pub fn contains(&self, pixel: IVec2) -> bool {
        pixel.cmpge(self.top_left).all() && pixel.cmple(self.bot_right).all()
    }

    /// True if the two regions share at least one pixel
    pub fn intersects(&self, other: &Region) -> bool {
        self.top_left.cmple(other.bot_right).all() && other.top_left.cmple(self.bot_right).all()
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region::new(
            self.top_left.min(other.top_left),
            self.bot_right.max(other.bot_right),
        )
    }

    /// Overlap of the two regions, if any
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        if !self.intersects(other) {
            return None;
        }
        Some(Region::new(
            self.top_left.max(other.top_left),
            self.bot_right.min(other.bot_right),
        ))
    }

    /// Iterate pixels row-major (all columns of a row before the next row)
    pub fn pixels(&self) -> impl Iterator<Item = IVec2> + use<> {
        let Region {
            top_left,
            bot_right,
        } = *self;
        (top_left.y..=bot_right.y)
            .flat_map(move |row| (top_left.x..=bot_right.x).map(move |col| IVec2::new(col, row)))
    }

    pub fn from_rectangle(rect: &Rectangle) -> Option<Region> {
        let bot_right = rect.bottom_right()?;
        Some(Region::new(
            IVec2::new(rect.top_left.x, rect.top_left.y),
            IVec2::new(bot_right.x, bot_right.y),
        ))
    }

    pub fn to_rectangle(&self) -> Rectangle {
        let size = self.size();
        Rectangle::new(
            Point::new(self.top_left.x, self.top_left.y),
            Size::new(size.x as u32, size.y as u32),
        )
    }
}
