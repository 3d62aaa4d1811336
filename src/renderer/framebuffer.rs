//! In-memory RGB565 display
//!
//! Stands in for the LCD on the host. Counts pixel writes so redraw cost can
//! be observed.

use std::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::{PointsIter, Rectangle};

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
    written: usize,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            written: 0,
        }
    }

    fn offset(&self, point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.offset(Point::new(x, y)).map(|i| self.pixels[i])
    }

    /// Pixels written since creation or the last `reset_counter`
    pub fn pixels_written(&self) -> usize {
        self.written
    }

    pub fn reset_counter(&mut self) {
        self.written = 0;
    }

    /// Number of pixels showing `color`
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    fn put(&mut self, point: Point, color: Rgb565) {
        if let Some(i) = self.offset(point) {
            self.pixels[i] = color;
            self.written += 1;
        }
    }
}

/// Two framebuffers are equal when they show the same pixels
impl PartialEq for Framebuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.put(point, color);
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Rectangle::points is row-major, matching the color stream
        for (point, color) in area.points().zip(colors) {
            self.put(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        self.written += self.pixels.len();
        Ok(())
    }
}
