//! Score text overlay
//!
//! Text is drawn without a background. The box under each score is repainted
//! from the scene first, so layers passing beneath the text stay visible.

use embedded_graphics::Drawable;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Point};
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Baseline, Text};

use super::compositor;
use crate::consts::{SCREEN_HEIGHT, TEXT_COLOR};
use crate::sim::{Region, Scene, ScoreDigits, Side};

/// Top-left corner of each side's score text
pub fn score_origin(side: Side) -> Point {
    match side {
        Side::Top => Point::new(3, 3),
        Side::Bottom => Point::new(3, SCREEN_HEIGHT - 10),
    }
}

/// Draw both score buffers over the scene, top score first
pub fn draw_scores<D>(
    scene: &Scene,
    scores: &[ScoreDigits; 2],
    background: Rgb565,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_5X7)
        .text_color(TEXT_COLOR)
        .build();

    for side in [Side::Top, Side::Bottom] {
        let digits = scores[side.index()];
        let text = Text::with_baseline(digits.as_str(), score_origin(side), style, Baseline::Top);
        if let Some(under) = Region::from_rectangle(&text.bounding_box()) {
            compositor::paint_region(scene, &under, background, target)?;
        }
        text.draw(target)?;
    }
    Ok(())
}
