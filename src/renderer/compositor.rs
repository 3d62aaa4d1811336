//! Painter's-algorithm compositor
//!
//! Every painted pixel is resolved by probing the scene front to back: the
//! first layer whose shape contains the pixel gives its color, otherwise the
//! background shows. Pixels are streamed to the target one region at a time,
//! row-major, through `DrawTarget::fill_contiguous`.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;
use glam::IVec2;

use crate::sim::{LayerId, Region, Scene};

/// Color shown at `pixel`
pub fn probe(scene: &Scene, pixel: IVec2, background: Rgb565) -> Rgb565 {
    scene.probe(pixel).map_or(background, |layer| layer.color)
}

/// Repaint one region by probing every pixel in it
pub fn paint_region<D>(
    scene: &Scene,
    region: &Region,
    background: Rgb565,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(screen) = Region::from_rectangle(&target.bounding_box()) else {
        return Ok(());
    };
    let Some(region) = region.intersection(&screen) else {
        return Ok(());
    };

    let colors = region.pixels().map(|pixel| probe(scene, pixel, background));
    target.fill_contiguous(&region.to_rectangle(), colors)
}

/// Full draw of one layer: its whole current bounding box
pub fn draw_layer<D>(
    scene: &Scene,
    id: LayerId,
    background: Rgb565,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    debug_assert!(scene.is_initialized(), "scene drawn before init pass");
    paint_region(scene, &scene[id].bounds(), background, target)
}

/// Clear the target and draw every layer; used once for the first frame
pub fn draw_scene<D>(scene: &Scene, background: Rgb565, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(background)?;
    for index in 0..scene.len() {
        draw_layer(scene, LayerId(index), background, target)?;
    }
    Ok(())
}

/// Regions a moving layer dirtied between its last and current position.
///
/// Overlapping boxes are merged into their union; disjoint boxes are kept
/// apart so a long jump does not repaint everything in between.
pub fn dirty_regions(scene: &Scene, id: LayerId) -> (Region, Option<Region>) {
    let layer = &scene[id];
    let now = layer.bounds();
    let before = layer.bounds_last();
    if now.intersects(&before) {
        (now.union(&before), None)
    } else {
        (now, Some(before))
    }
}

/// Repaint phase: redraw what each moving layer covered before and after the
/// last commit. Assumes the commit already happened.
pub fn repaint<D>(scene: &Scene, background: Rgb565, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    debug_assert!(scene.is_initialized(), "scene drawn before init pass");
    for id in scene.moving_ids() {
        let (region, extra) = dirty_regions(scene, id);
        paint_region(scene, &region, background, target)?;
        if let Some(extra) = extra {
            paint_region(scene, &extra, background, target)?;
        }
    }
    Ok(())
}
