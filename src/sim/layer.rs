//! Layers and the ordered scene
//!
//! Draw order is index order: when two layers claim the same pixel the one
//! with the lower index wins. A layer takes part in motion exactly when it
//! carries a velocity, so the moving set is a view over the same list.

use std::ops::{Index, IndexMut};

use embedded_graphics::pixelcolor::Rgb565;
use glam::IVec2;

use super::region::Region;
use super::shape::Shape;

/// Stable handle to a layer in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub usize);

/// A positioned, colored shape instance with double-buffered position
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub shape: Shape,
    pub color: Rgb565,
    /// Position restored by every initialization pass
    pub home: IVec2,
    /// Position shown in the current frame
    pub pos: IVec2,
    /// Position shown in the previous frame
    pub pos_last: IVec2,
    /// Position staged by the engine for the next frame
    pub pos_next: IVec2,
    /// Velocity per engine step; `None` for layers that never move
    pub velocity: Option<IVec2>,
    /// Velocity restored by every initialization pass
    home_velocity: Option<IVec2>,
}

impl Layer {
    /// A layer that is drawn but never moves
    pub fn fixed(shape: Shape, color: Rgb565, home: IVec2) -> Self {
        Self {
            shape,
            color,
            home,
            pos: IVec2::ZERO,
            pos_last: IVec2::ZERO,
            pos_next: IVec2::ZERO,
            velocity: None,
            home_velocity: None,
        }
    }

    /// A layer tracked by the motion engine
    pub fn moving(shape: Shape, color: Rgb565, home: IVec2, velocity: IVec2) -> Self {
        Self {
            velocity: Some(velocity),
            home_velocity: Some(velocity),
            ..Self::fixed(shape, color, home)
        }
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.is_some()
    }

    /// Bounds at the displayed position
    pub fn bounds(&self) -> Region {
        self.shape.bounds(self.pos)
    }

    /// Bounds at the previously displayed position
    pub fn bounds_last(&self) -> Region {
        self.shape.bounds(self.pos_last)
    }

    /// Bounds at the staged position
    pub fn bounds_next(&self) -> Region {
        self.shape.bounds(self.pos_next)
    }

    /// Whether the layer paints `pixel` at its displayed position
    pub fn contains(&self, pixel: IVec2) -> bool {
        self.shape.contains(self.pos, pixel)
    }
}

/// Fixed, ordered list of every layer in the scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    layers: Vec<Layer>,
    initialized: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer behind every layer already in the scene
    pub fn push(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    /// Initialization pass: every position field takes the home position
    /// and velocities return to their starting values.
    pub fn init(&mut self) {
        for layer in &mut self.layers {
            layer.pos = layer.home;
            layer.pos_last = layer.home;
            layer.pos_next = layer.home;
            layer.velocity = layer.home_velocity;
        }
        self.initialized = true;
    }

    /// Stage every layer back at its home position with its starting
    /// velocity. Displayed positions are left alone, so the next commit
    /// records where each layer was last drawn.
    pub fn restage(&mut self) {
        for layer in &mut self.layers {
            layer.pos_next = layer.home;
            layer.velocity = layer.home_velocity;
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Commit phase: moving layers advance to their staged position
    pub fn commit(&mut self) {
        for layer in self.layers.iter_mut().filter(|l| l.is_moving()) {
            layer.pos_last = layer.pos;
            layer.pos = layer.pos_next;
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Ids of moving layers, in draw order
    pub fn moving_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_moving())
            .map(|(i, _)| LayerId(i))
    }

    /// First layer in draw order that paints `pixel`
    pub fn probe(&self, pixel: IVec2) -> Option<&Layer> {
        self.layers.iter().find(|l| l.contains(pixel))
    }
}

impl Index<LayerId> for Scene {
    type Output = Layer;

    fn index(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }
}

impl IndexMut<LayerId> for Scene {
    fn index_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }
}
