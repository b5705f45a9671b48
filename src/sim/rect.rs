//! Axis-aligned rectangle geometry
//!
//! Bodies, attack areas and world bounds are all axis-aligned rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as min/max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle of the given half-extents centered on `center`
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Square with side `side` centered on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::from_center(center, Vec2::splat(side / 2.0))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test; rectangles sharing an edge count as overlapping
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }

    /// Clamp a point so a body with `half_extents` stays fully inside
    pub fn clamp_center(&self, center: Vec2, half_extents: Vec2) -> Vec2 {
        let lo = self.min + half_extents;
        let hi = (self.max - half_extents).max(lo);
        center.clamp(lo, hi)
    }
}
