//! Stamp shape: a named glyph placed at a point.

use super::{ShapeStyle, ShapeTrait};
use crate::collision::{Collider, Polygon};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// A square stamp rendered from a named glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    /// Center of the stamp.
    pub center: Point,
    /// Side length of the stamp's square.
    pub size: f64,
    /// Glyph or asset name the renderer resolves.
    pub glyph: String,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Stamp {
    pub fn new(center: Point, size: f64, glyph: String) -> Self {
        Self {
            center,
            size,
            glyph,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    fn square(&self) -> Rect {
        Rect::from_center_size(self.center, (self.size, self.size))
    }
}

impl ShapeTrait for Stamp {
    fn bounds(&self) -> Rect {
        self.collider().bounds()
    }

    fn collider(&self) -> Collider {
        Collider::Polygon(Polygon::rotated_rect(self.square(), self.rotation))
    }

    fn center(&self) -> Point {
        self.center
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.center = affine * self.center;
        // Stamps stay square: scale by the larger factor.
        let scale = affine.as_coeffs();
        self.size *= scale[0].abs().max(scale[3].abs());
    }

    fn rotate_about(&mut self, pivot: Point, angle: f64) {
        self.center = Affine::rotate_about(angle, pivot) * self.center;
        self.rotation += angle;
    }
}
