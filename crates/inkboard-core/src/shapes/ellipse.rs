//! Ellipse shape.

use super::{ShapeStyle, ShapeTrait};
use crate::collision::{Collider, Polygon};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Vertex count of the polygon approximating a non-circular ellipse.
const ELLIPSE_SEGMENTS: usize = 24;

/// An ellipse shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Create an ellipse from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    fn is_circle(&self) -> bool {
        (self.radius_x - self.radius_y).abs() < f64::EPSILON
    }
}

impl ShapeTrait for Ellipse {
    fn bounds(&self) -> Rect {
        if self.is_circle() || self.rotation == 0.0 {
            Rect::new(
                self.center.x - self.radius_x,
                self.center.y - self.radius_y,
                self.center.x + self.radius_x,
                self.center.y + self.radius_y,
            )
        } else {
            self.collider().bounds()
        }
    }

    fn collider(&self) -> Collider {
        if self.is_circle() {
            return Collider::circle(self.center, self.radius_x);
        }
        let rotation = Affine::rotate_about(self.rotation, self.center);
        let vertices = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / ELLIPSE_SEGMENTS as f64 * std::f64::consts::TAU;
                rotation
                    * Point::new(
                        self.center.x + self.radius_x * t.cos(),
                        self.center.y + self.radius_y * t.sin(),
                    )
            })
            .collect();
        Collider::Polygon(Polygon::new(vertices))
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
        let scale = affine.as_coeffs();
        self.radius_x *= scale[0].abs();
        self.radius_y *= scale[3].abs();
    }

    fn rotate_about(&mut self, pivot: Point, angle: f64) {
        self.center = Affine::rotate_about(angle, pivot) * self.center;
        self.rotation += angle;
    }
}
