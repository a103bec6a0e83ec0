//! Shape definitions for the drawing surface.
//!
//! Each kind is a plain attribute struct. [`Shape`] is the tagged union the
//! scene graph stores, and [`SvgJson`] is its serialized form (clipboard,
//! undo/redo snapshots and saved boards all use it).

mod ellipse;
mod freehand;
mod rectangle;
mod stamp;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use rectangle::Rectangle;
pub use stamp::Stamp;

use crate::collision::Collider;
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            opacity: 1.0,
        }
    }
}

/// Common trait for all shape kinds.
pub trait ShapeTrait {
    /// Axis-aligned bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Convex collider used for hit-testing and marquee selection.
    fn collider(&self) -> Collider;

    /// Rotation pivot of the shape.
    fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply a translate/scale transform to this shape.
    fn transform(&mut self, affine: Affine);

    /// Rotate the shape by `angle` radians around `pivot`.
    fn rotate_about(&mut self, pivot: Point, angle: f64);
}

/// Discriminant of [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Freehand,
    Stamp,
}

/// Serialized form of one shape: a kind tag plus an opaque attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgJson {
    pub kind: ShapeKind,
    pub content: String,
}

/// Errors reading a shape back from its serialized form.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Kind mismatch: expected {expected:?}, found {found:?}")]
    KindMismatch { expected: ShapeKind, found: ShapeKind },
    #[error("Malformed content: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Enum wrapper for all shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Freehand(Freehand),
    Stamp(Stamp),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::Stamp(_) => ShapeKind::Stamp,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn collider(&self) -> Collider {
        self.as_trait().collider()
    }

    pub fn center(&self) -> Point {
        self.as_trait().center()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn transform(&mut self, affine: Affine) {
        self.as_trait_mut().transform(affine);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    pub fn rotate_about(&mut self, pivot: Point, angle: f64) {
        self.as_trait_mut().rotate_about(pivot, angle);
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) => s,
            Shape::Stamp(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Freehand(s) => s,
            Shape::Stamp(s) => s,
        }
    }

    /// Serialize to the `{ kind, content }` form.
    pub fn to_svg_json(&self) -> SvgJson {
        let content = match self {
            Shape::Rectangle(s) => serde_json::to_string(s),
            Shape::Ellipse(s) => serde_json::to_string(s),
            Shape::Freehand(s) => serde_json::to_string(s),
            Shape::Stamp(s) => serde_json::to_string(s),
        };
        let content = content.unwrap_or_else(|e| {
            log::warn!("Failed to serialize {:?} shape: {}", self.kind(), e);
            String::new()
        });
        SvgJson {
            kind: self.kind(),
            content,
        }
    }

    /// Build a new shape from its serialized form.
    pub fn from_svg_json(json: &SvgJson) -> Result<Shape, ContentError> {
        let shape = match json.kind {
            ShapeKind::Rectangle => Shape::Rectangle(serde_json::from_str(&json.content)?),
            ShapeKind::Ellipse => Shape::Ellipse(serde_json::from_str(&json.content)?),
            ShapeKind::Freehand => Shape::Freehand(serde_json::from_str(&json.content)?),
            ShapeKind::Stamp => Shape::Stamp(serde_json::from_str(&json.content)?),
        };
        Ok(shape)
    }

    /// Overwrite this shape's attributes from serialized content.
    ///
    /// On kind mismatch or malformed content the shape keeps its previous
    /// attributes and `false` is returned.
    pub fn read_content(&mut self, json: &SvgJson) -> bool {
        match self.try_read_content(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Ignoring shape content: {}", e);
                false
            }
        }
    }

    fn try_read_content(&mut self, json: &SvgJson) -> Result<(), ContentError> {
        if json.kind != self.kind() {
            return Err(ContentError::KindMismatch {
                expected: self.kind(),
                found: json.kind,
            });
        }
        *self = Shape::from_svg_json(json)?;
        Ok(())
    }

    /// Get the rotation angle in radians (0 for shapes without one).
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.rotation,
            Shape::Ellipse(e) => e.rotation,
            Shape::Stamp(s) => s.rotation,
            Shape::Freehand(_) => 0.0,
        }
    }
}
