//! Resize control points around the selection bounds.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest width or height a resize can shrink the selection to.
const MIN_RESIZE_EXTENT: f64 = 1.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPoint {
    Corner(Corner),
    Edge(Edge),
}

impl ControlPoint {
    /// Corners first, so they win over edges on tiny boxes.
    pub const ALL: [ControlPoint; 8] = [
        ControlPoint::Corner(Corner::TopLeft),
        ControlPoint::Corner(Corner::TopRight),
        ControlPoint::Corner(Corner::BottomLeft),
        ControlPoint::Corner(Corner::BottomRight),
        ControlPoint::Edge(Edge::Top),
        ControlPoint::Edge(Edge::Right),
        ControlPoint::Edge(Edge::Bottom),
        ControlPoint::Edge(Edge::Left),
    ];

    /// Position of the handle on `bounds`.
    pub fn position(self, bounds: Rect) -> Point {
        let c = bounds.center();
        match self {
            ControlPoint::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
            ControlPoint::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
            ControlPoint::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
            ControlPoint::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
            ControlPoint::Edge(Edge::Top) => Point::new(c.x, bounds.y0),
            ControlPoint::Edge(Edge::Right) => Point::new(bounds.x1, c.y),
            ControlPoint::Edge(Edge::Bottom) => Point::new(c.x, bounds.y1),
            ControlPoint::Edge(Edge::Left) => Point::new(bounds.x0, c.y),
        }
    }

    /// Bounds after dragging this handle by `delta`.
    ///
    /// The opposite side stays fixed. Dragging past it flips the box, and
    /// the result never collapses below a minimal extent.
    pub fn resize(self, bounds: Rect, delta: Vec2) -> Rect {
        let Rect { mut x0, mut y0, mut x1, mut y1 } = bounds;
        match self {
            ControlPoint::Corner(Corner::TopLeft) => {
                x0 += delta.x;
                y0 += delta.y;
            }
            ControlPoint::Corner(Corner::TopRight) => {
                x1 += delta.x;
                y0 += delta.y;
            }
            ControlPoint::Corner(Corner::BottomLeft) => {
                x0 += delta.x;
                y1 += delta.y;
            }
            ControlPoint::Corner(Corner::BottomRight) => {
                x1 += delta.x;
                y1 += delta.y;
            }
            ControlPoint::Edge(Edge::Top) => y0 += delta.y,
            ControlPoint::Edge(Edge::Right) => x1 += delta.x,
            ControlPoint::Edge(Edge::Bottom) => y1 += delta.y,
            ControlPoint::Edge(Edge::Left) => x0 += delta.x,
        }
        let mut rect = Rect::new(x0, y0, x1, y1).abs();
        if rect.width() < MIN_RESIZE_EXTENT {
            rect.x1 = rect.x0 + MIN_RESIZE_EXTENT;
        }
        if rect.height() < MIN_RESIZE_EXTENT {
            rect.y1 = rect.y0 + MIN_RESIZE_EXTENT;
        }
        rect
    }

    /// Handle of `bounds` within `radius` of `point`, if any.
    pub fn hit_test(bounds: Rect, point: Point, radius: f64) -> Option<ControlPoint> {
        Self::ALL
            .into_iter()
            .find(|cp| cp.position(bounds).distance(point) <= radius)
    }
}

/// Affine map taking `from` onto `to`.
///
/// Degenerate source extents keep a scale of 1 on that axis.
pub fn resize_transform(from: Rect, to: Rect) -> Affine {
    let sx = if from.width() > f64::EPSILON {
        to.width() / from.width()
    } else {
        1.0
    };
    let sy = if from.height() > f64::EPSILON {
        to.height() / from.height()
    } else {
        1.0
    };
    Affine::translate(to.origin().to_vec2())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-from.origin().to_vec2())
}
