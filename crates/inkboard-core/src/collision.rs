//! Convex collision tests based on the separating axis theorem.
//!
//! Two convex shapes intersect iff their projections overlap on every
//! candidate axis. Touching projections count as overlapping, so shapes
//! that share an edge are reported as colliding.

use kurbo::{Point, Rect, Vec2};

/// Degenerate axes shorter than this are ignored.
const AXIS_EPSILON: f64 = 1e-12;

/// A 1-D interval produced by projecting a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    /// The projection of an empty shape; it overlaps nothing.
    pub const EMPTY: Projection = Projection {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Inclusive interval overlap.
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// A shape that can be projected onto an axis.
pub trait Collidable {
    /// Project onto a unit-length axis.
    fn project_on_axis(&self, axis: Vec2) -> Projection;
}

/// A convex polygon, vertices in winding order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle as a 4-vertex polygon.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(vec![
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ])
    }

    /// Rectangle rotated by `angle` radians around its own center.
    pub fn rotated_rect(rect: Rect, angle: f64) -> Self {
        if angle == 0.0 {
            return Self::from_rect(rect);
        }
        let rotation = kurbo::Affine::rotate_about(angle, rect.center());
        let mut polygon = Self::from_rect(rect);
        for vertex in &mut polygon.vertices {
            *vertex = rotation * *vertex;
        }
        polygon
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unit normals of every non-degenerate edge.
    pub fn axes(&self) -> Vec<Vec2> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .filter_map(|i| {
                let edge = self.vertices[(i + 1) % n] - self.vertices[i];
                unit(Vec2::new(-edge.y, edge.x))
            })
            .collect()
    }

    /// Axis-aligned bounding box of the vertices.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.vertices.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(*first, *first), |acc, p| {
            acc.union_pt(*p)
        })
    }

    fn nearest_vertex(&self, point: Point) -> Option<Point> {
        self.vertices.iter().copied().min_by(|a, b| {
            a.distance_squared(point)
                .total_cmp(&b.distance_squared(point))
        })
    }
}

impl Collidable for Polygon {
    fn project_on_axis(&self, axis: Vec2) -> Projection {
        self.vertices
            .iter()
            .map(|v| v.to_vec2().dot(axis))
            .fold(Projection::EMPTY, |acc, d| Projection {
                min: acc.min.min(d),
                max: acc.max.max(d),
            })
    }
}

/// A circle collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }
}

impl Collidable for Circle {
    fn project_on_axis(&self, axis: Vec2) -> Projection {
        let c = self.center.to_vec2().dot(axis);
        Projection {
            min: c - self.radius,
            max: c + self.radius,
        }
    }
}

/// Any supported collider.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Polygon(Polygon),
    Circle(Circle),
}

impl Collider {
    pub fn rect(rect: Rect) -> Self {
        Collider::Polygon(Polygon::from_rect(rect))
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Collider::Circle(Circle::new(center, radius))
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Collider::Polygon(p) => p.bounds(),
            Collider::Circle(c) => c.bounds(),
        }
    }
}

impl Collidable for Collider {
    fn project_on_axis(&self, axis: Vec2) -> Projection {
        match self {
            Collider::Polygon(p) => p.project_on_axis(axis),
            Collider::Circle(c) => c.project_on_axis(axis),
        }
    }
}

/// Test whether two colliders intersect (touching counts).
pub fn intersects(a: &Collider, b: &Collider) -> bool {
    match (a, b) {
        (Collider::Polygon(p), Collider::Polygon(q)) => {
            if p.is_empty() || q.is_empty() {
                return false;
            }
            let mut axes = p.axes();
            axes.extend(q.axes());
            overlap_on_all(&axes, p, q)
        }
        (Collider::Circle(c), Collider::Polygon(p))
        | (Collider::Polygon(p), Collider::Circle(c)) => {
            if p.is_empty() {
                return false;
            }
            let mut axes = p.axes();
            if let Some(axis) = p.nearest_vertex(c.center).and_then(|v| unit(v - c.center)) {
                axes.push(axis);
            }
            overlap_on_all(&axes, c, p)
        }
        (Collider::Circle(c1), Collider::Circle(c2)) => {
            c1.center.distance(c2.center) <= c1.radius + c2.radius
        }
    }
}

/// Every candidate intersecting `target`, in candidate order.
///
/// Candidates are usually supplied bottom-to-top, so the last element is
/// the topmost hit.
pub fn all_intersecting<T, I>(target: &Collider, candidates: I) -> Vec<T>
where
    I: IntoIterator<Item = (T, Collider)>,
{
    candidates
        .into_iter()
        .filter(|(_, collider)| intersects(target, collider))
        .map(|(item, _)| item)
        .collect()
}

fn overlap_on_all(axes: &[Vec2], a: &dyn Collidable, b: &dyn Collidable) -> bool {
    // Point-like shapes have no edges; fall back to the coordinate axes.
    const FALLBACK: [Vec2; 2] = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    let axes = if axes.is_empty() { &FALLBACK[..] } else { axes };
    axes.iter()
        .all(|axis| a.project_on_axis(*axis).overlaps(&b.project_on_axis(*axis)))
}

fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    (len > AXIS_EPSILON).then(|| v / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Collider {
        Collider::rect(Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn test_shared_edge_intersects() {
        assert!(intersects(&rect(0.0, 0.0, 10.0, 10.0), &rect(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_gap_does_not_intersect() {
        assert!(!intersects(&rect(0.0, 0.0, 9.0, 10.0), &rect(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_overlapping_rects() {
        assert!(intersects(&rect(0.0, 0.0, 10.0, 10.0), &rect(5.0, 5.0, 15.0, 15.0)));
    }

    #[test]
    fn test_rotated_rect_separated_by_diagonal() {
        // A diamond centred at (0,0) with half-diagonal ~7.07 does not reach (6,6).
        let diamond = Collider::Polygon(Polygon::rotated_rect(
            Rect::new(-5.0, -5.0, 5.0, 5.0),
            std::f64::consts::FRAC_PI_4,
        ));
        assert!(!intersects(&diamond, &rect(4.0, 4.0, 8.0, 8.0)));
        assert!(intersects(&diamond, &rect(3.0, -1.0, 8.0, 1.0)));
    }

    #[test]
    fn test_circle_against_polygon_corner() {
        let square = rect(0.0, 0.0, 10.0, 10.0);
        // Near the corner the vertex axis separates what edge normals cannot.
        assert!(!intersects(&Collider::circle(Point::new(13.0, 13.0), 4.0), &square));
        assert!(intersects(&Collider::circle(Point::new(12.0, 12.0), 3.0), &square));
    }

    #[test]
    fn test_circle_circle_touching() {
        let a = Collider::circle(Point::new(0.0, 0.0), 5.0);
        let b = Collider::circle(Point::new(10.0, 0.0), 5.0);
        assert!(intersects(&a, &b));
        let c = Collider::circle(Point::new(10.1, 0.0), 5.0);
        assert!(!intersects(&a, &c));
    }

    #[test]
    fn test_zero_size_marquee_far_away() {
        let point = Collider::rect(Rect::new(50.0, 50.0, 50.0, 50.0));
        assert!(!intersects(&point, &rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_zero_radius_circle() {
        let dot = Collider::circle(Point::new(20.0, 5.0), 0.0);
        assert!(!intersects(&dot, &rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_empty_polygon_never_intersects() {
        let empty = Collider::Polygon(Polygon::new(Vec::new()));
        assert!(!intersects(&empty, &rect(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_all_intersecting_preserves_order() {
        let marquee = rect(0.0, 0.0, 15.0, 15.0);
        let hits = all_intersecting(
            &marquee,
            vec![
                ("a", rect(1.0, 1.0, 2.0, 2.0)),
                ("b", rect(100.0, 100.0, 120.0, 120.0)),
                ("c", rect(14.0, 14.0, 30.0, 30.0)),
            ],
        );
        assert_eq!(hits, vec!["a", "c"]);
    }
}
