//! Polygon smoothing and expansion.
//!
//! Shapes are expanded about their centroid before smoothing, because
//! corner-cutting shrinks the enclosed area; without the expansion,
//! adjacent smoothed shapes leave gap seams.

use crate::point::Point;
use crate::scene::PathCommand;

/// Scale every vertex away from `centroid` by `factor` (>1 grows).
pub fn expand(points: &[Point], centroid: Point, factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            Point::new(
                centroid.x + (p.x - centroid.x) * factor,
                centroid.y + (p.y - centroid.y) * factor,
            )
        })
        .collect()
}

/// Chaikin corner-cutting on a closed polygon.
///
/// Each round replaces every cyclic edge (a, b) with the two points
/// at 1/4 and 3/4 along it, doubling the point count. Zero iterations
/// returns the input unchanged.
pub fn chaikin(points: &[Point], iterations: u32) -> Vec<Point> {
    let mut current = points.to_vec();
    for _ in 0..iterations {
        if current.len() < 3 {
            break;
        }
        let mut next = Vec::with_capacity(current.len() * 2);
        for i in 0..current.len() {
            let a = current[i];
            let b = current[(i + 1) % current.len()];
            next.push(a.lerp(&b, 0.25));
            next.push(a.lerp(&b, 0.75));
        }
        current = next;
    }
    current
}

/// Fit a closed cubic-bezier path through a cyclic point list using
/// Catmull-Rom-derived tangents: for vertex p1 with cyclic neighbors
/// p0, p2, p3, the control points are p1 + (p2-p0)/6 and p2 - (p3-p1)/6.
///
/// Fewer than 3 points falls back to straight line segments.
pub fn bezier_path(points: &[Point]) -> Vec<PathCommand> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut path = Vec::with_capacity(points.len() + 2);
    path.push(PathCommand::MoveTo(points[0]));

    if points.len() < 3 {
        for p in &points[1..] {
            path.push(PathCommand::LineTo(*p));
        }
        path.push(PathCommand::Close);
        return path;
    }

    let n = points.len();
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];

        let ctrl1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let ctrl2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
        path.push(PathCommand::CurveTo {
            ctrl1,
            ctrl2,
            to: p2,
        });
    }
    path.push(PathCommand::Close);
    path
}
