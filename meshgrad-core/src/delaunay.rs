//! Incremental Bowyer-Watson Delaunay triangulation.
//!
//! Triangles live in an index arena; cavity edges are found by keying
//! on sorted vertex-index pairs, so no pointer identity is involved.
//! Insertion order follows the input point order — co-circular
//! degeneracies may therefore resolve differently across runs with
//! different point orders, which is acceptable.

use std::collections::BTreeMap;

use crate::point::Point;

/// Triangles whose area falls below this fraction of the median area
/// are culled as slivers.
pub const MICRO_AREA_FACTOR: f64 = 0.28;

/// Unsigned area of the triangle (a, b, c) via the cross product.
fn triangle_area(a: &Point, b: &Point, c: &Point) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// Strict in-circumcircle test, orientation-aware.
///
/// The incircle determinant's sign depends on the winding of (a, b, c);
/// checking the orientation keeps the test consistent for both
/// windings. A degenerate (collinear) triangle contains nothing.
fn in_circumcircle(a: &Point, b: &Point, c: &Point, p: &Point) -> bool {
    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    let orient = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
    if orient > 0.0 {
        det > 0.0
    } else if orient < 0.0 {
        det < 0.0
    } else {
        false
    }
}

fn sorted_edge(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Delaunay-triangulate `points`, returning index triples into the
/// input slice (vertex order as constructed, not guaranteed CCW).
///
/// Fewer than 3 points yields an empty list. Triangles touching the
/// enclosing super-triangle are discarded at the end.
pub fn triangulate(points: &[Point]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Super-triangle sized at 20x the bounding-box diagonal around its
    // center, big enough that no insertion escapes it.
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let d = (dx * dx + dy * dy).sqrt().max(1.0) * 20.0;

    let mut verts: Vec<Point> = points.to_vec();
    verts.push(Point::new(cx - 2.0 * d, cy - d));
    verts.push(Point::new(cx + 2.0 * d, cy - d));
    verts.push(Point::new(cx, cy + 2.0 * d));

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for i in 0..n {
        let p = verts[i];

        // Find all triangles whose circumcircle contains the point
        let mut bad: Vec<usize> = Vec::new();
        for (t, tri) in triangles.iter().enumerate() {
            if in_circumcircle(&verts[tri[0]], &verts[tri[1]], &verts[tri[2]], &p) {
                bad.push(t);
            }
        }

        // Cavity boundary: edges belonging to exactly one bad triangle.
        // BTreeMap keeps the fan order deterministic for a given input.
        let mut edge_count: BTreeMap<(usize, usize), u32> = BTreeMap::new();
        for &t in &bad {
            let tri = triangles[t];
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *edge_count.entry(sorted_edge(a, b)).or_insert(0) += 1;
            }
        }

        // Remove bad triangles (descending index so swaps stay valid)
        for &t in bad.iter().rev() {
            triangles.swap_remove(t);
        }

        // Re-triangulate the cavity by fanning from the new point
        for (&(a, b), &count) in &edge_count {
            if count == 1 {
                triangles.push([i, a, b]);
            }
        }
    }

    // Drop everything still attached to the super-triangle
    triangles.retain(|tri| tri.iter().all(|&v| v < n));
    triangles
}

/// Cull sliver/noise triangles: drop any triangle whose area is below
/// `MICRO_AREA_FACTOR` times the median area of the input set.
pub fn cull_micro_triangles(points: &[Point], triangles: Vec<[usize; 3]>) -> Vec<[usize; 3]> {
    if triangles.is_empty() {
        return triangles;
    }
    let mut areas: Vec<f64> = triangles
        .iter()
        .map(|t| triangle_area(&points[t[0]], &points[t[1]], &points[t[2]]))
        .collect();
    let mut sorted = areas.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[sorted.len() / 2];
    let cutoff = MICRO_AREA_FACTOR * median;

    let mut kept = Vec::with_capacity(triangles.len());
    for (tri, area) in triangles.into_iter().zip(areas.drain(..)) {
        if area >= cutoff {
            kept.push(tri);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Circumcenter and radius of a triangle (test-side helper).
    fn circumcircle(a: &Point, b: &Point, c: &Point) -> (Point, f64) {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let ux = ((a.x * a.x + a.y * a.y) * (b.y - c.y)
            + (b.x * b.x + b.y * b.y) * (c.y - a.y)
            + (c.x * c.x + c.y * c.y) * (a.y - b.y))
            / d;
        let uy = ((a.x * a.x + a.y * a.y) * (c.x - b.x)
            + (b.x * b.x + b.y * b.y) * (a.x - c.x)
            + (c.x * c.x + c.y * c.y) * (b.x - a.x))
            / d;
        let center = Point::new(ux, uy);
        let radius = center.dist(a);
        (center, radius)
    }

    fn irregular_points() -> Vec<Point> {
        vec![
            Point::new(13.0, 7.0),
            Point::new(81.0, 15.0),
            Point::new(45.0, 61.0),
            Point::new(8.0, 90.0),
            Point::new(70.0, 76.0),
            Point::new(31.0, 33.0),
            Point::new(92.0, 44.0),
            Point::new(57.0, 9.0),
        ]
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Point::new(0.0, 0.0)]).is_empty());
        assert!(triangulate(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_single_triangle() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 1);
        let mut v = tris[0].to_vec();
        v.sort_unstable();
        assert_eq!(v, vec![0, 1, 2]);
    }

    #[test]
    fn test_indices_reference_input_only() {
        let pts = irregular_points();
        let tris = triangulate(&pts);
        assert!(!tris.is_empty());
        for tri in &tris {
            for &v in tri {
                assert!(v < pts.len(), "super-triangle vertex leaked: {v}");
            }
        }
    }

    /// Empty-circumcircle property: no input point lies strictly inside
    /// the circumcircle of any output triangle.
    #[test]
    fn test_delaunay_property() {
        let pts = irregular_points();
        let tris = triangulate(&pts);
        assert!(!tris.is_empty());

        for tri in &tris {
            let (center, radius) = circumcircle(&pts[tri[0]], &pts[tri[1]], &pts[tri[2]]);
            for (i, p) in pts.iter().enumerate() {
                if tri.contains(&i) {
                    continue;
                }
                assert!(
                    center.dist(p) >= radius - 1e-7,
                    "point {i} inside circumcircle of {tri:?}"
                );
            }
        }
    }

    #[test]
    fn test_square_covers_area() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 2);
        let total: f64 = tris
            .iter()
            .map(|t| triangle_area(&pts[t[0]], &pts[t[1]], &pts[t[2]]))
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_micro_culling() {
        // A healthy square plus one near-degenerate sliver off to the side
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.01),
            Point::new(25.0, 0.005),
        ];
        let tris = vec![
            [0usize, 1, 2],
            [0, 2, 3],
            [4, 5, 6], // area ~ 0, far below the median
        ];
        let before: Vec<f64> = tris
            .iter()
            .map(|t| triangle_area(&pts[t[0]], &pts[t[1]], &pts[t[2]]))
            .collect();
        let mut sorted = before.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let cutoff = MICRO_AREA_FACTOR * sorted[sorted.len() / 2];

        let kept = cull_micro_triangles(&pts, tris);
        assert_eq!(kept.len(), 2);
        for tri in &kept {
            let area = triangle_area(&pts[tri[0]], &pts[tri[1]], &pts[tri[2]]);
            assert!(area >= cutoff);
        }
    }

    #[test]
    fn test_culling_empty_input() {
        assert!(cull_micro_triangles(&[], Vec::new()).is_empty());
    }
}
