//! Two-tier shape classification over the triangle mesh.
//!
//! Adjacency is keyed on endpoint coordinates (rounded to one decimal
//! place) rather than vertex indices, so shared edges between
//! independently ordered triangles are still detected. A triangle is
//! "primary" when it is both large and sitting in a locally
//! color-homogeneous neighborhood; everything else is "detail".

use std::collections::BTreeMap;

use crate::color::MAX_RGB_DISTANCE;
use crate::mesh::Triangle;
use crate::point::Point;

/// Primary triangles must reach this fraction of the mean area.
const AREA_FACTOR: f64 = 0.55;
/// Primary triangles need at least this many similar neighbors.
const MIN_SIMILAR_NEIGHBORS: usize = 2;

fn coord_key(p: &Point) -> (i64, i64) {
    ((p.x * 10.0).round() as i64, (p.y * 10.0).round() as i64)
}

fn edge_key(a: &Point, b: &Point) -> ((i64, i64), (i64, i64)) {
    let ka = coord_key(a);
    let kb = coord_key(b);
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// Split triangles into (primary, detail).
///
/// `merge_threshold` is a normalized color distance in [0,1]; two
/// neighbors whose blended colors differ by less than it count as
/// similar. Every input triangle lands in exactly one output set.
pub fn classify(triangles: &[Triangle], merge_threshold: f64) -> (Vec<Triangle>, Vec<Triangle>) {
    if triangles.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // Edge -> triangle indices; an edge shared by exactly two
    // triangles makes them neighbors.
    let mut edges: BTreeMap<((i64, i64), (i64, i64)), Vec<usize>> = BTreeMap::new();
    for (i, tri) in triangles.iter().enumerate() {
        let [a, b, c] = tri.positions();
        for (p, q) in [(a, b), (b, c), (c, a)] {
            edges.entry(edge_key(&p, &q)).or_default().push(i);
        }
    }

    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); triangles.len()];
    for owners in edges.values() {
        if owners.len() == 2 {
            neighbors[owners[0]].push(owners[1]);
            neighbors[owners[1]].push(owners[0]);
        }
    }

    let blended: Vec<_> = triangles.iter().map(Triangle::blended_color).collect();
    let mean_area =
        triangles.iter().map(Triangle::area).sum::<f64>() / triangles.len() as f64;

    let mut primary = Vec::new();
    let mut detail = Vec::new();
    for (i, tri) in triangles.iter().enumerate() {
        let similar = neighbors[i]
            .iter()
            .filter(|&&n| blended[i].distance(&blended[n]) / MAX_RGB_DISTANCE < merge_threshold)
            .count();

        if tri.area() >= AREA_FACTOR * mean_area && similar >= MIN_SIMILAR_NEIGHBORS {
            primary.push(tri.clone());
        } else {
            detail.push(tri.clone());
        }
    }

    (primary, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::mesh::Vertex;

    fn tri(coords: [(f64, f64); 3], color: Rgb) -> Triangle {
        Triangle::new(coords.map(|(x, y)| Vertex {
            pos: Point::new(x, y),
            color,
        }))
    }

    /// Square split into a fan of 4 equal triangles around the center;
    /// every triangle has exactly 2 neighbors.
    fn quad_fan(colors: [Rgb; 4]) -> Vec<Triangle> {
        let c = (1.0, 1.0);
        vec![
            tri([(0.0, 0.0), (2.0, 0.0), c], colors[0]),
            tri([(2.0, 0.0), (2.0, 2.0), c], colors[1]),
            tri([(2.0, 2.0), (0.0, 2.0), c], colors[2]),
            tri([(0.0, 2.0), (0.0, 0.0), c], colors[3]),
        ]
    }

    #[test]
    fn test_empty_input() {
        let (primary, detail) = classify(&[], 0.1);
        assert!(primary.is_empty());
        assert!(detail.is_empty());
    }

    #[test]
    fn test_completeness() {
        let gray = Rgb::new(120, 120, 120);
        let tris = quad_fan([gray; 4]);
        let (primary, detail) = classify(&tris, 0.1);
        assert_eq!(primary.len() + detail.len(), tris.len());
    }

    #[test]
    fn test_homogeneous_fan_is_primary() {
        let gray = Rgb::new(120, 120, 120);
        let tris = quad_fan([gray; 4]);
        // Equal areas and identical colors: everything is primary
        let (primary, detail) = classify(&tris, 0.05);
        assert_eq!(primary.len(), 4);
        assert!(detail.is_empty());
    }

    #[test]
    fn test_odd_triangle_breaks_homogeneity() {
        let gray = Rgb::new(120, 120, 120);
        let red = Rgb::new(255, 0, 0);
        // One loud triangle: it and both its neighbors lose a similar
        // neighbor; only the opposite triangle keeps 2
        let tris = quad_fan([red, gray, gray, gray]);
        let (primary, detail) = classify(&tris, 0.05);
        assert_eq!(primary.len(), 1);
        assert_eq!(detail.len(), 3);
        assert_eq!(primary[0].blended_color(), gray);
    }

    #[test]
    fn test_small_triangles_never_primary() {
        let gray = Rgb::new(120, 120, 120);
        let mut tris = quad_fan([gray; 4]);
        // Add a sliver well below 0.55x the mean area; same color, but
        // size alone disqualifies it
        let sliver = tri([(0.0, 0.0), (0.2, 0.0), (0.0, 0.2)], gray);
        tris.push(sliver.clone());
        let (primary, detail) = classify(&tris, 0.05);

        // The sliver lands in detail, and nothing undersized sneaks
        // into primary
        assert!(detail.contains(&sliver));
        assert!(!primary.contains(&sliver));
        let mean_area =
            tris.iter().map(Triangle::area).sum::<f64>() / tris.len() as f64;
        assert!(primary.iter().all(|t| t.area() >= 0.55 * mean_area));
    }
}
