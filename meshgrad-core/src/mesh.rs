//! Color-attributed triangle mesh.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::point::Point;
use crate::sampler::PixelSource;

/// Triangulation vertex with its sampled color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Point,
    pub color: Rgb,
}

/// A color-attributed triangle. Vertex order is preserved from the
/// triangulation and is not guaranteed CCW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    /// Arithmetic mean of the three vertex positions
    pub fn centroid(&self) -> Point {
        let [a, b, c] = &self.vertices;
        Point::new(
            (a.pos.x + b.pos.x + c.pos.x) / 3.0,
            (a.pos.y + b.pos.y + c.pos.y) / 3.0,
        )
    }

    /// Unsigned area via the cross-product formula. Zero means the
    /// vertices are collinear; downstream area filters remove those.
    pub fn area(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        ((b.pos.x - a.pos.x) * (c.pos.y - a.pos.y)
            - (c.pos.x - a.pos.x) * (b.pos.y - a.pos.y))
            .abs()
            / 2.0
    }

    /// Component-wise mean of the three vertex colors
    pub fn blended_color(&self) -> Rgb {
        Rgb::average(&[
            self.vertices[0].color,
            self.vertices[1].color,
            self.vertices[2].color,
        ])
    }

    /// Mean distance of each vertex color to the blended average —
    /// zero for a flat-colored triangle.
    pub fn color_variance(&self) -> f64 {
        let blended = self.blended_color();
        self.vertices
            .iter()
            .map(|v| v.color.distance(&blended))
            .sum::<f64>()
            / 3.0
    }

    /// Vertex positions as an array
    pub fn positions(&self) -> [Point; 3] {
        [
            self.vertices[0].pos,
            self.vertices[1].pos,
            self.vertices[2].pos,
        ]
    }
}

/// Attach a sampled color to every triangulation vertex, producing an
/// attributed mesh from index triples.
pub fn attribute_triangles<P: PixelSource>(
    points: &[Point],
    triangles: &[[usize; 3]],
    source: &P,
) -> Vec<Triangle> {
    triangles
        .iter()
        .map(|tri| {
            let vertex = |i: usize| {
                let pos = points[i];
                Vertex {
                    pos,
                    color: source.sample(pos.x, pos.y),
                }
            };
            Triangle::new([vertex(tri[0]), vertex(tri[1]), vertex(tri[2])])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(coords: [(f64, f64); 3], colors: [Rgb; 3]) -> Triangle {
        Triangle::new([
            Vertex {
                pos: Point::new(coords[0].0, coords[0].1),
                color: colors[0],
            },
            Vertex {
                pos: Point::new(coords[1].0, coords[1].1),
                color: colors[1],
            },
            Vertex {
                pos: Point::new(coords[2].0, coords[2].1),
                color: colors[2],
            },
        ])
    }

    #[test]
    fn test_centroid_and_area() {
        let t = tri(
            [(0.0, 0.0), (6.0, 0.0), (0.0, 6.0)],
            [Rgb::BLACK, Rgb::BLACK, Rgb::BLACK],
        );
        assert_eq!(t.centroid(), Point::new(2.0, 2.0));
        assert_eq!(t.area(), 18.0);
    }

    #[test]
    fn test_degenerate_area() {
        let t = tri(
            [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)],
            [Rgb::BLACK, Rgb::BLACK, Rgb::BLACK],
        );
        assert_eq!(t.area(), 0.0);
    }

    #[test]
    fn test_color_variance() {
        let flat = tri(
            [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            [Rgb::new(80, 80, 80); 3],
        );
        assert_eq!(flat.color_variance(), 0.0);

        let mixed = tri(
            [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            [Rgb::BLACK, Rgb::new(255, 255, 255), Rgb::new(128, 128, 128)],
        );
        assert!(mixed.color_variance() > 0.0);
        assert_eq!(mixed.blended_color(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_attribute_triangles() {
        let img = image::RgbImage::from_fn(10, 10, |x, _| image::Rgb([(x * 20) as u8, 0, 0]));
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(9.0, 0.0),
            Point::new(0.0, 9.0),
        ];
        let attributed = attribute_triangles(&points, &[[0, 1, 2]], &img);
        assert_eq!(attributed.len(), 1);
        assert_eq!(attributed[0].vertices[0].color, Rgb::new(0, 0, 0));
        assert_eq!(attributed[0].vertices[1].color, Rgb::new(180, 0, 0));
    }
}
