//! Density-adaptive Poisson-disk sampling (Bridson variant).
//!
//! Spacing shrinks where local color variance is high, so detailed
//! regions of the image get denser points and therefore smaller
//! triangles. Randomness comes from an explicitly passed RNG; seed it
//! for reproducible output, or seed from entropy to get the
//! "regenerate gives a different picture" behavior.

use std::f64::consts::{SQRT_2, TAU};

use rand::Rng;

use crate::mood::MoodSettings;
use crate::point::Point;
use crate::sampler::PixelSource;

/// Local spacing never drops below this fraction of the base spacing.
const SPACING_FLOOR: f64 = 0.35;

/// Adaptive Poisson-disk point generator.
pub struct PoissonSampler {
    /// Base minimum distance between points, in pixels
    pub base_min_distance: f64,
    /// Candidate offsets tried per active point before it is retired
    pub max_attempts: u32,
}

impl PoissonSampler {
    pub fn new(base_min_distance: f64) -> Self {
        Self {
            base_min_distance,
            max_attempts: 30,
        }
    }

    /// Minimum spacing at a point: base spacing, shrunk by local
    /// variance (floored at 35%), scaled by the mood's shape scale.
    pub fn local_min_distance<P: PixelSource>(
        &self,
        source: &P,
        p: &Point,
        settings: &MoodSettings,
    ) -> f64 {
        let variance = source.local_variance(p.x, p.y, self.base_min_distance);
        let scale = (1.0 - (variance / 255.0) * settings.adaptive_sensitivity).max(SPACING_FLOOR);
        self.base_min_distance * scale * settings.min_shape_scale
    }

    /// Generate points over the full image plane, seeded at the center.
    ///
    /// Terminates when the active list empties; every acceptance is
    /// subject to the spacing floor, so the point set is finite.
    pub fn sample<P: PixelSource, R: Rng>(
        &self,
        source: &P,
        settings: &MoodSettings,
        rng: &mut R,
    ) -> Vec<Point> {
        let w = source.width() as f64;
        let h = source.height() as f64;

        let mut grid = SpatialGrid::new(w, h, self.base_min_distance / SQRT_2);
        let mut points: Vec<Point> = Vec::new();
        let mut active: Vec<usize> = Vec::new();

        let seed = Point::new(w / 2.0, h / 2.0);
        grid.insert(0, &seed);
        points.push(seed);
        active.push(0);

        while !active.is_empty() {
            let slot = rng.gen_range(0..active.len());
            let src = points[active[slot]];
            let src_dist = self.local_min_distance(source, &src, settings);

            let mut placed = false;
            for _ in 0..self.max_attempts {
                let angle = rng.gen_range(0.0..TAU);
                let dist = rng.gen_range(src_dist..2.0 * src_dist);
                let cand = Point::new(src.x + angle.cos() * dist, src.y + angle.sin() * dist);

                if cand.x < 0.0 || cand.x >= w || cand.y < 0.0 || cand.y >= h {
                    continue;
                }
                let cand_dist = self.local_min_distance(source, &cand, settings);
                if grid.has_neighbor_within(&cand, cand_dist, &points) {
                    continue;
                }

                let idx = points.len();
                grid.insert(idx, &cand);
                points.push(cand);
                active.push(idx);
                placed = true;
                break;
            }

            if !placed {
                // Retired permanently: no room left around this point
                active.swap_remove(slot);
            }
        }

        points
    }

    /// Append the four image corners plus edge points at fixed
    /// `spacing` intervals along all four borders, so the
    /// triangulation covers the full image extent.
    pub fn add_boundary_points(points: &mut Vec<Point>, width: f64, height: f64, spacing: f64) {
        points.push(Point::new(0.0, 0.0));
        points.push(Point::new(width, 0.0));
        points.push(Point::new(0.0, height));
        points.push(Point::new(width, height));

        let mut x = spacing;
        while x < width {
            points.push(Point::new(x, 0.0));
            points.push(Point::new(x, height));
            x += spacing;
        }
        let mut y = spacing;
        while y < height {
            points.push(Point::new(0.0, y));
            points.push(Point::new(width, y));
            y += spacing;
        }
    }
}

/// Uniform grid for O(1)-ish neighbor rejection tests.
///
/// Cell size is `base_min_distance / sqrt(2)`; adaptive spacing can put
/// more than one point in a cell, so cells hold index lists.
struct SpatialGrid {
    cell: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    fn new(width: f64, height: f64, cell: f64) -> Self {
        let cols = ((width / cell).ceil() as usize).max(1);
        let rows = ((height / cell).ceil() as usize).max(1);
        Self {
            cell,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    fn cell_of(&self, p: &Point) -> (usize, usize) {
        let c = ((p.x / self.cell) as usize).min(self.cols - 1);
        let r = ((p.y / self.cell) as usize).min(self.rows - 1);
        (c, r)
    }

    fn insert(&mut self, idx: usize, p: &Point) {
        let (c, r) = self.cell_of(p);
        self.cells[r * self.cols + c].push(idx);
    }

    /// True if any stored point lies strictly within `dist` of `p`.
    fn has_neighbor_within(&self, p: &Point, dist: f64, points: &[Point]) -> bool {
        let (c, r) = self.cell_of(p);
        let reach = (dist / self.cell).ceil() as usize + 1;
        let dist_sq = dist * dist;

        let r_start = r.saturating_sub(reach);
        let r_end = (r + reach + 1).min(self.rows);
        let c_start = c.saturating_sub(reach);
        let c_end = (c + reach + 1).min(self.cols);

        for ri in r_start..r_end {
            for ci in c_start..c_end {
                for &idx in &self.cells[ri * self.cols + ci] {
                    if points[idx].dist_sq(p) < dist_sq {
                        return true;
                    }
                }
            }
        }
        false
    }
}
