//! Background gradient analysis.
//!
//! Samples a fixed 6x6 grid of region-averaged colors and picks the
//! most-contrasting pair to define a dark-to-light gradient direction
//! for the backdrop layer.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::point::Point;
use crate::sampler::PixelSource;

const GRID: u32 = 6;

/// A region-averaged color sample at a normalized image position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColorSample {
    pub color: Rgb,
    /// Position in [0,1] image-fraction coordinates
    pub position: Point,
    /// Reserved for future weighting; currently always 1
    pub weight: f64,
}

/// Dominant-color samples plus the chosen gradient direction,
/// oriented from lower to higher luminance, in [0,1] image fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseGradient {
    pub samples: Vec<DominantColorSample>,
    pub start: Point,
    pub end: Point,
}

impl BaseGradient {
    pub fn start_color(&self) -> Rgb {
        self.color_at(self.start)
    }

    pub fn end_color(&self) -> Rgb {
        self.color_at(self.end)
    }

    /// Color of the grid sample nearest to a normalized position.
    /// (The fallback direction endpoints sit between grid samples.)
    fn color_at(&self, pos: Point) -> Rgb {
        self.samples
            .iter()
            .min_by(|a, b| {
                a.position
                    .dist_sq(&pos)
                    .total_cmp(&b.position.dist_sq(&pos))
            })
            .map(|s| s.color)
            .unwrap_or(Rgb::BLACK)
    }
}

/// Sample the 6x6 grid and pick the maximum-color-distance pair.
///
/// When every sample is the same color (no pair has positive
/// distance), the direction falls back to top-left -> bottom-right so
/// downstream normalization never divides by zero.
pub fn analyze_base_gradient<P: PixelSource>(source: &P) -> BaseGradient {
    let w = source.width() as f64;
    let h = source.height() as f64;
    let radius = (w.min(h) / (2.0 * GRID as f64)).max(1.0);

    let mut samples = Vec::with_capacity((GRID * GRID) as usize);
    for gy in 0..GRID {
        for gx in 0..GRID {
            let fx = (gx as f64 + 0.5) / GRID as f64;
            let fy = (gy as f64 + 0.5) / GRID as f64;
            samples.push(DominantColorSample {
                color: source.region_average(fx * w, fy * h, radius),
                position: Point::new(fx, fy),
                weight: 1.0,
            });
        }
    }

    let mut best = (0usize, 0usize);
    let mut best_dist = 0.0;
    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            let dist = samples[i].color.distance(&samples[j].color);
            if dist > best_dist {
                best_dist = dist;
                best = (i, j);
            }
        }
    }

    let (start, end) = if best_dist == 0.0 {
        (Point::new(0.0, 0.0), Point::new(1.0, 1.0))
    } else {
        let (a, b) = (&samples[best.0], &samples[best.1]);
        if a.color.luminance() <= b.color.luminance() {
            (a.position, b.position)
        } else {
            (b.position, a.position)
        }
    };

    BaseGradient {
        samples,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_fallback() {
        let img = image::RgbImage::from_pixel(60, 60, image::Rgb([128, 128, 128]));
        let grad = analyze_base_gradient(&img);
        assert_eq!(grad.samples.len(), 36);
        assert_eq!(grad.start, Point::new(0.0, 0.0));
        assert_eq!(grad.end, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_dark_to_light_orientation() {
        // Left half black, right half white
        let img = image::RgbImage::from_fn(60, 30, |x, _| {
            if x < 30 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        let grad = analyze_base_gradient(&img);
        // Direction points from the dark side to the light side
        assert!(grad.start.x < 0.5);
        assert!(grad.end.x > 0.5);
        assert!(grad.start_color().luminance() < grad.end_color().luminance());
    }

    #[test]
    fn test_vertical_orientation() {
        // Top dark, bottom light
        let img = image::RgbImage::from_fn(30, 60, |_, y| {
            if y < 30 {
                image::Rgb([10, 10, 10])
            } else {
                image::Rgb([240, 240, 240])
            }
        });
        let grad = analyze_base_gradient(&img);
        assert!(grad.start.y < 0.5);
        assert!(grad.end.y > 0.5);
    }

    #[test]
    fn test_positions_normalized() {
        let img = image::RgbImage::from_pixel(123, 77, image::Rgb([5, 5, 5]));
        let grad = analyze_base_gradient(&img);
        for s in &grad.samples {
            assert!(s.position.x > 0.0 && s.position.x < 1.0);
            assert!(s.position.y > 0.0 && s.position.y < 1.0);
            assert_eq!(s.weight, 1.0);
        }
    }
}
