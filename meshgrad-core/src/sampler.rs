//! Pixel sampling adapter over a caller-supplied image buffer.
//!
//! The pipeline never touches raw pixels directly; everything goes
//! through [`PixelSource`], which clamps coordinates instead of
//! failing on out-of-range input.

use crate::color::Rgb;
use crate::{Error, Result};

/// A pixel-addressable image source.
///
/// Out-of-range coordinates are clamped to `[0, dimension - 1]`
/// before sampling; they never signal failure.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Nearest-pixel point sample at (x, y), clamped to bounds.
    fn sample(&self, x: f64, y: f64) -> Rgb;

    /// Average of a 3x3 grid of point samples spaced at `0.5 * radius`
    /// around (x, y). Used to denoise local color reads.
    fn region_average(&self, x: f64, y: f64, radius: f64) -> Rgb {
        let step = 0.5 * radius;
        let mut samples = Vec::with_capacity(9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                samples.push(self.sample(x + dx as f64 * step, y + dy as f64 * step));
            }
        }
        Rgb::average(&samples)
    }

    /// Local color variance probe: mean distance from the center color
    /// to 8 samples at equal angular spacing on a circle of `radius`.
    ///
    /// Returns a value in [0, MAX_RGB_DISTANCE]; higher means more
    /// local image complexity.
    fn local_variance(&self, x: f64, y: f64, radius: f64) -> f64 {
        let center = self.sample(x, y);
        let mut total = 0.0;
        for i in 0..8 {
            let angle = i as f64 * std::f64::consts::TAU / 8.0;
            let c = self.sample(x + angle.cos() * radius, y + angle.sin() * radius);
            total += center.distance(&c);
        }
        total / 8.0
    }
}

fn clamp_coord(v: f64, max: u32) -> u32 {
    (v.round().max(0.0) as u32).min(max.saturating_sub(1))
}

impl PixelSource for image::RgbImage {
    fn width(&self) -> u32 {
        image::RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbImage::height(self)
    }

    fn sample(&self, x: f64, y: f64) -> Rgb {
        let px = clamp_coord(x, image::RgbImage::width(self));
        let py = clamp_coord(y, image::RgbImage::height(self));
        Rgb::from(*self.get_pixel(px, py))
    }
}

/// Pixel source over a borrowed raw RGB buffer (3 bytes per pixel,
/// row-major), for callers that don't hold an `image::RgbImage`.
pub struct BufferSource<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> BufferSource<'a> {
    /// Wrap a raw buffer. Fails if the dimensions are zero or the
    /// buffer can't service them — the one hard error in sampling.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if data.len() < expected {
            return Err(Error::PixelBuffer {
                len: data.len(),
                expected,
                width,
                height,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

impl PixelSource for BufferSource<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, x: f64, y: f64) -> Rgb {
        let px = clamp_coord(x, self.width) as usize;
        let py = clamp_coord(y, self.height) as usize;
        let i = (py * self.width as usize + px) * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}
