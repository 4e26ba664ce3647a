//! End-to-end pipeline: pixel buffer + mood -> vector scene.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::delaunay::{cull_micro_triangles, triangulate};
use crate::mesh::attribute_triangles;
use crate::mood::MoodSettings;
use crate::poisson::PoissonSampler;
use crate::sampler::PixelSource;
use crate::scene::{compose, Scene};
use crate::{Error, Result};

const DEFAULT_SPACING: f64 = 24.0;

/// Pipeline runner. Owns the RNG so repeated runs keep drawing fresh
/// point sets (the "regenerate" behavior); construct with [`seeded`]
/// for reproducible output.
///
/// [`seeded`]: Pipeline::seeded
pub struct Pipeline {
    /// Base minimum Poisson spacing, in pixels
    pub base_spacing: f64,
    rng: ChaCha8Rng,
}

impl Pipeline {
    /// Entropy-seeded pipeline: each run yields a different point set.
    pub fn new() -> Self {
        Self {
            base_spacing: DEFAULT_SPACING,
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
        }
    }

    /// Deterministic pipeline: identical inputs yield identical scenes.
    pub fn seeded(seed: u64) -> Self {
        Self {
            base_spacing: DEFAULT_SPACING,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_spacing(mut self, pixels: f64) -> Self {
        self.base_spacing = pixels;
        self
    }

    /// Run the full pipeline on a pixel source with a mood in [0, 100].
    ///
    /// The source is expected to be perceptually denoised already;
    /// the core does no raster filtering of its own.
    pub fn run<P: PixelSource>(&mut self, source: &P, mood: f64) -> Result<Scene> {
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        // Zero, negative, or NaN spacing would blow up the spatial
        // grid and the candidate-distance range downstream
        if !(self.base_spacing > 0.0) {
            return Err(Error::InvalidSpacing(self.base_spacing));
        }

        let settings = MoodSettings::from_mood(mood);
        let sampler = PoissonSampler::new(self.base_spacing);

        let mut points = sampler.sample(source, &settings, &mut self.rng);
        PoissonSampler::add_boundary_points(
            &mut points,
            width as f64,
            height as f64,
            self.base_spacing,
        );

        let triangles = cull_micro_triangles(&points, triangulate(&points));
        let mesh = attribute_triangles(&points, &triangles, source);

        Ok(compose(&mesh, width, height, mood, source))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
