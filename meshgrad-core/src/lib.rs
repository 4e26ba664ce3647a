//! Core mesh-gradient vectorization library.
//!
//! Turns a raster image into a layered vector scene: a background
//! gradient, smoothly shaded "primary" regions, and high-contrast
//! "detail" regions, all parameterized by a single mood value.
//!
//! Pipeline stages: adaptive Poisson-disk sampling of the image plane,
//! incremental Delaunay triangulation, per-triangle color attribution,
//! neighbor-graph shape classification, path smoothing, and scene
//! composition.

mod classify;
mod color;
mod delaunay;
mod gradient;
mod mesh;
mod mood;
mod pipeline;
mod point;
mod poisson;
mod sampler;
mod scene;
mod smooth;

pub use classify::classify;
pub use color::{Rgb, MAX_RGB_DISTANCE};
pub use delaunay::{cull_micro_triangles, triangulate, MICRO_AREA_FACTOR};
pub use gradient::{analyze_base_gradient, BaseGradient, DominantColorSample};
pub use mesh::{attribute_triangles, Triangle, Vertex};
pub use mood::MoodSettings;
pub use pipeline::Pipeline;
pub use point::Point;
pub use poisson::PoissonSampler;
pub use sampler::{BufferSource, PixelSource};
pub use scene::{
    compose, Background, Fill, GradientStop, PathCommand, Scene, Shape,
};
pub use smooth::{bezier_path, chaikin, expand};

/// Error type for mesh-gradient operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid base spacing: {0} (must be positive)")]
    InvalidSpacing(f64),

    #[error("Pixel buffer holds {len} bytes, need {expected} for {width}x{height}")]
    PixelBuffer {
        len: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
