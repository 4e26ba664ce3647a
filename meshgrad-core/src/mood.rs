//! Mood-to-settings mapping.
//!
//! A single mood scalar in [0, 100] drives every styling parameter.
//! Low mood keeps shapes tight, sharp, and independent; high mood
//! produces larger, softer, more uniformly lit shapes. Every field is
//! a linear (hence monotonic) function of mood.

use serde::{Deserialize, Serialize};

/// Styling parameters derived from a mood value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodSettings {
    /// Chaikin rounds applied to each shape outline (1..=4)
    pub smoothing_iterations: u32,
    /// Centroid-relative expansion factor (>1 grows shapes so
    /// neighbors still overlap after smoothing shrinks them)
    pub overlap: f64,
    /// Fill opacity of primary and detail shapes
    pub shape_opacity: f64,
    /// How strongly local variance shrinks Poisson spacing
    pub adaptive_sensitivity: f64,
    /// Multiplier on the base minimum spacing (bigger = fewer, larger shapes)
    pub min_shape_scale: f64,
    /// Normalized color distance below which two neighboring triangles
    /// count as similar for classification
    pub merge_threshold: f64,
    /// 0 = each detail gradient follows its own shape, 1 = all detail
    /// gradients align with the global light-flow direction
    pub gradient_consistency: f64,
    /// Opacity of the background gradient layer
    pub background_opacity: f64,
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl MoodSettings {
    /// Map a mood value in [0, 100] (clamped) to settings.
    pub fn from_mood(mood: f64) -> Self {
        let t = (mood / 100.0).clamp(0.0, 1.0);
        Self {
            smoothing_iterations: (lerp(1.0, 4.0, t).round() as u32).max(1),
            overlap: lerp(1.05, 1.25, t),
            shape_opacity: lerp(0.92, 0.62, t),
            adaptive_sensitivity: lerp(2.0, 0.8, t),
            min_shape_scale: lerp(0.8, 1.6, t),
            merge_threshold: lerp(0.08, 0.30, t),
            gradient_consistency: lerp(0.2, 1.0, t),
            background_opacity: lerp(0.85, 1.0, t),
        }
    }
}
