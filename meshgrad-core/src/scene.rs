//! Scene data model and composition.
//!
//! [`compose`] turns the classified triangle mesh into the final
//! three-layer scene: a background gradient, radial-filled primary
//! shapes, and linear-filled detail shapes whose gradients follow a
//! global light-flow direction.

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::color::Rgb;
use crate::gradient::analyze_base_gradient;
use crate::mesh::Triangle;
use crate::mood::MoodSettings;
use crate::point::Point;
use crate::sampler::PixelSource;
use crate::smooth::{bezier_path, chaikin, expand};

/// Radial fill radius as a multiple of the farthest vertex distance
/// from the shape centroid.
const RADIAL_RADIUS_FACTOR: f64 = 1.15;
/// Sampling radius for the shape-center color probe, in pixels.
const CENTER_PROBE_RADIUS: f64 = 2.0;

/// One outline path command, coordinates in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
}

/// A gradient color stop with a normalized offset in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgb,
}

/// Fill descriptor: solid, linear gradient, or radial gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Rgb),
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

/// A filled, smoothed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub path: Vec<PathCommand>,
    pub fill: Fill,
    pub opacity: f64,
}

/// The backdrop layer: one full-canvas fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub fill: Fill,
    pub opacity: f64,
}

/// Ordered three-layer scene: background, then primary shapes, then
/// detail shapes on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub primary: Vec<Shape>,
    pub detail: Vec<Shape>,
}

/// Aggregate light-flow direction: accumulate min-luminance ->
/// max-luminance vertex vectors over all triangles, then normalize.
/// Falls back to (1, 0) when the aggregate has no usable magnitude.
fn global_light_direction(triangles: &[Triangle]) -> Point {
    let mut acc = Point::new(0.0, 0.0);
    for tri in triangles {
        let mut min_v = &tri.vertices[0];
        let mut max_v = &tri.vertices[0];
        for v in &tri.vertices[1..] {
            if v.color.luminance() < min_v.color.luminance() {
                min_v = v;
            }
            if v.color.luminance() > max_v.color.luminance() {
                max_v = v;
            }
        }
        acc.x += max_v.pos.x - min_v.pos.x;
        acc.y += max_v.pos.y - min_v.pos.y;
    }
    normalize_or(acc, Point::new(1.0, 0.0))
}

fn normalize_or(v: Point, fallback: Point) -> Point {
    let mag = (v.x * v.x + v.y * v.y).sqrt();
    if mag < 1e-9 {
        fallback
    } else {
        Point::new(v.x / mag, v.y / mag)
    }
}

/// Expand, smooth, and bezier-fit one triangle's outline.
fn shape_outline(tri: &Triangle, settings: &MoodSettings) -> (Vec<Point>, Vec<PathCommand>) {
    let centroid = tri.centroid();
    let expanded = expand(&tri.positions(), centroid, settings.overlap);
    let smoothed = chaikin(&expanded, settings.smoothing_iterations);
    let path = bezier_path(&smoothed);
    (expanded, path)
}

fn primary_shape<P: PixelSource>(tri: &Triangle, settings: &MoodSettings, source: &P) -> Shape {
    let centroid = tri.centroid();
    let (expanded, path) = shape_outline(tri, settings);

    let radius = expanded
        .iter()
        .map(|p| p.dist(&centroid))
        .fold(0.0, f64::max)
        * RADIAL_RADIUS_FACTOR;
    let center_color = source.region_average(centroid.x, centroid.y, CENTER_PROBE_RADIUS);

    Shape {
        path,
        fill: Fill::Radial {
            center: centroid,
            radius,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: center_color,
                },
                GradientStop {
                    offset: 1.0,
                    color: tri.blended_color(),
                },
            ],
        },
        opacity: settings.shape_opacity,
    }
}

fn detail_shape(tri: &Triangle, settings: &MoodSettings, global_dir: Point) -> Shape {
    let centroid = tri.centroid();
    let (expanded, path) = shape_outline(tri, settings);

    // Per-shape light direction, blended toward the global one by
    // gradient_consistency (0 = independent, 1 = fully aligned)
    let mut min_v = &tri.vertices[0];
    let mut max_v = &tri.vertices[0];
    for v in &tri.vertices[1..] {
        if v.color.luminance() < min_v.color.luminance() {
            min_v = v;
        }
        if v.color.luminance() > max_v.color.luminance() {
            max_v = v;
        }
    }
    let own = normalize_or(
        Point::new(max_v.pos.x - min_v.pos.x, max_v.pos.y - min_v.pos.y),
        global_dir,
    );
    let c = settings.gradient_consistency;
    let dir = normalize_or(
        Point::new(
            own.x * (1.0 - c) + global_dir.x * c,
            own.y * (1.0 - c) + global_dir.y * c,
        ),
        global_dir,
    );

    // Gradient endpoints: the shape's extent along the direction,
    // pulled toward the centroid as consistency drops
    let extent = expanded
        .iter()
        .map(|p| ((p.x - centroid.x) * dir.x + (p.y - centroid.y) * dir.y).abs())
        .fold(0.0, f64::max);
    let reach = extent * (0.5 + 0.5 * c);
    let start = Point::new(centroid.x - dir.x * reach, centroid.y - dir.y * reach);
    let end = Point::new(centroid.x + dir.x * reach, centroid.y + dir.y * reach);

    // Stops: vertex colors ordered by projection onto the direction
    let mut projected: Vec<(f64, Rgb)> = tri
        .vertices
        .iter()
        .map(|v| {
            (
                (v.pos.x - centroid.x) * dir.x + (v.pos.y - centroid.y) * dir.y,
                v.color,
            )
        })
        .collect();
    projected.sort_by(|a, b| a.0.total_cmp(&b.0));

    let span = projected[2].0 - projected[0].0;
    let stops = if span < 1e-9 {
        vec![
            GradientStop {
                offset: 0.0,
                color: projected[0].1,
            },
            GradientStop {
                offset: 0.5,
                color: projected[1].1,
            },
            GradientStop {
                offset: 1.0,
                color: projected[2].1,
            },
        ]
    } else {
        projected
            .iter()
            .map(|&(p, color)| GradientStop {
                offset: (p - projected[0].0) / span,
                color,
            })
            .collect()
    };

    Shape {
        path,
        fill: Fill::Linear { start, end, stops },
        opacity: settings.shape_opacity,
    }
}

/// Compose the attributed mesh into a three-layer scene.
pub fn compose<P: PixelSource>(
    triangles: &[Triangle],
    width: u32,
    height: u32,
    mood: f64,
    source: &P,
) -> Scene {
    let settings = MoodSettings::from_mood(mood);
    let (w, h) = (width as f64, height as f64);

    // Background: the dominant dark-to-light gradient across the image
    let base = analyze_base_gradient(source);
    let mid = Rgb::average(&base.samples.iter().map(|s| s.color).collect::<Vec<_>>());
    let background = Background {
        fill: Fill::Linear {
            start: Point::new(base.start.x * w, base.start.y * h),
            end: Point::new(base.end.x * w, base.end.y * h),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: base.start_color(),
                },
                GradientStop {
                    offset: 0.5,
                    color: mid,
                },
                GradientStop {
                    offset: 1.0,
                    color: base.end_color(),
                },
            ],
        },
        opacity: settings.background_opacity,
    };

    let global_dir = global_light_direction(triangles);
    let (primary_tris, detail_tris) = classify(triangles, settings.merge_threshold);

    Scene {
        width,
        height,
        background,
        primary: primary_tris
            .iter()
            .map(|t| primary_shape(t, &settings, source))
            .collect(),
        detail: detail_tris
            .iter()
            .map(|t| detail_shape(t, &settings, global_dir))
            .collect(),
    }
}
