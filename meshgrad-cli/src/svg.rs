//! SVG serialization of a composed scene.
//!
//! A thin formatter: reads the scene, writes markup, never reaches
//! back into the pipeline. Coordinates are absolute pixels.

use std::fmt::Write;

use meshgrad_core::{Fill, GradientStop, PathCommand, Scene, Shape};

/// Serialize a scene to a standalone SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut defs = String::new();
    let mut body = String::new();

    write_fill_def(&mut defs, "bg", &scene.background.fill);
    let _ = writeln!(
        body,
        r#"  <rect width="{}" height="{}" fill="{}" opacity="{:.3}"/>"#,
        scene.width,
        scene.height,
        fill_ref("bg", &scene.background.fill),
        scene.background.opacity,
    );

    for (layer, prefix) in [(&scene.primary, "p"), (&scene.detail, "d")] {
        for (i, shape) in layer.iter().enumerate() {
            let id = format!("{prefix}{i}");
            write_fill_def(&mut defs, &id, &shape.fill);
            write_shape(&mut body, &id, shape);
        }
    }

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\">\n<defs>\n{defs}</defs>\n{body}</svg>\n",
        w = scene.width,
        h = scene.height,
    )
}

/// Fill attribute value: a gradient reference, or the color itself.
fn fill_ref(id: &str, fill: &Fill) -> String {
    match fill {
        Fill::Solid(c) => c.to_hex(),
        _ => format!("url(#{id})"),
    }
}

fn write_fill_def(out: &mut String, id: &str, fill: &Fill) {
    match fill {
        Fill::Solid(_) => {}
        Fill::Linear { start, end, stops } => {
            let _ = writeln!(
                out,
                r#"  <linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}">"#,
                start.x, start.y, end.x, end.y,
            );
            write_stops(out, stops);
            let _ = writeln!(out, "  </linearGradient>");
        }
        Fill::Radial {
            center,
            radius,
            stops,
        } => {
            let _ = writeln!(
                out,
                r#"  <radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{:.2}" cy="{:.2}" r="{:.2}">"#,
                center.x, center.y, radius,
            );
            write_stops(out, stops);
            let _ = writeln!(out, "  </radialGradient>");
        }
    }
}

fn write_stops(out: &mut String, stops: &[GradientStop]) {
    for stop in stops {
        let _ = writeln!(
            out,
            r#"    <stop offset="{:.3}" stop-color="{}"/>"#,
            stop.offset,
            stop.color.to_hex(),
        );
    }
}

fn write_shape(out: &mut String, id: &str, shape: &Shape) {
    let _ = writeln!(
        out,
        r#"  <path d="{}" fill="{}" fill-opacity="{:.3}"/>"#,
        path_data(&shape.path),
        fill_ref(id, &shape.fill),
        shape.opacity,
    );
}

fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCommand::MoveTo(p) => {
                let _ = write!(d, "M {:.2} {:.2}", p.x, p.y);
            }
            PathCommand::LineTo(p) => {
                let _ = write!(d, "L {:.2} {:.2}", p.x, p.y);
            }
            PathCommand::CurveTo { ctrl1, ctrl2, to } => {
                let _ = write!(
                    d,
                    "C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                );
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}
