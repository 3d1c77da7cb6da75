//! SVG export: a [`Canvas`] that writes markup instead of painting.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::color::to_hex;
use crate::scene::{Anchor, Canvas, Element, Scene, Shape, Style, Transform};

#[derive(Debug, Default)]
pub struct SvgCanvas {
    buf: String,
    grouped: bool,
}

impl SvgCanvas {
    pub fn into_string(self) -> String {
        self.buf
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn style_attrs(style: &Style) -> String {
    let mut out = String::new();
    match style.fill {
        Some(c) => {
            let _ = write!(out, r#" fill="{}""#, to_hex(c));
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(c) = style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            to_hex(c),
            style.stroke_width
        );
    }
    if style.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, style.opacity);
    }
    out
}

impl Canvas for SvgCanvas {
    fn begin(&mut self, width: f64, height: f64, transform: &Transform) {
        let _ = write!(
            self.buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        if !transform.is_identity() {
            let _ = write!(
                self.buf,
                r#"<g transform="translate({},{}) scale({})">"#,
                transform.x, transform.y, transform.k
            );
            self.grouped = true;
        }
    }

    fn draw(&mut self, element: &Element) {
        let attrs = style_attrs(&element.style);
        let buf = &mut self.buf;
        let _ = match &element.shape {
            Shape::Rect { x, y, width, height } => write!(
                buf,
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}"{attrs}/>"#
            ),
            Shape::Circle { center, radius } => write!(
                buf,
                r#"<circle cx="{}" cy="{}" r="{radius}"{attrs}/>"#,
                center.0, center.1
            ),
            Shape::Line { from, to } => write!(
                buf,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}/>"#,
                from.0, from.1, to.0, to.1
            ),
            Shape::Polyline { points } => {
                let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x},{y}")).collect();
                write!(buf, r#"<polyline points="{}"{attrs}/>"#, coords.join(" "))
            }
            Shape::Text {
                pos,
                text,
                size,
                anchor,
                angle,
            } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let rotate = if *angle != 0.0 {
                    format!(r#" transform="rotate({angle} {} {})""#, pos.0, pos.1)
                } else {
                    String::new()
                };
                write!(
                    buf,
                    r#"<text x="{}" y="{}" dy="0.32em" font-size="{size}" text-anchor="{anchor}"{rotate}{attrs}>{}</text>"#,
                    pos.0,
                    pos.1,
                    escape(text)
                )
            }
        };
    }

    fn finish(&mut self) {
        if self.grouped {
            self.buf.push_str("</g>");
        }
        self.buf.push_str("</svg>\n");
    }
}

/// Render a scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut canvas = SvgCanvas::default();
    scene.replay(&mut canvas);
    canvas.into_string()
}

/// Write each `(surface id, scene)` to `<dir>/<id>.svg`.
pub fn write_all(dir: &Path, scenes: &[(&str, &Scene)]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(scenes.len());
    for (id, scene) in scenes {
        let path = dir.join(format!("{id}.svg"));
        std::fs::write(&path, to_svg(scene))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}
