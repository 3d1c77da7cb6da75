use eframe::egui::{self, epaint::TextShape, Color32, FontId, Painter, Pos2, Stroke};

use crate::color::Color;
use crate::scene::{Anchor, Canvas, Element, Point, Shape, Style, Transform};

// ---------------------------------------------------------------------------
// egui backend for scenes
// ---------------------------------------------------------------------------

pub fn color32(color: Color, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.red, color.green, color.blue, alpha)
}

/// Paints scene elements with an egui [`Painter`], surface origin at `origin`.
pub struct EguiCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
    transform: Transform,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin,
            transform: Transform::IDENTITY,
        }
    }

    fn pos(&self, p: Point) -> Pos2 {
        let (x, y) = self.transform.apply(p);
        Pos2::new(self.origin.x + x as f32, self.origin.y + y as f32)
    }

    fn len(&self, v: f64) -> f32 {
        (v * self.transform.k) as f32
    }

    fn fill(&self, style: &Style) -> Color32 {
        style
            .fill
            .map(|c| color32(c, style.opacity))
            .unwrap_or(Color32::TRANSPARENT)
    }

    fn stroke(&self, style: &Style) -> Stroke {
        match style.stroke {
            Some(c) => Stroke::new(self.len(style.stroke_width), color32(c, style.opacity)),
            None => Stroke::NONE,
        }
    }

    fn text(&self, pos: Point, text: &str, size: f64, anchor: Anchor, angle: f64, color: Color32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), FontId::proportional(self.len(size)), color);
        let size = galley.size();
        let dx = match anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => size.x / 2.0,
            Anchor::End => size.x,
        };
        let dy = size.y / 2.0;
        // The galley rotates about its top-left corner; place that corner so
        // the anchor point lands on `pos`.
        let theta = angle.to_radians() as f32;
        let (sin, cos) = theta.sin_cos();
        let offset = egui::vec2(dx * cos - dy * sin, dx * sin + dy * cos);
        let top_left = self.pos(pos) - offset;
        self.painter
            .add(TextShape::new(top_left, galley, color).with_angle(theta));
    }
}

impl Canvas for EguiCanvas<'_> {
    fn begin(&mut self, _width: f64, _height: f64, transform: &Transform) {
        self.transform = *transform;
    }

    fn draw(&mut self, element: &Element) {
        let style = &element.style;
        match &element.shape {
            Shape::Rect { x, y, width, height } => {
                let corners = [(*x, *y), (x + width, *y), (x + width, y + height), (*x, y + height)];
                let points = corners.iter().map(|p| self.pos(*p)).collect();
                self.painter.add(egui::Shape::convex_polygon(
                    points,
                    self.fill(style),
                    self.stroke(style),
                ));
            }
            Shape::Circle { center, radius } => {
                self.painter.circle(
                    self.pos(*center),
                    self.len(*radius),
                    self.fill(style),
                    self.stroke(style),
                );
            }
            Shape::Line { from, to } => {
                self.painter
                    .line_segment([self.pos(*from), self.pos(*to)], self.stroke(style));
            }
            Shape::Polyline { points } => {
                let points: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
                self.painter.add(egui::Shape::line(points, self.stroke(style)));
            }
            Shape::Text {
                pos,
                text,
                size,
                anchor,
                angle,
            } => {
                let color = style
                    .fill
                    .map(|c| color32(c, style.opacity))
                    .unwrap_or(Color32::BLACK);
                self.text(*pos, text, *size, *anchor, *angle, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::STEELBLUE;

    #[test]
    fn opacity_becomes_alpha() {
        let c = color32(STEELBLUE, 0.6);
        assert_eq!(c.a(), 153);
        assert_eq!(color32(STEELBLUE, 2.0).a(), 255);
        assert_eq!(color32(STEELBLUE, 1.0), Color32::from_rgb(70, 130, 180));
    }
}
