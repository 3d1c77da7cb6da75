//! Backend-neutral drawing commands.
//!
//! Views turn records and view state into a [`Scene`]; a backend that
//! implements [`Canvas`] replays it. Nothing in here knows about egui.

use crate::color::Color;
use crate::data::model::RecordId;

/// A point in surface pixels, origin top-left.
pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Line {
        from: Point,
        to: Point,
    },
    Polyline {
        points: Vec<Point>,
    },
    /// `angle` in degrees, clockwise, around `pos`.
    Text {
        pos: Point,
        text: String,
        size: f64,
        anchor: Anchor,
        angle: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Style {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Style {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

/// One drawable. `key` ties data-bound marks back to their record.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
    pub key: Option<RecordId>,
}

impl Element {
    pub fn new(shape: Shape, style: Style) -> Self {
        Element {
            shape,
            style,
            key: None,
        }
    }

    pub fn keyed(shape: Shape, style: Style, key: RecordId) -> Self {
        Element {
            shape,
            style,
            key: Some(key),
        }
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Smallest and largest zoom factor.
pub const SCALE_EXTENT: (f64, f64) = (0.25, 32.0);

/// Uniform scale followed by a translation: `p' = p * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, (px, py): Point) -> Point {
        (px * self.k + self.x, py * self.k + self.y)
    }

    pub fn invert(&self, (px, py): Point) -> Point {
        ((px - self.x) / self.k, (py - self.y) / self.k)
    }

    /// Pan by a screen-space delta.
    pub fn translate_by(self, dx: f64, dy: f64) -> Self {
        Transform {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Zoom by `factor` keeping the screen point `anchor` fixed.
    pub fn scale_about(self, anchor: Point, factor: f64) -> Self {
        let k = (self.k * factor).clamp(SCALE_EXTENT.0, SCALE_EXTENT.1);
        let (wx, wy) = self.invert(anchor);
        Transform {
            k,
            x: anchor.0 - wx * k,
            y: anchor.1 - wy * k,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Everything drawn on one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Applied by the backend to every element.
    pub transform: Transform,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Scene {
            width,
            height,
            transform: Transform::IDENTITY,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    /// Elements bound to a record.
    #[cfg(test)]
    pub fn keyed(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.key.is_some())
    }

    /// Feed every element to a backend, in order.
    pub fn replay<C: Canvas>(&self, canvas: &mut C) {
        canvas.begin(self.width, self.height, &self.transform);
        for element in &self.elements {
            canvas.draw(element);
        }
        canvas.finish();
    }
}

/// A rendering backend.
pub trait Canvas {
    fn begin(&mut self, _width: f64, _height: f64, _transform: &Transform) {}
    fn draw(&mut self, element: &Element);
    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;

    #[test]
    fn transform_round_trips_points() {
        let t = Transform { k: 2.0, x: 10.0, y: -5.0 };
        assert_eq!(t.apply((3.0, 4.0)), (16.0, 3.0));
        assert_eq!(t.invert((16.0, 3.0)), (3.0, 4.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let t = Transform::IDENTITY.translate_by(20.0, 0.0);
        let zoomed = t.scale_about((100.0, 50.0), 2.0);
        assert_eq!(zoomed.k, 2.0);
        assert_eq!(zoomed.apply(t.invert((100.0, 50.0))), (100.0, 50.0));

        let far = Transform::IDENTITY.scale_about((0.0, 0.0), 1e6);
        assert_eq!(far.k, SCALE_EXTENT.1);
        let near = Transform::IDENTITY.scale_about((0.0, 0.0), 1e-6);
        assert_eq!(near.k, SCALE_EXTENT.0);
    }

    struct Recorder(Vec<String>);

    impl Canvas for Recorder {
        fn begin(&mut self, width: f64, height: f64, _transform: &Transform) {
            self.0.push(format!("begin {width}x{height}"));
        }
        fn draw(&mut self, element: &Element) {
            self.0.push(format!("{:?}", element.key));
        }
        fn finish(&mut self) {
            self.0.push("finish".into());
        }
    }

    #[test]
    fn replay_visits_elements_in_order() {
        let mut scene = Scene::new(40.0, 30.0);
        let dot = Shape::Circle {
            center: (1.0, 1.0),
            radius: 1.0,
        };
        scene.push(Element::keyed(dot.clone(), Style::fill(BLACK), 7));
        scene.push(Element::new(dot, Style::fill(BLACK)));

        let mut rec = Recorder(Vec::new());
        scene.replay(&mut rec);
        assert_eq!(rec.0, vec!["begin 40x30", "Some(7)", "None", "finish"]);
        assert_eq!(scene.keyed().count(), 1);
    }
}
