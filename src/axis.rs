use crate::color::BLACK;
use crate::scale::{format_tick, BandScale, LinearScale};
use crate::scene::{Anchor, Element, Shape, Style};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const LABEL_SIZE: f64 = 10.0;
const TITLE_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    /// Horizontal axis, labels below.
    Bottom,
    /// Vertical axis, labels to the left.
    Left,
}

/// Tick marks and labels along one edge of a plotting area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orient: Orient,
    /// y of a bottom axis, x of a left axis.
    offset: f64,
    span: (f64, f64),
    ticks: Vec<(f64, String)>,
    label_angle: f64,
}

impl Axis {
    pub fn linear(orient: Orient, offset: f64, scale: &LinearScale, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| (scale.apply(v), format_tick(v)))
            .collect();
        Axis {
            orient,
            offset,
            span: scale.range,
            ticks,
            label_angle: 0.0,
        }
    }

    /// Ticks at band centres.
    pub fn band(orient: Orient, offset: f64, scale: &BandScale) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|key| scale.position(key).map(|p| (p + half, key.clone())))
            .collect();
        Axis {
            orient,
            offset,
            span: scale.range(),
            ticks,
            label_angle: 0.0,
        }
    }

    /// Rotate labels by `degrees`; rotated labels are end-anchored.
    pub fn rotate_labels(mut self, degrees: f64) -> Self {
        self.label_angle = degrees;
        self
    }

    #[cfg(test)]
    pub fn tick_positions(&self) -> Vec<f64> {
        self.ticks.iter().map(|(p, _)| *p).collect()
    }

    pub fn elements(&self) -> Vec<Element> {
        let line = Style::stroke(BLACK, 1.0);
        let text = Style::fill(BLACK);
        let mut out = Vec::with_capacity(1 + self.ticks.len() * 2);

        let (a, b) = self.span;
        let domain = match self.orient {
            Orient::Bottom => Shape::Line {
                from: (a, self.offset),
                to: (b, self.offset),
            },
            Orient::Left => Shape::Line {
                from: (self.offset, a),
                to: (self.offset, b),
            },
        };
        out.push(Element::new(domain, line));

        for (pos, label) in &self.ticks {
            let (tick, label_pos, anchor) = match self.orient {
                Orient::Bottom => (
                    Shape::Line {
                        from: (*pos, self.offset),
                        to: (*pos, self.offset + TICK_SIZE),
                    },
                    (*pos, self.offset + TICK_SIZE + TICK_PADDING),
                    if self.label_angle != 0.0 {
                        Anchor::End
                    } else {
                        Anchor::Middle
                    },
                ),
                Orient::Left => (
                    Shape::Line {
                        from: (self.offset - TICK_SIZE, *pos),
                        to: (self.offset, *pos),
                    },
                    (self.offset - TICK_SIZE - TICK_PADDING, *pos),
                    Anchor::End,
                ),
            };
            out.push(Element::new(tick, line));
            out.push(Element::new(
                Shape::Text {
                    pos: label_pos,
                    text: label.clone(),
                    size: LABEL_SIZE,
                    anchor,
                    angle: self.label_angle,
                },
                text,
            ));
        }
        out
    }
}

/// A centred axis title; `angle` -90 for a vertical title.
pub fn title(pos: (f64, f64), text: &str, angle: f64) -> Element {
    Element::new(
        Shape::Text {
            pos,
            text: text.to_string(),
            size: TITLE_SIZE,
            anchor: Anchor::Middle,
            angle,
        },
        Style::fill(BLACK),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_axis_places_ticks_through_scale() {
        let scale = LinearScale::new((0.0, 100.0), (300.0, 100.0));
        let axis = Axis::linear(Orient::Left, 50.0, &scale, 5);
        let expected = [300.0, 260.0, 220.0, 180.0, 140.0, 100.0];
        let got = axis.tick_positions();
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-9, "{g} != {e}");
        }
        // domain line + (tick + label) per tick
        assert_eq!(axis.elements().len(), 1 + 6 * 2);
    }

    #[test]
    fn rotated_band_labels_are_end_anchored() {
        let band = BandScale::new(vec!["Fire".into(), "Water".into()], (0.0, 200.0), 0.1);
        let axis = Axis::band(Orient::Bottom, 150.0, &band).rotate_labels(-40.0);
        let label = axis
            .elements()
            .into_iter()
            .find_map(|e| match e.shape {
                Shape::Text { text, anchor, angle, .. } => Some((text, anchor, angle)),
                _ => None,
            })
            .unwrap();
        assert_eq!(label, ("Fire".to_string(), Anchor::End, -40.0));
    }
}
