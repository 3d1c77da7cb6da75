use crate::axis::{Axis, Orient};
use crate::color::{BLACK, ORANGE, PURPLE};
use crate::config::SurfaceConfig;
use crate::data::model::{Dataset, Record, RecordId, Selection, Stat};
use crate::scale::{LinearScale, PointScale, DEFAULT_TICKS};
use crate::scene::{Anchor, Element, Scene, Shape, Style, Transform};

pub const LINE_WIDTH: f64 = 1.5;
pub const HIGHLIGHT_OPACITY: f64 = 0.9;
pub const BASE_OPACITY: f64 = 0.1;

/// A record as a polyline across the dimension axes.
#[derive(Debug, Clone, PartialEq)]
struct Trace {
    id: RecordId,
    points: Vec<(f64, f64)>,
}

/// One vertical axis per stat, one polyline per record.
#[derive(Debug, Clone)]
pub struct ParallelCoords {
    surface: SurfaceConfig,
    dimensions: Vec<Stat>,
    x: PointScale,
    y: Vec<LinearScale>,
    /// Only records finite on every dimension.
    traces: Vec<Trace>,
}

impl ParallelCoords {
    pub fn new(dataset: &Dataset, dimensions: &[Stat], surface: SurfaceConfig) -> Self {
        let x = PointScale::new(
            dimensions.iter().map(|d| d.label().to_string()).collect(),
            surface.x_range(),
        );
        let drawn: Vec<&Record> = dataset
            .records
            .iter()
            .filter(|r| r.has_finite(dimensions))
            .collect();
        let y: Vec<LinearScale> = dimensions
            .iter()
            .map(|d| LinearScale::from_values(drawn.iter().map(|r| r.stat(*d)), surface.y_range()))
            .collect();

        let traces = drawn
            .iter()
            .map(|r| Trace {
                id: r.id,
                points: dimensions
                    .iter()
                    .zip(&y)
                    .map(|(d, scale)| {
                        let px = x.position(d.label()).unwrap_or(0.0);
                        (px, scale.apply(r.stat(*d)))
                    })
                    .collect(),
            })
            .collect();

        ParallelCoords {
            surface,
            dimensions: dimensions.to_vec(),
            x,
            y,
            traces,
        }
    }

    #[cfg(test)]
    pub fn dimensions(&self) -> &[Stat] {
        &self.dimensions
    }

    #[cfg(test)]
    pub fn y_scale(&self, dim: Stat) -> Option<&LinearScale> {
        self.dimensions
            .iter()
            .position(|d| *d == dim)
            .map(|i| &self.y[i])
    }

    #[cfg(test)]
    pub fn x_scale(&self) -> &PointScale {
        &self.x
    }

    /// Ids of the records drawn as lines.
    #[cfg(test)]
    pub fn drawn_ids(&self) -> Vec<RecordId> {
        self.traces.iter().map(|t| t.id).collect()
    }

    /// Rebuild every line and axis. Lines of `highlighted` records use the
    /// accent style and are painted after the rest.
    pub fn render(&self, highlighted: &Selection, transform: Transform) -> Scene {
        let s = &self.surface;
        let mut scene = Scene::new(s.width, s.height);
        scene.transform = transform;

        let (accent, base): (Vec<&Trace>, Vec<&Trace>) = self
            .traces
            .iter()
            .partition(|t| highlighted.contains(t.id));

        let base_style = Style::stroke(PURPLE, LINE_WIDTH).with_opacity(BASE_OPACITY);
        let accent_style = Style::stroke(ORANGE, LINE_WIDTH).with_opacity(HIGHLIGHT_OPACITY);
        for (traces, style) in [(base, base_style), (accent, accent_style)] {
            for t in traces {
                scene.push(Element::keyed(
                    Shape::Polyline {
                        points: t.points.clone(),
                    },
                    style,
                    t.id,
                ));
            }
        }

        for (dim, scale) in self.dimensions.iter().zip(&self.y) {
            let Some(px) = self.x.position(dim.label()) else {
                continue;
            };
            scene.extend(Axis::linear(Orient::Left, px, scale, DEFAULT_TICKS).elements());
            scene.push(Element::new(
                Shape::Text {
                    pos: (px, s.margin.top - 10.0),
                    text: dim.label().to_string(),
                    size: 10.0,
                    anchor: Anchor::Middle,
                    angle: 0.0,
                },
                Style::fill(BLACK),
            ));
        }
        scene
    }
}

/// View state that outlives individual renders.
#[derive(Debug, Clone, Default)]
pub struct ParallelState {
    pub highlighted: Selection,
    pub transform: Transform,
}

impl ParallelState {
    pub fn render(&self, view: &ParallelCoords) -> Scene {
        view.render(&self.highlighted, self.transform)
    }

    pub fn reset_zoom(&mut self) {
        self.transform = Transform::IDENTITY;
    }
}
