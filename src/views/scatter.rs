use crate::axis::{self, Axis, Orient};
use crate::color::{Color, ColorMap, BLACK, GRAY, WHITE};
use crate::config::SurfaceConfig;
use crate::data::model::{Dataset, Record, RecordId, Selection, Stat};
use crate::scale::{extent, LinearScale, DEFAULT_TICKS};
use crate::scene::{Anchor, Element, Point, Scene, Shape, Style};

use super::brush::{Brush, BrushRect};
use super::fade::OpacityFade;

pub const POINT_RADIUS: f64 = 4.0;
pub const DEFAULT_OPACITY: f64 = 0.6;
pub const SELECTED_OPACITY: f64 = 1.0;
pub const UNSELECTED_OPACITY: f64 = 0.1;

const X_TICKS: usize = 5;
const LEGEND_OFFSET: (f64, f64) = (120.0, 30.0);
const LEGEND_ROW: f64 = 20.0;

/// A record projected onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub id: RecordId,
    pub cx: f64,
    pub cy: f64,
    pub color: Color,
}

/// Two stats against each other, one dot per record, coloured by category.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    surface: SurfaceConfig,
    x_stat: Stat,
    y_stat: Stat,
    x: LinearScale,
    y: LinearScale,
    /// Records with a non-finite x or y are left out.
    points: Vec<ScatterPoint>,
    legend: Vec<(String, Color)>,
}

impl ScatterPlot {
    pub fn new(
        dataset: &Dataset,
        x_stat: Stat,
        y_stat: Stat,
        colors: &ColorMap,
        legend_limit: usize,
        surface: SurfaceConfig,
    ) -> Self {
        let plotted: Vec<&Record> = dataset
            .records
            .iter()
            .filter(|r| r.has_finite(&[x_stat, y_stat]))
            .collect();
        let scale = |stat: Stat, range: (f64, f64)| {
            let domain = extent(plotted.iter().map(|r| r.stat(stat))).unwrap_or((0.0, 1.0));
            LinearScale::new(domain, range).nice(DEFAULT_TICKS)
        };
        let x = scale(x_stat, surface.x_range());
        let y = scale(y_stat, surface.y_range());

        let points = plotted
            .iter()
            .map(|r| ScatterPoint {
                id: r.id,
                cx: x.apply(r.stat(x_stat)),
                cy: y.apply(r.stat(y_stat)),
                color: colors.color_for(r.category.as_deref()),
            })
            .collect();

        ScatterPlot {
            surface,
            x_stat,
            y_stat,
            x,
            y,
            points,
            legend: colors.legend_entries(legend_limit),
        }
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    #[cfg(test)]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    #[cfg(test)]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn x_stat(&self) -> Stat {
        self.x_stat
    }

    pub fn y_stat(&self) -> Stat {
        self.y_stat
    }

    /// The area a brush may cover.
    pub fn brush_extent(&self) -> BrushRect {
        let s = &self.surface;
        BrushRect {
            x0: s.margin.left,
            y0: s.margin.top,
            x1: s.width - s.margin.right,
            y1: s.height - s.margin.bottom,
        }
    }

    /// Records whose projected position lies inside `rect`, boundary included.
    pub fn select(&self, rect: &BrushRect) -> Selection {
        self.points
            .iter()
            .filter(|p| rect.contains((p.cx, p.cy)))
            .map(|p| p.id)
            .collect()
    }

    /// Data-space bounds of `rect` as `(x_low, x_high)` and `(y_low, y_high)`.
    pub fn brush_bounds(&self, rect: &BrushRect) -> ((f64, f64), (f64, f64)) {
        let xs = (self.x.invert(rect.x0), self.x.invert(rect.x1));
        // pixel y grows downward, so the bottom edge holds the low value
        let ys = (self.y.invert(rect.y1), self.y.invert(rect.y0));
        (xs, ys)
    }

    /// Target opacity of every point for a brush state.
    pub fn target_opacities(&self, selection: Option<&Selection>) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| match selection {
                None => DEFAULT_OPACITY,
                Some(sel) if sel.contains(p.id) => SELECTED_OPACITY,
                Some(_) => UNSELECTED_OPACITY,
            })
            .collect()
    }

    /// Topmost point within `POINT_RADIUS` of `at`.
    pub fn point_at(&self, (px, py): Point) -> Option<&ScatterPoint> {
        self.points
            .iter()
            .rev()
            .find(|p| (p.cx - px).hypot(p.cy - py) <= POINT_RADIUS)
    }

    /// Draw the plot with the given per-point opacities (same order as
    /// [`points`](Self::points)); missing entries use the default.
    pub fn render(&self, opacities: &[f64], brush: Option<BrushRect>) -> Scene {
        let s = &self.surface;
        let mut scene = Scene::new(s.width, s.height);

        for (i, p) in self.points.iter().enumerate() {
            let opacity = opacities.get(i).copied().unwrap_or(DEFAULT_OPACITY);
            scene.push(Element::keyed(
                Shape::Circle {
                    center: (p.cx, p.cy),
                    radius: POINT_RADIUS,
                },
                Style::fill(p.color).with_opacity(opacity),
                p.id,
            ));
        }

        let bottom = s.height - s.margin.bottom;
        scene.extend(Axis::linear(Orient::Bottom, bottom, &self.x, X_TICKS).elements());
        scene.extend(Axis::linear(Orient::Left, s.margin.left, &self.y, DEFAULT_TICKS).elements());
        scene.push(axis::title((s.width / 2.0, s.height - 10.0), self.x_stat.label(), 0.0));
        scene.push(axis::title((15.0, s.height / 2.0), self.y_stat.label(), -90.0));

        let (lx, ly) = (s.width - LEGEND_OFFSET.0, LEGEND_OFFSET.1);
        for (i, (label, color)) in self.legend.iter().enumerate() {
            let row = ly + i as f64 * LEGEND_ROW;
            scene.push(Element::new(
                Shape::Circle {
                    center: (lx, row),
                    radius: 5.0,
                },
                Style::fill(*color),
            ));
            scene.push(Element::new(
                Shape::Text {
                    pos: (lx + 10.0, row),
                    text: label.clone(),
                    size: 10.0,
                    anchor: Anchor::Start,
                    angle: 0.0,
                },
                Style::fill(BLACK),
            ));
        }

        if let Some(rect) = brush {
            scene.push(Element::new(
                Shape::Rect {
                    x: rect.x0,
                    y: rect.y0,
                    width: rect.width(),
                    height: rect.height(),
                },
                Style::fill(GRAY).with_opacity(0.3).with_stroke(WHITE, 1.0),
            ));
        }
        scene
    }
}

// ---------------------------------------------------------------------------
// Interactive state
// ---------------------------------------------------------------------------

/// Brush, selection and point fade of one scatter plot.
#[derive(Debug, Clone)]
pub struct ScatterState {
    pub brush: Brush,
    pub fade: OpacityFade,
    selection: Option<Selection>,
}

impl ScatterState {
    pub fn new(plot: &ScatterPlot) -> Self {
        ScatterState {
            brush: Brush::new(plot.brush_extent()),
            fade: OpacityFade::settled(plot.points().len(), DEFAULT_OPACITY),
            selection: None,
        }
    }

    /// Records inside the brush; `None` when no brush is drawn.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Recompute the selection for the brush's current rectangle, start the
    /// opacity transition and hand the selected records to
    /// `on_selection_change` (empty when the brush was cleared).
    pub fn handle_brush<F>(
        &mut self,
        plot: &ScatterPlot,
        dataset: &Dataset,
        now: f64,
        mut on_selection_change: F,
    ) where
        F: FnMut(&Selection, Vec<&Record>),
    {
        self.selection = self.brush.selection().map(|rect| plot.select(&rect));
        self.fade
            .retarget(plot.target_opacities(self.selection.as_ref()), now);

        let selected = self.selection.clone().unwrap_or_default();
        let records = selected.records(dataset);
        on_selection_change(&selected, records);
    }

    pub fn render(&self, plot: &ScatterPlot, now: f64) -> Scene {
        plot.render(&self.fade.sample(now), self.brush.selection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::model::record;

    fn stats(attack: f64, defense: f64) -> [f64; 6] {
        let mut s = [50.0; 6];
        s[Stat::Attack.index()] = attack;
        s[Stat::Defense.index()] = defense;
        s
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record(0, Some("Fire"), stats(10.0, 20.0)),
            record(1, Some("Water"), stats(50.0, 60.0)),
            record(2, Some("Grass"), stats(90.0, 100.0)),
        ])
    }

    fn plot(ds: &Dataset) -> ScatterPlot {
        ScatterPlot::new(
            ds,
            Stat::Attack,
            Stat::Defense,
            &ColorMap::new(&ds.categories),
            10,
            Config::default().scatter_plot,
        )
    }

    #[test]
    fn scales_cover_surface_ends() {
        let ds = dataset();
        let p = plot(&ds);
        let surface = Config::default().scatter_plot;
        assert_eq!(p.x_scale().domain, (10.0, 90.0));
        assert_eq!(p.y_scale().domain, (20.0, 100.0));
        assert_eq!(p.x_scale().apply(10.0), surface.margin.left);
        assert_eq!(p.x_scale().apply(90.0), surface.width - surface.margin.right);
        assert_eq!(p.y_scale().apply(20.0), surface.height - surface.margin.bottom);
        assert_eq!(p.y_scale().apply(100.0), surface.margin.top);
    }

    #[test]
    fn brush_over_single_point_selects_exactly_it() {
        let ds = dataset();
        let p = plot(&ds);
        let mid = p.points()[1];
        let rect = BrushRect::from_corners((mid.cx, mid.cy), (mid.cx, mid.cy));
        assert_eq!(p.select(&rect).ids(), vec![1]);

        let mut state = ScatterState::new(&p);
        state.brush.press((mid.cx - 1.0, mid.cy - 1.0));
        assert!(state.brush.drag_to((mid.cx + 1.0, mid.cy + 1.0)));

        let mut seen = Vec::new();
        state.handle_brush(&p, &ds, 0.0, |_, records| {
            seen = records.iter().map(|r| r.id).collect();
        });
        assert_eq!(seen, vec![1]);
        assert_eq!(state.fade.targets(), &[0.1, 1.0, 0.1]);
    }

    #[test]
    fn brush_edges_are_inclusive() {
        let ds = dataset();
        let p = plot(&ds);
        let (a, c) = (p.points()[0], p.points()[2]);
        let rect = BrushRect::from_corners((a.cx, a.cy), (c.cx, c.cy));
        assert_eq!(p.select(&rect).ids(), vec![0, 1, 2]);
    }

    #[test]
    fn clearing_brush_reports_empty_and_restores_default_opacity() {
        let ds = dataset();
        let p = plot(&ds);
        let mut state = ScatterState::new(&p);
        let ext = p.brush_extent();
        state.brush.press((ext.x0, ext.y0));
        state.brush.drag_to((ext.x1, ext.y1));
        state.handle_brush(&p, &ds, 0.0, |_, _| {});
        assert_eq!(state.selection().map(Selection::len), Some(3));

        assert!(state.brush.cancel());
        let mut calls = 0;
        let mut last_len = usize::MAX;
        state.handle_brush(&p, &ds, 1.0, |sel, records| {
            calls += 1;
            last_len = sel.len() + records.len();
        });
        assert_eq!(calls, 1);
        assert_eq!(last_len, 0);
        assert_eq!(state.selection(), None);
        assert_eq!(state.fade.sample(2.0), vec![DEFAULT_OPACITY; 3]);
    }

    #[test]
    fn brush_bounds_read_back_data_values() {
        let ds = dataset();
        let p = plot(&ds);
        let (a, c) = (p.points()[0], p.points()[2]);
        let rect = BrushRect::from_corners((a.cx, a.cy), (c.cx, c.cy));
        let ((x0, x1), (y0, y1)) = p.brush_bounds(&rect);
        assert!((x0 - 10.0).abs() < 1e-9 && (x1 - 90.0).abs() < 1e-9);
        assert!((y0 - 20.0).abs() < 1e-9 && (y1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_brush_region_dims_everything() {
        let ds = dataset();
        let p = plot(&ds);
        let empty = p.select(&BrushRect::from_corners((100.0, 100.0), (101.0, 101.0)));
        assert!(empty.is_empty());
        assert_eq!(p.target_opacities(Some(&empty)), vec![UNSELECTED_OPACITY; 3]);
    }

    #[test]
    fn records_missing_a_coordinate_are_dropped() {
        let ds = Dataset::from_records(vec![
            record(0, Some("Fire"), stats(10.0, 20.0)),
            record(1, Some("Fire"), stats(f64::NAN, 500.0)),
            record(2, Some("Fire"), stats(30.0, 40.0)),
        ]);
        let p = plot(&ds);
        assert_eq!(p.points().iter().map(|pt| pt.id).collect::<Vec<_>>(), vec![0, 2]);
        // the NaN row's defense does not stretch the y domain
        assert_eq!(p.y_scale().domain, (20.0, 40.0));
        assert!(p.points().iter().all(|pt| pt.cx.is_finite() && pt.cy.is_finite()));
    }

    #[test]
    fn render_is_idempotent_and_keys_every_point() {
        let ds = dataset();
        let p = plot(&ds);
        let state = ScatterState::new(&p);
        let a = state.render(&p, 5.0);
        assert_eq!(a, state.render(&p, 5.0));
        assert_eq!(a.keyed().count(), 3);
        assert!(a.keyed().all(|e| e.style.opacity == DEFAULT_OPACITY));
    }

    #[test]
    fn hover_picks_point() {
        let ds = dataset();
        let p = plot(&ds);
        let target = p.points()[2];
        assert_eq!(p.point_at((target.cx + 2.0, target.cy)).map(|pt| pt.id), Some(2));
        assert_eq!(p.point_at((0.0, 0.0)), None);
    }
}
