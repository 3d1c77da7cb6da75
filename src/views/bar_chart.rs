use std::collections::HashMap;

use crate::axis::{self, Axis, Orient};
use crate::color::STEELBLUE;
use crate::config::SurfaceConfig;
use crate::data::model::Dataset;
use crate::scale::{BandScale, LinearScale, DEFAULT_TICKS};
use crate::scene::{Element, Point, Scene, Shape, Style};

const BAND_PADDING: f64 = 0.1;
const LABEL_ANGLE: f64 = -40.0;

/// Record counts per category.
#[derive(Debug, Clone)]
pub struct BarChart {
    surface: SurfaceConfig,
    /// (category, count) in first-seen order.
    bars: Vec<(String, usize)>,
    x: BandScale,
    y: LinearScale,
}

impl BarChart {
    pub fn new(dataset: &Dataset, surface: SurfaceConfig) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cat in dataset.records.iter().filter_map(|r| r.category.as_deref()) {
            *counts.entry(cat).or_default() += 1;
        }
        let bars: Vec<(String, usize)> = dataset
            .categories_in_order
            .iter()
            .map(|cat| (cat.clone(), counts.get(cat.as_str()).copied().unwrap_or(0)))
            .collect();

        let max = bars.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
        let x = BandScale::new(
            bars.iter().map(|(c, _)| c.clone()).collect(),
            surface.x_range(),
            BAND_PADDING,
        );
        let y = LinearScale::new((0.0, max), surface.y_range()).nice(DEFAULT_TICKS);

        BarChart { surface, bars, x, y }
    }

    #[cfg(test)]
    pub fn bars(&self) -> &[(String, usize)] {
        &self.bars
    }

    #[cfg(test)]
    pub fn x_scale(&self) -> &BandScale {
        &self.x
    }

    #[cfg(test)]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    fn bar_rect(&self, category: &str, count: usize) -> Option<Shape> {
        let x = self.x.position(category)?;
        let y = self.y.apply(count as f64);
        Some(Shape::Rect {
            x,
            y,
            width: self.x.bandwidth(),
            height: (self.surface.height - self.surface.margin.bottom) - y,
        })
    }

    /// The bar under a surface point, if any.
    pub fn bar_at(&self, (px, py): Point) -> Option<&(String, usize)> {
        self.bars.iter().find(|(cat, count)| {
            matches!(
                self.bar_rect(cat, *count),
                Some(Shape::Rect { x, y, width, height })
                    if px >= x && px <= x + width && py >= y && py <= y + height
            )
        })
    }

    pub fn render(&self) -> Scene {
        let s = &self.surface;
        let mut scene = Scene::new(s.width, s.height);
        if self.bars.is_empty() {
            return scene;
        }

        for (cat, count) in &self.bars {
            if let Some(rect) = self.bar_rect(cat, *count) {
                scene.push(Element::new(rect, Style::fill(STEELBLUE)));
            }
        }

        let bottom = s.height - s.margin.bottom;
        scene.extend(
            Axis::band(Orient::Bottom, bottom, &self.x)
                .rotate_labels(LABEL_ANGLE)
                .elements(),
        );
        scene.extend(Axis::linear(Orient::Left, s.margin.left, &self.y, DEFAULT_TICKS).elements());
        scene.push(axis::title((s.width / 2.0, s.height - 10.0), "Type 1", 0.0));
        scene.push(axis::title((15.0, s.height / 2.0), "Count", -90.0));
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::model::record;

    fn dataset(types: &[Option<&str>]) -> Dataset {
        Dataset::from_records(
            types
                .iter()
                .enumerate()
                .map(|(i, t)| record(i, *t, [1.0; 6]))
                .collect(),
        )
    }

    fn rects(scene: &Scene) -> Vec<(f64, f64, f64, f64)> {
        scene
            .elements
            .iter()
            .filter_map(|e| match e.shape {
                Shape::Rect { x, y, width, height } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_bar_per_category_and_counts_sum_to_total() {
        let ds = dataset(&[Some("Water"), Some("Fire"), Some("Water"), Some("Grass"), Some("Water")]);
        let chart = BarChart::new(&ds, Config::default().bar_chart);

        assert_eq!(
            chart.bars(),
            &[("Water".to_string(), 3), ("Fire".to_string(), 1), ("Grass".to_string(), 1)]
        );
        let total: usize = chart.bars().iter().map(|(_, n)| n).sum();
        assert_eq!(total, ds.len());
        assert_eq!(rects(&chart.render()).len(), 3);
    }

    #[test]
    fn bar_heights_follow_inverted_count_scale() {
        let ds = dataset(&[Some("A"), Some("A"), Some("B")]);
        let surface = Config::default().bar_chart;
        let chart = BarChart::new(&ds, surface);
        let y = chart.y_scale();
        assert_eq!(y.domain, (0.0, 2.0));
        assert_eq!(y.apply(0.0), surface.height - surface.margin.bottom);
        assert_eq!(y.apply(2.0), surface.margin.top);

        let r = rects(&chart.render());
        // the tallest bar reaches the top margin and ends on the baseline
        assert_eq!(r[0].1, surface.margin.top);
        assert_eq!(r[0].1 + r[0].3, surface.height - surface.margin.bottom);
        assert!(r[1].3 < r[0].3);
    }

    #[test]
    fn missing_categories_are_not_counted() {
        let ds = dataset(&[Some("A"), None, Some("A")]);
        let chart = BarChart::new(&ds, Config::default().bar_chart);
        assert_eq!(chart.bars(), &[("A".to_string(), 2)]);
    }

    #[test]
    fn empty_dataset_draws_nothing() {
        let chart = BarChart::new(&Dataset::default(), Config::default().bar_chart);
        assert!(chart.render().elements.is_empty());
        assert_eq!(chart.bar_at((100.0, 100.0)), None);
    }

    #[test]
    fn hover_finds_bar() {
        let ds = dataset(&[Some("A"), Some("B")]);
        let chart = BarChart::new(&ds, Config::default().bar_chart);
        let x = chart.x_scale().position("B").unwrap() + 1.0;
        assert_eq!(chart.bar_at((x, 300.0)).map(|b| b.0.as_str()), Some("B"));
        assert_eq!(chart.bar_at((x, 5.0)), None);
    }

    #[test]
    fn render_is_idempotent() {
        let ds = dataset(&[Some("A"), Some("B"), Some("B")]);
        let chart = BarChart::new(&ds, Config::default().bar_chart);
        assert_eq!(chart.render(), chart.render());
    }
}
