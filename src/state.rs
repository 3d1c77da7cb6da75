use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::views::bar_chart::BarChart;
use crate::views::parallel::{ParallelCoords, ParallelState};
use crate::views::scatter::{ScatterPlot, ScatterState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Views built for one dataset.
pub struct Views {
    pub bar_chart: BarChart,
    pub scatter: ScatterPlot,
    pub parallel: ParallelCoords,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Arc<Dataset>>,

    /// Built once per dataset.
    pub views: Option<Views>,

    pub scatter: Option<ScatterState>,
    pub parallel: ParallelState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dataset: None,
            views: None,
            scatter: None,
            parallel: ParallelState::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and rebuild every view.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dataset = Arc::new(dataset);
        let cfg = &self.config;
        let colors = ColorMap::new(&dataset.categories);

        let views = Views {
            bar_chart: BarChart::new(&dataset, cfg.bar_chart),
            scatter: ScatterPlot::new(
                &dataset,
                cfg.scatter_x,
                cfg.scatter_y,
                &colors,
                cfg.legend_limit,
                cfg.scatter_plot,
            ),
            parallel: ParallelCoords::new(&dataset, &cfg.dimensions, cfg.parallel_coords),
        };

        self.scatter = Some(ScatterState::new(&views.scatter));
        self.parallel = ParallelState::default();
        self.views = Some(views);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a file. On failure nothing is drawn and the error is shown.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                info!(
                    "Loaded {} records with {} types from {}",
                    dataset.len(),
                    dataset.categories.len(),
                    path.display()
                );
                let empty = dataset.is_empty();
                self.set_dataset(dataset);
                if empty {
                    warn!("{} holds no records", path.display());
                    self.status_message = Some(format!("{} holds no records", path.display()));
                }
            }
            Err(e) => {
                error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.views = None;
                self.scatter = None;
                self.parallel = ParallelState::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// The scatter brush moved, was released or was cleared: recompute the
    /// selection and re-highlight the parallel-coordinates view with it.
    pub fn brush_changed(&mut self, now: f64) {
        let (Some(dataset), Some(views), Some(scatter)) =
            (&self.dataset, &self.views, &mut self.scatter)
        else {
            return;
        };
        let parallel = &mut self.parallel;
        scatter.handle_brush(&views.scatter, dataset, now, |selection, records| {
            log::debug!("brush selected {} records", records.len());
            parallel.highlighted = selection.clone();
        });
    }

    /// Drop the brush, as if the user cleared it.
    pub fn clear_brush(&mut self, now: f64) {
        let cleared = self
            .scatter
            .as_mut()
            .is_some_and(|s| s.brush.cancel());
        if cleared {
            self.brush_changed(now);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.parallel.highlighted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, Stat};
    use crate::scene::Transform;
    use std::io::Write;

    fn dataset() -> Dataset {
        let stats = |a: f64, d: f64| {
            let mut s = [50.0; 6];
            s[Stat::Attack.index()] = a;
            s[Stat::Defense.index()] = d;
            s
        };
        Dataset::from_records(vec![
            record(0, Some("Fire"), stats(10.0, 20.0)),
            record(1, Some("Water"), stats(50.0, 60.0)),
            record(2, Some("Grass"), stats(90.0, 100.0)),
        ])
    }

    #[test]
    fn brushing_scatter_highlights_parallel_coords() {
        let mut state = AppState::new(Config::default());
        state.set_dataset(dataset());

        let mid = state.views.as_ref().unwrap().scatter.points()[1];
        let scatter = state.scatter.as_mut().unwrap();
        scatter.brush.press((mid.cx - 2.0, mid.cy - 2.0));
        scatter.brush.drag_to((mid.cx + 2.0, mid.cy + 2.0));
        state.brush_changed(0.0);

        assert_eq!(state.parallel.highlighted.ids(), vec![1]);
        assert_eq!(state.selected_count(), 1);

        state.clear_brush(1.0);
        assert!(state.parallel.highlighted.is_empty());
    }

    #[test]
    fn zoom_survives_highlight_changes_but_not_reload() {
        let mut state = AppState::new(Config::default());
        state.set_dataset(dataset());
        state.parallel.transform = Transform::IDENTITY.translate_by(30.0, 0.0);

        let scatter = state.scatter.as_mut().unwrap();
        let ext = scatter.brush.extent();
        scatter.brush.press((ext.x0, ext.y0));
        scatter.brush.drag_to((ext.x1, ext.y1));
        state.brush_changed(0.0);
        assert_eq!(state.parallel.highlighted.len(), 3);
        assert_eq!(state.parallel.transform.x, 30.0);

        state.set_dataset(dataset());
        assert!(state.parallel.transform.is_identity());
        assert!(state.parallel.highlighted.is_empty());
    }

    #[test]
    fn failed_load_draws_nothing() {
        let mut state = AppState::new(Config::default());
        state.set_dataset(dataset());
        state.load_path(Path::new("/no/such/file.csv"));
        assert!(state.views.is_none());
        assert!(state.dataset.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error")));
    }

    #[test]
    fn load_path_builds_views() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Name,Type_1,HP,Attack,Defense,Sp_Atk,Sp_Def,Speed").unwrap();
        writeln!(file, "Pikachu,Electric,35,55,40,50,50,90").unwrap();
        writeln!(file, "Onix,Rock,35,45,160,30,45,70").unwrap();

        let mut state = AppState::new(Config::default());
        state.load_path(file.path());
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.bar_chart.bars().len(), 2);
        assert_eq!(views.scatter.points().len(), 2);
        assert_eq!(views.parallel.drawn_ids(), vec![0, 1]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn header_only_file_loads_with_notice() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Name,Type_1,HP,Attack,Defense,Sp_Atk,Sp_Def,Speed").unwrap();

        let mut state = AppState::new(Config::default());
        state.load_path(file.path());
        assert!(state.views.is_some());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.ends_with("holds no records")));
    }
}
