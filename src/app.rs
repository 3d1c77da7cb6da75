use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PokeLensApp {
    pub state: AppState,
}

impl PokeLensApp {
    /// Builds the state and loads the configured data file once.
    pub fn new(config: Config) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load_path(&path);
        Self { state }
    }
}

impl eframe::App for PokeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the three linked surfaces, scrollable ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.views.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a stats file to begin  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::both()
                .drag_to_scroll(false)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.push_id(views::BAR_CHART_ID, |ui| views::bar_chart(ui, &self.state));
                        ui.push_id(views::SCATTER_ID, |ui| {
                            views::scatter_plot(ui, &mut self.state)
                        });
                    });
                    ui.add_space(8.0);
                    ui.push_id(views::PARALLEL_ID, |ui| {
                        views::parallel_coords(ui, &mut self.state)
                    });
                });
        });
    }
}
