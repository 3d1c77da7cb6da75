use eframe::egui::{self, Color32, RichText, Ui};

use crate::export;
use crate::scale::format_tick;
use crate::scene::Scene;
use crate::state::AppState;

use super::views::current_scenes;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let now = ui.input(|i| i.time);
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.views.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export SVG…"))
                .clicked()
            {
                export_dialog(state, now);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} selected",
                ds.len(),
                state.selected_count()
            ));
        }

        ui.separator();

        let brushed = state
            .scatter
            .as_ref()
            .is_some_and(|s| s.brush.selection().is_some());
        if ui
            .add_enabled(brushed, egui::Button::new("Clear brush"))
            .clicked()
        {
            state.clear_brush(now);
        }
        if let Some(text) = brush_bounds_label(state) {
            ui.label(text);
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

/// "Attack 40–80, Defense 20–60" for the current brush, if any.
fn brush_bounds_label(state: &AppState) -> Option<String> {
    let plot = &state.views.as_ref()?.scatter;
    let rect = state.scatter.as_ref()?.brush.selection()?;
    let ((x0, x1), (y0, y1)) = plot.brush_bounds(&rect);
    Some(format!(
        "{} {}–{}, {} {}–{}",
        plot.x_stat(),
        format_tick(x0.round()),
        format_tick(x1.round()),
        plot.y_stat(),
        format_tick(y0.round()),
        format_tick(y1.round()),
    ))
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Pokémon stats")
        .add_filter("Delimited text", &["csv", "tsv", "tab", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState, now: f64) {
    let Some(scenes) = current_scenes(state, now) else {
        return;
    };
    let Some(dir) = rfd::FileDialog::new()
        .set_title("Export charts as SVG")
        .pick_folder()
    else {
        return;
    };

    let refs: Vec<(&str, &Scene)> = scenes.iter().map(|(id, s)| (*id, s)).collect();
    match export::write_all(&dir, &refs) {
        Ok(paths) => {
            state.status_message = Some(format!("Exported {} charts to {}", paths.len(), dir.display()));
        }
        Err(e) => {
            log::error!("SVG export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
