use eframe::egui::{self, Color32, Key, Pos2, Response, Sense, Ui};

use crate::config::SurfaceConfig;
use crate::scene::{Point, Scene};
use crate::state::AppState;
use crate::views::brush::Brush;

use super::canvas::EguiCanvas;

// ---------------------------------------------------------------------------
// Drawing surfaces (central panel)
// ---------------------------------------------------------------------------

/// Stable surface ids, also used as SVG export file names.
pub const BAR_CHART_ID: &str = "bar_chart";
pub const SCATTER_ID: &str = "scatter_plot";
pub const PARALLEL_ID: &str = "parallel_coords";

/// Scroll distance (points) that doubles or halves the zoom.
const SCROLL_PER_DOUBLING: f32 = 200.0;

/// Combined zoom of a pinch and a vertical scroll.
fn zoom_factor(pinch: f32, scroll_y: f32) -> f32 {
    pinch * (scroll_y / SCROLL_PER_DOUBLING).exp2()
}

fn allocate(ui: &mut Ui, surface: &SurfaceConfig, sense: Sense) -> (Response, egui::Painter) {
    let size = egui::vec2(surface.width as f32, surface.height as f32);
    let (response, painter) = ui.allocate_painter(size, sense);
    painter.rect_filled(response.rect, 0.0, Color32::WHITE);
    (response, painter)
}

fn local(origin: Pos2, p: Pos2) -> Point {
    ((p.x - origin.x) as f64, (p.y - origin.y) as f64)
}

fn paint(painter: &egui::Painter, origin: Pos2, scene: &Scene) {
    scene.replay(&mut EguiCanvas::new(painter, origin));
}

/// Bar chart of record counts per type.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let (response, painter) = allocate(ui, &state.config.bar_chart, Sense::hover());
    let Some(views) = &state.views else {
        return;
    };
    let origin = response.rect.min;
    paint(&painter, origin, &views.bar_chart.render());

    let hovered = response
        .hover_pos()
        .and_then(|p| views.bar_chart.bar_at(local(origin, p)))
        .map(|(cat, count)| format!("{cat}: {count}"));
    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}

/// Translate pointer gestures into brush operations. Returns whether the
/// brush selection changed.
fn brush_input(ui: &Ui, response: &Response, brush: &mut Brush) -> bool {
    let origin = response.rect.min;
    let mut changed = false;

    if response.clicked() {
        // press + release without movement: an empty brush, which clears
        if let Some(p) = response.interact_pointer_pos() {
            brush.press(local(origin, p));
            changed |= brush.release();
        }
    }
    if response.drag_started() {
        let press = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(p) = press {
            brush.press(local(origin, p));
        }
    }
    if response.dragged() {
        if let Some(p) = response.interact_pointer_pos() {
            changed |= brush.drag_to(local(origin, p));
        }
    }
    if response.drag_stopped() {
        changed |= brush.release();
    }
    if response.hovered() && ui.input(|i| i.key_pressed(Key::Escape)) {
        changed |= brush.cancel();
    }
    changed
}

/// Brushable scatter plot; brushing re-highlights the parallel coordinates.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState) {
    let (response, painter) = allocate(ui, &state.config.scatter_plot, Sense::click_and_drag());
    let now = ui.input(|i| i.time);

    let changed = match state.scatter.as_mut() {
        Some(scatter) => brush_input(ui, &response, &mut scatter.brush),
        None => false,
    };
    if changed {
        state.brush_changed(now);
    }

    let (Some(views), Some(scatter), Some(dataset)) =
        (&state.views, &state.scatter, &state.dataset)
    else {
        return;
    };
    let origin = response.rect.min;
    paint(&painter, origin, &scatter.render(&views.scatter, now));
    if !scatter.fade.is_settled(now) {
        ui.ctx().request_repaint();
    }

    let plot = &views.scatter;
    let hovered = response
        .hover_pos()
        .filter(|_| !scatter.brush.is_dragging())
        .and_then(|p| plot.point_at(local(origin, p)))
        .and_then(|pt| dataset.get(pt.id))
        .map(|r| {
            format!(
                "{} ({})\n{}: {}  {}: {}",
                r.display_name(),
                r.category.as_deref().unwrap_or("?"),
                plot.x_stat(),
                r.stat(plot.x_stat()),
                plot.y_stat(),
                r.stat(plot.y_stat()),
            )
        });
    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}

/// Parallel coordinates: drag pans, scroll or pinch zooms, double-click resets.
pub fn parallel_coords(ui: &mut Ui, state: &mut AppState) {
    let (response, painter) = allocate(ui, &state.config.parallel_coords, Sense::click_and_drag());
    let origin = response.rect.min;
    let parallel = &mut state.parallel;

    if response.double_clicked() {
        parallel.reset_zoom();
    } else if response.dragged() {
        let d = response.drag_delta();
        parallel.transform = parallel.transform.translate_by(d.x as f64, d.y as f64);
    }
    if let Some(p) = response.hover_pos() {
        // Taken here so the enclosing scroll area does not also move.
        let (zoom, scroll) = ui.ctx().input_mut(|i| {
            let scroll = std::mem::take(&mut i.smooth_scroll_delta).y;
            (i.zoom_delta(), scroll)
        });
        let factor = zoom_factor(zoom, scroll);
        if factor != 1.0 {
            parallel.transform = parallel
                .transform
                .scale_about(local(origin, p), factor as f64);
        }
    }

    let Some(views) = &state.views else {
        return;
    };
    paint(&painter, origin, &state.parallel.render(&views.parallel));
}

/// Scenes of all three surfaces, for export.
pub fn current_scenes(state: &AppState, now: f64) -> Option<Vec<(&'static str, Scene)>> {
    let views = state.views.as_ref()?;
    let scatter = state.scatter.as_ref()?;
    Some(vec![
        (BAR_CHART_ID, views.bar_chart.render()),
        (SCATTER_ID, scatter.render(&views.scatter, now)),
        (PARALLEL_ID, state.parallel.render(&views.parallel)),
    ])
}
