//! Toolbar: model upload, view toggles, camera controls.

use egui::Ui;

use crate::state::AppState;
use crate::viewport::camera::Direction;
use crate::viewport::ViewportPanel;

/// Multiplicative step for the zoom buttons.
pub const DOLLY_FACTOR: f32 = 1.2;
/// World units for one directional nudge; does not scale with zoom.
pub const NUDGE_STEP: f32 = 1.0;

pub fn show(ui: &mut Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.horizontal(|ui| {
        if ui.button("Open model…").clicked() {
            open_model_dialog(state);
        }

        if let Some(name) = &state.view.file_name {
            ui.label(format!("Current file: {name}"));
        }
        if state.ingest.has_pending() {
            ui.spinner();
        }

        ui.separator();

        if ui
            .selectable_label(state.view.grid_visible, "Grid")
            .on_hover_text("Toggle grid")
            .clicked()
        {
            state.view.toggle_grid();
        }

        let fullscreen_label = if state.view.is_fullscreen_presented() {
            "Exit fullscreen"
        } else {
            "Fullscreen"
        };
        if ui
            .selectable_label(state.view.is_fullscreen_presented(), fullscreen_label)
            .on_hover_text("Toggle fullscreen")
            .clicked()
        {
            request_fullscreen_toggle(ui.ctx(), state);
        }

        ui.separator();

        // Camera controls; all no-ops until the viewport has mounted.
        if ui.button("Reset").on_hover_text("Reset camera").clicked() {
            viewport.reset_camera();
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            viewport.dolly_in(DOLLY_FACTOR);
        }
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            viewport.dolly_out(DOLLY_FACTOR);
        }
        if ui.button("↑").on_hover_text("Move up").clicked() {
            viewport.translate(Direction::Up, NUDGE_STEP);
        }
        if ui.button("↓").on_hover_text("Move down").clicked() {
            viewport.translate(Direction::Down, NUDGE_STEP);
        }
        if ui.button("←").on_hover_text("Move left").clicked() {
            viewport.translate(Direction::Left, NUDGE_STEP);
        }
        if ui.button("→").on_hover_text("Move right").clicked() {
            viewport.translate(Direction::Right, NUDGE_STEP);
        }
    });
}

/// Pick a model file and start ingesting it.
pub fn open_model_dialog(state: &mut AppState) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title("Open model")
        .add_filter("3D models", &["stl", "obj"])
        .pick_file()
    {
        state.open_model(path);
    }
}

/// Ask the view state for a fullscreen transition and forward it to the
/// host. The mode flag settles only once the host confirms.
pub fn request_fullscreen_toggle(ctx: &egui::Context, state: &mut AppState) {
    if let Some(target) = state.view.request_fullscreen_toggle() {
        tracing::info!("Requesting fullscreen = {target}");
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(target));
    }
}
