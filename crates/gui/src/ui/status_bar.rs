use egui::Ui;

use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        match state.scene.current() {
            Some(model) => ui.weak(format!(
                "Meshes: {}   Triangles: {}",
                model.mesh_count(),
                model.triangle_count()
            )),
            None => ui.weak("No model loaded"),
        };

        ui.separator();

        if let Some(status) = &state.status {
            if status.is_error {
                ui.colored_label(egui::Color32::from_rgb(255, 120, 100), status.text.as_str());
            } else {
                ui.weak(status.text.as_str());
            }
        } else {
            ui.weak("Ready");
        }

        if state.ingest.has_pending() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(255, 200, 100), "Loading…");
        }
    });
}
