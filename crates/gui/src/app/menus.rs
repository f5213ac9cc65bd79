//! Application menu bar and settings window

use eframe::egui;

use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("Open model…").clicked() {
            ui.close_menu();
            toolbar::open_model_dialog(state);
        }
        if ui
            .add_enabled(!state.scene.is_empty(), egui::Button::new("Close model"))
            .clicked()
        {
            state.scene.clear();
            state.set_status("Model closed".to_string(), false);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            std::process::exit(0);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.checkbox(&mut state.view.grid_visible, "Grid").clicked() {
            ui.close_menu();
        }
        if ui
            .checkbox(&mut state.settings.axes.visible, "Axes")
            .clicked()
        {
            state.settings_dirty = true;
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Reset camera").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        let fullscreen_label = if state.view.is_fullscreen_presented() {
            "Exit fullscreen"
        } else {
            "Fullscreen"
        };
        if ui.button(fullscreen_label).clicked() {
            ui.close_menu();
            toolbar::request_fullscreen_toggle(ui.ctx(), state);
        }
        ui.separator();
        if ui.button("Settings…").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window (if open)
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_settings_window {
        return;
    }

    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Viewport");
            ui.horizontal(|ui| {
                ui.label("Background");
                if ui
                    .color_edit_button_srgb(&mut state.settings.viewport.background_color)
                    .changed()
                {
                    state.settings_dirty = true;
                }
            });

            ui.separator();
            ui.heading("Grid");
            if ui
                .add(
                    egui::Slider::new(&mut state.settings.grid.opacity, 0.1..=1.0)
                        .text("Opacity"),
                )
                .changed()
            {
                state.settings_dirty = true;
            }

            ui.separator();
            ui.heading("Interface");
            if ui
                .add(
                    egui::Slider::new(&mut state.settings.ui.font_size, 10.0..=22.0)
                        .text("Font size"),
                )
                .changed()
            {
                state.settings_dirty = true;
            }
        });
    state.show_settings_window = open;
}
