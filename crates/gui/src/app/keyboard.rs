//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::camera::Direction;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let mut toggle_fullscreen = false;
    let mut open_model = false;

    ctx.input(|i| {
        // Ctrl+O — open model
        if i.modifiers.command && i.key_pressed(egui::Key::O) {
            open_model = true;
        }
        // Arrows — nudge the camera one unit
        if i.key_pressed(egui::Key::ArrowUp) {
            viewport.translate(Direction::Up, toolbar::NUDGE_STEP);
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            viewport.translate(Direction::Down, toolbar::NUDGE_STEP);
        }
        if i.key_pressed(egui::Key::ArrowLeft) {
            viewport.translate(Direction::Left, toolbar::NUDGE_STEP);
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            viewport.translate(Direction::Right, toolbar::NUDGE_STEP);
        }
        // +/- — dolly
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            viewport.dolly_in(toolbar::DOLLY_FACTOR);
        }
        if i.key_pressed(egui::Key::Minus) {
            viewport.dolly_out(toolbar::DOLLY_FACTOR);
        }
        // R — reset camera
        if i.key_pressed(egui::Key::R) && !i.modifiers.command {
            viewport.reset_camera();
        }
        // G — toggle grid
        if i.key_pressed(egui::Key::G) && !i.modifiers.command {
            state.view.toggle_grid();
        }
        // F — focus camera on the displayed model
        if i.key_pressed(egui::Key::F) && !i.modifiers.command {
            if let Some(model) = state.scene.current() {
                viewport.focus_on(model.center);
            }
        }
        // F11 — fullscreen; Escape leaves fullscreen
        if i.key_pressed(egui::Key::F11) {
            toggle_fullscreen = true;
        }
        if i.key_pressed(egui::Key::Escape) && state.view.is_fullscreen_presented() {
            toggle_fullscreen = true;
        }
    });

    // Handled outside the input closure: the file dialog blocks, and the
    // viewport command needs the context, which `ctx.input` holds locked.
    if open_model {
        toolbar::open_model_dialog(state);
    }
    if toggle_fullscreen {
        toolbar::request_fullscreen_toggle(ctx, state);
    }
}
