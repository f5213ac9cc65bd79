//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
pub use meshview_gui_lib::viewport::{camera, mesh};

use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::Vec3;

use crate::state::{AppState, SceneObject};
use camera::{CameraController, CameraState, Direction, OrbitCamera};
use gl_renderer::{GlRenderer, RenderParams};

/// 3D viewport panel.
///
/// Owns the camera handle: the camera is attached (and its home pose
/// captured) when the viewport mounts via [`ViewportPanel::init_gl`].
/// Every programmatic camera operation before that point is a documented
/// no-op, never an error.
pub struct ViewportPanel {
    camera: Option<OrbitCamera>,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: None,
            gl_renderer: None,
        }
    }

    /// Mount the viewport: compile shaders and attach the camera
    /// (must be called with a GL context).
    pub fn init_gl(&mut self, gl: &glow::Context) {
        self.gl_renderer = Some(Arc::new(Mutex::new(GlRenderer::new(gl))));
        self.camera = Some(OrbitCamera::new());
    }

    // ── Programmatic camera surface ──────────────────────────

    pub fn reset_camera(&mut self) {
        if let Some(camera) = &mut self.camera {
            camera.reset();
        }
    }

    pub fn dolly_in(&mut self, factor: f32) {
        if let Some(camera) = &mut self.camera {
            camera.dolly_in(factor);
        }
    }

    pub fn dolly_out(&mut self, factor: f32) {
        if let Some(camera) = &mut self.camera {
            camera.dolly_out(factor);
        }
    }

    pub fn translate(&mut self, direction: Direction, step: f32) {
        if let Some(camera) = &mut self.camera {
            camera.translate(direction, step);
        }
    }

    /// Aim the camera at a point (keyboard focus shortcut).
    pub fn focus_on(&mut self, target: Vec3) {
        if let Some(camera) = &mut self.camera {
            camera.focus_on(target);
        }
    }

    pub fn camera_state(&self) -> Option<CameraState> {
        self.camera.as_ref().map(|c| c.current_state())
    }

    // ── Frame ────────────────────────────────────────────────

    pub fn show(&mut self, ui: &mut Ui, state: &AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if let Some(camera) = &mut self.camera {
            // Orbit on left drag, pan on right drag.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                camera.rotate(delta.x * 0.5, delta.y * 0.5);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                camera.pan(delta.x * 0.01, delta.y * 0.01);
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    camera.zoom(scroll * 0.01);
                }
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
        self.draw_overlays(ui, rect, state);
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let (Some(gl_renderer), Some(camera)) = (&self.gl_renderer, &self.camera) else {
            paint_fallback(ui, rect, state);
            return;
        };

        let renderer = gl_renderer.clone();
        let camera = camera.clone();
        // One whole-object snapshot per frame: the callback sees either the
        // old or the new model, never a mixture.
        let model: Option<Arc<SceneObject>> = state.scene.current().cloned();
        let scene_version = state.scene.version();

        let grid_settings = state.settings.grid.clone();
        let axes_settings = state.settings.axes.clone();
        let params_template = RenderParams {
            viewport: [0.0; 4],
            grid_visible: state.view.grid_visible,
            axes_visible: state.settings.axes.visible,
            axes_thickness: state.settings.axes.thickness,
            bg_color: state.settings.viewport.background_color,
        };

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    r.update_grid(gl, &grid_settings);
                    r.update_axes(gl, &axes_settings);
                    r.sync_model(gl, model.as_deref(), scene_version);

                    let params = RenderParams {
                        viewport,
                        ..params_template
                    };
                    r.paint(gl, &camera, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        if let Some(camera) = &self.camera {
            draw_camera_info(&painter, rect, camera);
        }

        if state.scene.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "Open an STL or OBJ file to view it. Drag to orbit, right-drag to pan, scroll to zoom.",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_camera_info(painter: &egui::Painter, rect: egui::Rect, camera: &OrbitCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
        egui::vec2(136.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
            camera.distance,
            camera.yaw.to_degrees(),
            camera.pitch.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        egui::Color32::from_rgb(160, 160, 170),
    );
}

/// Software fallback when no GL context exists: background and hint only.
fn paint_fallback(ui: &Ui, rect: egui::Rect, state: &AppState) {
    let painter = ui.painter_at(rect);
    let bg = state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(bg[0], bg[1], bg[2]));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Hardware rendering unavailable",
        egui::FontId::proportional(12.0),
        egui::Color32::from_rgb(140, 140, 150),
    );
}
