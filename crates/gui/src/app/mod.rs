//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::state::{AppState, FullscreenEvent};
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ViewerApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_model: Option<PathBuf>) -> Self {
        let mut state = AppState::new();

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new();

        // Mount the viewport if a glow context is available; this is also
        // where the camera attaches and captures its home pose.
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        if let Some(path) = initial_model {
            state.open_model(path);
        }

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Persist settings if changed
        if self.state.settings_dirty {
            self.state.settings.save();
            self.state.settings_dirty = false;
        }

        // Fold the host-reported fullscreen state into the view machine.
        // The mode flag only ever settles from what the host reports.
        let observed = ctx.input(|i| i.viewport().fullscreen);
        if let Some(event) = self.state.view.reconcile_fullscreen(observed) {
            match event {
                FullscreenEvent::Confirmed(on) => {
                    tracing::debug!("Fullscreen {}", if on { "entered" } else { "left" });
                }
                FullscreenEvent::Denied => {
                    self.state
                        .set_status("Fullscreen is not available".to_string(), true);
                }
            }
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // Apply finished file ingests; keep the loop ticking while reads
        // are in flight so completions land promptly.
        self.state.poll_ingest();
        if self.state.ingest.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state, &mut self.viewport);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &self.state);
            });
    }
}
