//! Headless test harness for the viewer.
//!
//! Drives the same state types the GUI uses (scene slot, view state,
//! generation tracking, camera) without a window or GL context. Ingest
//! completions are fed in by hand, so tests control completion order
//! deterministically.

use std::sync::Arc;

use glam::Vec3;

use crate::state::{AppState, IngestCompletion, SceneObject, StatusMessage};
use crate::viewport::camera::{CameraController, CameraState, Direction, OrbitCamera};

/// Headless viewer: application state plus an optionally-attached camera.
pub struct ViewerHarness {
    pub state: AppState,
    camera: Option<OrbitCamera>,
}

impl ViewerHarness {
    /// A harness with no viewport mounted: the camera handle is absent and
    /// every camera operation is a no-op.
    pub fn new() -> Self {
        Self {
            state: AppState::headless(),
            camera: None,
        }
    }

    /// Simulate the viewport mounting: attaches the camera and captures its
    /// home pose.
    pub fn mount_viewport(&mut self) {
        self.camera = Some(OrbitCamera::new());
    }

    // ── Ingest simulation ─────────────────────────────────────

    /// Simulate picking a file: records the filename label and stamps a
    /// request generation, without reading anything.
    pub fn select_file(&mut self, file_name: &str) -> u64 {
        self.state.view.record_filename(file_name);
        let generation = self.state.ingest.issue_generation();
        tracing::debug!("harness: ingest #{generation} selected {file_name}");
        generation
    }

    /// Simulate the ingest for `generation` finishing with `bytes`.
    /// Returns true when the completion was applied (not stale).
    pub fn complete(&mut self, generation: u64, file_name: &str, bytes: &[u8]) -> bool {
        let outcome = shared::parse_named(file_name, bytes).map_err(Into::into);
        self.state.apply_ingest_completion(IngestCompletion {
            generation,
            file_name: file_name.to_string(),
            outcome,
        })
    }

    /// Select and immediately complete a single ingest.
    pub fn load(&mut self, file_name: &str, bytes: &[u8]) -> bool {
        let generation = self.select_file(file_name);
        self.complete(generation, file_name, bytes)
    }

    // ── Camera operations (no-ops while unmounted) ────────────

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

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if let Some(camera) = &mut self.camera {
            camera.rotate(dx, dy);
        }
    }

    pub fn focus_on(&mut self, target: Vec3) {
        if let Some(camera) = &mut self.camera {
            camera.focus_on(target);
        }
    }

    pub fn camera_state(&self) -> Option<CameraState> {
        self.camera.as_ref().map(|c| c.current_state())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn current_model(&self) -> Option<&Arc<SceneObject>> {
        self.state.scene.current()
    }

    /// Filename shown in the label (set at selection time).
    pub fn label_file(&self) -> Option<&str> {
        self.state.view.file_name.as_deref()
    }

    /// Filename of the model actually displayed.
    pub fn displayed_file(&self) -> Option<&str> {
        self.current_model().map(|m| m.file_name.as_str())
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.state.status.as_ref()
    }
}

impl Default for ViewerHarness {
    fn default() -> Self {
        Self::new()
    }
}
