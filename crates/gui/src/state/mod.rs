pub mod ingest;
pub mod scene;
pub mod settings;
pub mod view;

use std::path::PathBuf;

pub use ingest::{GenerationTracker, IngestCompletion, IngestError, Ingestor};
pub use scene::{Material, SceneObject, SceneSlot};
pub use settings::AppSettings;
pub use view::{FullscreenEvent, FullscreenState, ViewState};

/// One-line message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Combined application state
pub struct AppState {
    /// Single slot holding the currently displayed model.
    pub scene: SceneSlot,
    /// Presentational toggles (grid, fullscreen, filename label).
    pub view: ViewState,
    pub settings: AppSettings,
    pub ingest: Ingestor,
    pub status: Option<StatusMessage>,
    /// Set when settings changed and should be persisted.
    pub settings_dirty: bool,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    /// State with default settings and no disk access; used by the harness.
    pub fn headless() -> Self {
        Self::with_settings(AppSettings::default())
    }

    fn with_settings(settings: AppSettings) -> Self {
        Self {
            scene: SceneSlot::new(),
            view: ViewState::new(),
            settings,
            ingest: Ingestor::new(),
            status: None,
            settings_dirty: false,
            show_settings_window: false,
        }
    }

    /// Start loading a model file. The filename label updates immediately;
    /// the read and parse run off the UI thread and land via [`poll_ingest`].
    ///
    /// [`poll_ingest`]: AppState::poll_ingest
    pub fn open_model(&mut self, path: PathBuf) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.view.record_filename(&file_name);
        self.set_status(format!("Loading {file_name}…"), false);

        let generation = self.ingest.begin(path);
        tracing::info!("Ingest #{generation} started for {file_name}");
    }

    /// Drain finished ingests and apply the ones that are still current.
    /// Returns true when anything user-visible changed.
    pub fn poll_ingest(&mut self) -> bool {
        let mut changed = false;
        for completion in self.ingest.poll() {
            changed |= self.apply_ingest_completion(completion);
        }
        changed
    }

    /// Apply one finished ingest. Stale completions (anything older than a
    /// completion that already landed) are discarded, so the displayed
    /// model always matches the most recently initiated request.
    pub fn apply_ingest_completion(&mut self, completion: IngestCompletion) -> bool {
        let IngestCompletion {
            generation,
            file_name,
            outcome,
        } = completion;

        if !self.ingest.try_accept(generation) {
            tracing::debug!("Ingest #{generation} ({file_name}) superseded, discarding result");
            return false;
        }

        match outcome {
            Ok(geometry) => {
                let object = SceneObject::from_geometry(&geometry, &file_name, Material::default());
                tracing::info!(
                    "Ingest #{generation} done: {file_name} ({}, {} meshes, {} triangles)",
                    geometry.format.name(),
                    object.mesh_count(),
                    object.triangle_count()
                );
                self.set_status(
                    format!(
                        "Loaded {file_name}: {} triangles",
                        object.triangle_count()
                    ),
                    false,
                );
                self.scene.replace(object);
            }
            Err(error) => {
                // The previously displayed model stays untouched.
                tracing::warn!("Ingest #{generation} failed for {file_name}: {error}");
                self.set_status(format!("Could not load {file_name}: {error}"), true);
            }
        }
        true
    }

    pub fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
