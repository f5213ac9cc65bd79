//! Presentational view state: grid toggle, fullscreen mode, filename label.

/// Frames a fullscreen transition may stay unconfirmed before it counts as
/// denied by the host.
const PENDING_FRAME_LIMIT: u32 = 120;

/// Fullscreen mode as a small state machine.
///
/// The flag never moves to a settled state optimistically: `Entering` and
/// `Leaving` wait for the host to report the change. The host is also
/// allowed to flip the mode on its own (user presses Escape, window manager
/// intervenes); reconciliation folds that back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenState {
    Windowed,
    /// Request issued, waiting for the host to confirm entry.
    Entering,
    Fullscreen,
    /// Request issued, waiting for the host to confirm exit.
    Leaving,
}

/// What a reconciliation step decided, for user-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenEvent {
    Confirmed(bool),
    Denied,
}

pub struct ViewState {
    pub grid_visible: bool,
    fullscreen: FullscreenState,
    pending_frames: u32,
    /// Name of the last selected file, set at selection time regardless of
    /// whether the parse later succeeds.
    pub file_name: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            grid_visible: true,
            fullscreen: FullscreenState::Windowed,
            pending_frames: 0,
            file_name: None,
        }
    }

    /// Flip grid visibility. Purely presentational.
    pub fn toggle_grid(&mut self) {
        self.grid_visible = !self.grid_visible;
    }

    pub fn record_filename(&mut self, name: &str) {
        self.file_name = Some(name.to_string());
    }

    pub fn fullscreen(&self) -> FullscreenState {
        self.fullscreen
    }

    /// Whether the display surface is actually fullscreen right now
    /// (drives the toggle icon, so it can never show a stale state).
    pub fn is_fullscreen_presented(&self) -> bool {
        matches!(
            self.fullscreen,
            FullscreenState::Fullscreen | FullscreenState::Leaving
        )
    }

    /// Ask to toggle fullscreen. Returns the target state the host should
    /// be told to enter, or `None` while a previous request is pending.
    pub fn request_fullscreen_toggle(&mut self) -> Option<bool> {
        match self.fullscreen {
            FullscreenState::Windowed => {
                self.fullscreen = FullscreenState::Entering;
                self.pending_frames = 0;
                Some(true)
            }
            FullscreenState::Fullscreen => {
                self.fullscreen = FullscreenState::Leaving;
                self.pending_frames = 0;
                Some(false)
            }
            FullscreenState::Entering | FullscreenState::Leaving => None,
        }
    }

    /// Fold the host-reported presentation state back into the machine.
    ///
    /// `observed` is `None` when the host cannot report fullscreen at all;
    /// that counts as a denial for any pending request.
    pub fn reconcile_fullscreen(&mut self, observed: Option<bool>) -> Option<FullscreenEvent> {
        let Some(observed) = observed else {
            return self.pending_denied();
        };

        match (self.fullscreen, observed) {
            (FullscreenState::Entering, true) => {
                self.settle(FullscreenState::Fullscreen);
                Some(FullscreenEvent::Confirmed(true))
            }
            (FullscreenState::Leaving, false) => {
                self.settle(FullscreenState::Windowed);
                Some(FullscreenEvent::Confirmed(false))
            }
            (FullscreenState::Entering, false) | (FullscreenState::Leaving, true) => {
                self.pending_frames += 1;
                if self.pending_frames >= PENDING_FRAME_LIMIT {
                    self.pending_denied()
                } else {
                    None
                }
            }
            // Host-initiated changes while settled.
            (FullscreenState::Windowed, true) => {
                self.settle(FullscreenState::Fullscreen);
                Some(FullscreenEvent::Confirmed(true))
            }
            (FullscreenState::Fullscreen, false) => {
                self.settle(FullscreenState::Windowed);
                Some(FullscreenEvent::Confirmed(false))
            }
            _ => None,
        }
    }

    /// The host rejected (or cannot perform) the pending transition; fall
    /// back to the state it actually is in.
    pub fn deny_fullscreen(&mut self) {
        self.pending_denied();
    }

    fn pending_denied(&mut self) -> Option<FullscreenEvent> {
        match self.fullscreen {
            FullscreenState::Entering => {
                self.settle(FullscreenState::Windowed);
                Some(FullscreenEvent::Denied)
            }
            FullscreenState::Leaving => {
                self.settle(FullscreenState::Fullscreen);
                Some(FullscreenEvent::Denied)
            }
            _ => None,
        }
    }

    fn settle(&mut self, state: FullscreenState) {
        self.fullscreen = state;
        self.pending_frames = 0;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_grid_is_an_involution() {
        let mut view = ViewState::new();
        let original = view.grid_visible;
        view.toggle_grid();
        assert_ne!(view.grid_visible, original);
        view.toggle_grid();
        assert_eq!(view.grid_visible, original);
    }

    #[test]
    fn fullscreen_confirms_only_on_host_report() {
        let mut view = ViewState::new();
        assert_eq!(view.request_fullscreen_toggle(), Some(true));
        assert_eq!(view.fullscreen(), FullscreenState::Entering);
        assert!(!view.is_fullscreen_presented());

        // Host still windowed: nothing settles yet.
        assert_eq!(view.reconcile_fullscreen(Some(false)), None);
        assert!(!view.is_fullscreen_presented());

        // Host confirms.
        assert_eq!(
            view.reconcile_fullscreen(Some(true)),
            Some(FullscreenEvent::Confirmed(true))
        );
        assert_eq!(view.fullscreen(), FullscreenState::Fullscreen);
        assert!(view.is_fullscreen_presented());
    }

    #[test]
    fn denied_request_leaves_mode_windowed() {
        let mut view = ViewState::new();
        view.request_fullscreen_toggle();
        view.deny_fullscreen();
        assert_eq!(view.fullscreen(), FullscreenState::Windowed);
        assert!(!view.is_fullscreen_presented());
    }

    #[test]
    fn unreportable_host_denies_pending_request() {
        let mut view = ViewState::new();
        view.request_fullscreen_toggle();
        assert_eq!(
            view.reconcile_fullscreen(None),
            Some(FullscreenEvent::Denied)
        );
        assert_eq!(view.fullscreen(), FullscreenState::Windowed);
    }

    #[test]
    fn external_exit_is_reconciled() {
        let mut view = ViewState::new();
        view.request_fullscreen_toggle();
        view.reconcile_fullscreen(Some(true));
        assert_eq!(view.fullscreen(), FullscreenState::Fullscreen);

        // Host drops out of fullscreen on its own (e.g. Escape).
        assert_eq!(
            view.reconcile_fullscreen(Some(false)),
            Some(FullscreenEvent::Confirmed(false))
        );
        assert_eq!(view.fullscreen(), FullscreenState::Windowed);
    }

    #[test]
    fn no_double_request_while_pending() {
        let mut view = ViewState::new();
        assert_eq!(view.request_fullscreen_toggle(), Some(true));
        assert_eq!(view.request_fullscreen_toggle(), None);
    }

    #[test]
    fn unconfirmed_request_times_out_as_denied() {
        let mut view = ViewState::new();
        view.request_fullscreen_toggle();
        let mut denied = false;
        for _ in 0..PENDING_FRAME_LIMIT + 1 {
            if view.reconcile_fullscreen(Some(false)) == Some(FullscreenEvent::Denied) {
                denied = true;
                break;
            }
        }
        assert!(denied);
        assert_eq!(view.fullscreen(), FullscreenState::Windowed);
    }

    #[test]
    fn records_filename_independent_of_parse_outcome() {
        let mut view = ViewState::new();
        view.record_filename("cube.stl");
        assert_eq!(view.file_name.as_deref(), Some("cube.stl"));
        view.record_filename("bad.obj");
        assert_eq!(view.file_name.as_deref(), Some("bad.obj"));
    }
}
