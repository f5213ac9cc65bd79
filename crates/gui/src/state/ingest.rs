//! Async file ingestion.
//!
//! Reads and parses run as tokio tasks; completions cross back to the UI
//! thread over a channel drained once per frame. Overlapping requests are
//! ordered by a generation counter: a completion is applied only if nothing
//! newer has been applied yet, so the displayed model always corresponds to
//! the most recently initiated request, not the most recently finished one.

use std::path::{Path, PathBuf};

use shared::ParsedGeometry;
use tokio::sync::mpsc;

/// Monotonic request ordering for overlapping ingests.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    issued: u64,
    accepted: u64,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request. Generations start at 1.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn latest_issued(&self) -> u64 {
        self.issued
    }

    /// Accept `generation` iff no newer completion has been accepted.
    /// Accepting marks every older in-flight request stale forever.
    pub fn try_accept(&mut self, generation: u64) -> bool {
        if generation > self.accepted {
            self.accepted = generation;
            true
        } else {
            false
        }
    }
}

/// Classified failure of one ingest attempt.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] shared::ParseError),
}

/// Outcome of one ingest attempt, tagged with its request generation.
#[derive(Debug)]
pub struct IngestCompletion {
    pub generation: u64,
    pub file_name: String,
    pub outcome: Result<ParsedGeometry, IngestError>,
}

/// Spawns ingest tasks and collects their completions.
pub struct Ingestor {
    runtime: tokio::runtime::Runtime,
    tx: mpsc::UnboundedSender<IngestCompletion>,
    rx: mpsc::UnboundedReceiver<IngestCompletion>,
    tracker: GenerationTracker,
    in_flight: usize,
}

impl Ingestor {
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to start ingest runtime");
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tx,
            rx,
            tracker: GenerationTracker::new(),
            in_flight: 0,
        }
    }

    /// Start reading and parsing `path`. Returns the request generation.
    pub fn begin(&mut self, path: PathBuf) -> u64 {
        let generation = self.tracker.issue();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let tx = self.tx.clone();
        self.in_flight += 1;

        self.runtime.spawn(async move {
            let outcome = read_and_parse(&path).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(IngestCompletion {
                generation,
                file_name,
                outcome,
            });
        });

        generation
    }

    /// Drain every completion that has landed since the last poll.
    pub fn poll(&mut self) -> Vec<IngestCompletion> {
        let mut out = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            out.push(completion);
        }
        out
    }

    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn try_accept(&mut self, generation: u64) -> bool {
        self.tracker.try_accept(generation)
    }

    /// Stamp a generation without spawning a task (headless simulation).
    pub fn issue_generation(&mut self) -> u64 {
        self.tracker.issue()
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_and_parse(path: &Path) -> Result<ParsedGeometry, IngestError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let format = shared::MeshFormat::detect(file_name)?;

    // Suspension point: the UI thread is never blocked on the read.
    let bytes = tokio::fs::read(path).await?;
    let geometry = shared::parse(format, &bytes)?;
    // `bytes` is dropped here; the raw buffer is not retained past the parse.
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_monotonic_from_one() {
        let mut tracker = GenerationTracker::new();
        assert_eq!(tracker.issue(), 1);
        assert_eq!(tracker.issue(), 2);
        assert_eq!(tracker.latest_issued(), 2);
    }

    #[test]
    fn later_initiated_request_wins_over_later_completing() {
        let mut tracker = GenerationTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        // Second request finishes first and is accepted.
        assert!(tracker.try_accept(second));
        // First request finishes afterwards: stale, discarded.
        assert!(!tracker.try_accept(first));
    }

    #[test]
    fn in_order_completions_are_all_accepted() {
        let mut tracker = GenerationTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(tracker.try_accept(first));
        assert!(tracker.try_accept(second));
    }

    #[test]
    fn accepting_twice_is_rejected() {
        let mut tracker = GenerationTracker::new();
        let only = tracker.issue();
        assert!(tracker.try_accept(only));
        assert!(!tracker.try_accept(only));
    }
}
