use serde::Serialize;
use std::path::PathBuf;

/// Stages of one export attempt.
///
/// `Idle → Rendering → Stamping → Saving → Done → Idle`, with `Failed`
/// reachable from any working stage and left only by the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportPhase {
    Idle,
    Rendering,
    Stamping,
    Saving,
    Done,
    Failed,
}

impl ExportPhase {
    pub fn is_working(self) -> bool {
        matches!(self, ExportPhase::Rendering | ExportPhase::Stamping | ExportPhase::Saving)
    }
}

/// What the status line shows, published on a `watch` channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub phase: ExportPhase,
    /// Attempt this status belongs to; 0 before the first export.
    pub generation: u64,
    /// File written by a successful attempt.
    pub output: Option<PathBuf>,
    text: String,
}

impl ExportStatus {
    pub fn idle(generation: u64) -> Self {
        Self { phase: ExportPhase::Idle, generation, output: None, text: String::new() }
    }

    pub(crate) fn new(phase: ExportPhase, generation: u64, text: impl Into<String>) -> Self {
        Self { phase, generation, output: None, text: text.into() }
    }

    pub(crate) fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// The status line text; empty when idle.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for ExportStatus {
    fn default() -> Self {
        Self::idle(0)
    }
}
