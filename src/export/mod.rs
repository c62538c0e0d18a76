//! The export pipeline: convert, stamp page numbers, save, report.
//!
//! An attempt either reaches `Done` or stops at the first failing stage with
//! `Failed`. Nothing is retried and nothing is saved after a failure.

mod page_numbers;
mod status;
#[cfg(test)]
pub(crate) mod testing;

pub use page_numbers::{page_label, stamp_page_numbers, PageNumberStyle};
pub use status::{ExportPhase, ExportStatus};

use crate::config::{AppConfig, Messages};
use crate::error::ExportError;
use chrono::NaiveDate;
use echeancier_traits::{DocumentConverter, PaginatedDocument};
use echeancier_types::{ExportOptions, ScheduleView};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// `{prefix}_{YYYY-MM-DD}.pdf`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", prefix, date.format("%Y-%m-%d"))
}

/// Runs exports through a converter and publishes their status.
///
/// Cheap to clone; clones share the converter, the status channel and the
/// attempt counter.
pub struct Exporter<C> {
    converter: Arc<C>,
    options: ExportOptions,
    page_numbers: PageNumberStyle,
    messages: Messages,
    clear_after: Duration,
    status: Arc<watch::Sender<ExportStatus>>,
    generation: Arc<AtomicU64>,
}

impl<C> Clone for Exporter<C> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
            options: self.options.clone(),
            page_numbers: self.page_numbers,
            messages: self.messages.clone(),
            clear_after: self.clear_after,
            status: Arc::clone(&self.status),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<C: DocumentConverter + 'static> Exporter<C> {
    pub fn new(converter: C, config: &AppConfig) -> Self {
        let (status, _) = watch::channel(ExportStatus::default());
        Self {
            converter: Arc::new(converter),
            options: config.export.clone(),
            page_numbers: config.page_numbers,
            messages: config.messages.clone(),
            clear_after: config.status_clear_after(),
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> ExportStatus {
        self.status.borrow().clone()
    }

    fn publish(&self, phase: ExportPhase, generation: u64, text: &str) {
        self.status.send_replace(ExportStatus::new(phase, generation, text));
    }

    /// Exports `view` to `path`.
    ///
    /// The status moves to "in progress" before the converter is called. On
    /// success it shows "done" and is cleared after the configured delay
    /// unless a newer attempt has started; on failure it shows "failed"
    /// until the next attempt.
    pub async fn export(&self, view: &ScheduleView, path: &Path) -> Result<PathBuf, ExportError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Export #{} started: {}", generation, path.display());
        self.publish(ExportPhase::Rendering, generation, &self.messages.export_in_progress);

        match self.run(generation, view, path).await {
            Ok(written) => {
                self.status.send_replace(
                    ExportStatus::new(ExportPhase::Done, generation, self.messages.export_done.as_str())
                        .with_output(written.clone()),
                );
                log::info!("Export #{} saved to {}", generation, written.display());
                self.schedule_clear(generation);
                Ok(written)
            }
            Err(e) => {
                log::error!("Export #{} failed: {}", generation, e);
                self.publish(ExportPhase::Failed, generation, &self.messages.export_failed);
                Err(e)
            }
        }
    }

    async fn run(&self, generation: u64, view: &ScheduleView, path: &Path) -> Result<PathBuf, ExportError> {
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let options = self.options.clone().with_file_name(file_name);

        let mut doc = self.converter.convert(view, &options).await?;
        log::debug!("Converter '{}' produced {} page(s)", self.converter.name(), doc.page_count());

        self.publish(ExportPhase::Stamping, generation, &self.messages.export_in_progress);
        stamp_page_numbers(&mut doc, &self.page_numbers).map_err(ExportError::Stamping)?;

        self.publish(ExportPhase::Saving, generation, &self.messages.export_in_progress);
        doc.save(path).await.map_err(ExportError::Save)
    }

    fn schedule_clear(&self, generation: u64) {
        let status = Arc::clone(&self.status);
        let delay = self.clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_if_modified(|current| {
                let still_ours = current.generation == generation && current.phase == ExportPhase::Done;
                if still_ours {
                    *current = ExportStatus::idle(generation);
                }
                still_ours
            });
        });
    }
}
