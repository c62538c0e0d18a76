//! The event loop tying feeds, state, rendering and exports together.

use crate::config::AppConfig;
use crate::error::ExportError;
use crate::export::{export_file_name, ExportStatus, Exporter};
use crate::state::ScheduleState;
use chrono::{NaiveDate, Utc};
use echeancier_source::{RecordAdapter, RecordBatch, RecordFeed, TableUpdate};
use echeancier_traits::DocumentConverter;
use echeancier_types::ScheduleView;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinSet};

/// User actions the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Re-render from the data already held.
    Refresh,
    /// Export the current data as a PDF.
    Export,
    Shutdown,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for SessionCommand {
    type Err = UnknownCommand;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "refresh" => Ok(SessionCommand::Refresh),
            "export" => Ok(SessionCommand::Export),
            "shutdown" | "quit" => Ok(SessionCommand::Shutdown),
            _ => Err(UnknownCommand(name.to_string())),
        }
    }
}

/// What a finished session leaves behind.
#[derive(Debug)]
pub struct SessionOutcome {
    pub state: ScheduleState,
    pub exports: Vec<Result<PathBuf, ExportError>>,
}

pub struct Session<C> {
    config: AppConfig,
    adapter: RecordAdapter,
    state: ScheduleState,
    exporter: Exporter<C>,
    view: watch::Sender<ScheduleView>,
    exports: JoinSet<Result<PathBuf, ExportError>>,
    finished: Vec<Result<PathBuf, ExportError>>,
    seen_header: bool,
    seen_schedule: bool,
}

impl<C: DocumentConverter + 'static> Session<C> {
    pub fn new(converter: C, config: AppConfig) -> Self {
        let state = ScheduleState::new();
        let (view, _) = watch::channel(state.render(&config.messages));
        Self {
            adapter: RecordAdapter::new(config.tables.clone()),
            exporter: Exporter::new(converter, &config),
            config,
            state,
            view,
            exports: JoinSet::new(),
            finished: Vec::new(),
            seen_header: false,
            seen_schedule: false,
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn exporter(&self) -> &Exporter<C> {
        &self.exporter
    }

    /// The rendered view, republished after every update and refresh.
    pub fn subscribe_view(&self) -> watch::Receiver<ScheduleView> {
        self.view.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ExportStatus> {
        self.exporter.subscribe()
    }

    pub fn refresh(&mut self) {
        self.view.send_replace(self.state.render(&self.config.messages));
    }

    pub fn handle_batch(&mut self, batch: RecordBatch) {
        let Some(update) = self.adapter.adapt(&batch) else {
            return;
        };
        match &update {
            TableUpdate::Header(_) => self.seen_header = true,
            TableUpdate::Schedule(_) => self.seen_schedule = true,
        }
        self.state.apply(update);
        self.refresh();
    }

    pub fn export_path(&self, date: NaiveDate) -> PathBuf {
        self.config.output_dir.join(export_file_name(&self.config.file_prefix, date))
    }

    /// Starts an export of the current data in the background and returns
    /// the target path. Updates arriving afterwards do not affect it.
    pub fn start_export(&mut self) -> PathBuf {
        let view = self.state.render(&self.config.messages);
        let path = self.export_path(Utc::now().date_naive());
        let exporter = self.exporter.clone();
        let target = path.clone();
        self.exports.spawn(async move { exporter.export(&view, &target).await });
        path
    }

    fn record_export(&mut self, joined: Result<Result<PathBuf, ExportError>, JoinError>) {
        let result = joined.unwrap_or_else(|e| Err(ExportError::Task(e.to_string())));
        self.finished.push(result);
    }

    fn warn_missing_tables(&self) {
        let tables = self.adapter.tables();
        if !self.seen_header {
            log::warn!("Table '{}' was not received; header stays empty until refreshed manually", tables.header);
        }
        if !self.seen_schedule {
            log::warn!("Table '{}' was not received; the schedule is empty", tables.schedule);
        }
    }

    /// Runs until `Shutdown` or until the command channel closes, then waits
    /// for exports still in flight.
    ///
    /// Commands are handled before pending feed data; an exhausted feed
    /// leaves the session in manual mode.
    pub async fn run<F: RecordFeed>(mut self, mut feed: F, mut commands: mpsc::Receiver<SessionCommand>) -> SessionOutcome {
        log::info!("Session started on feed '{}'", feed.name());
        let mut feed_open = true;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(SessionCommand::Refresh) => self.refresh(),
                    Some(SessionCommand::Export) => {
                        let path = self.start_export();
                        log::debug!("Export queued for {}", path.display());
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                },
                batch = feed.next_batch(), if feed_open => match batch {
                    Some(batch) => self.handle_batch(batch),
                    None => {
                        feed_open = false;
                        log::info!("Feed '{}' exhausted; continuing in manual mode", feed.name());
                        self.warn_missing_tables();
                    }
                },
                Some(joined) = self.exports.join_next(), if !self.exports.is_empty() => self.record_export(joined),
            }
        }

        while let Some(joined) = self.exports.join_next().await {
            self.record_export(joined);
        }
        log::info!("Session finished after {} export(s)", self.finished.len());
        SessionOutcome { state: self.state, exports: self.finished }
    }
}
