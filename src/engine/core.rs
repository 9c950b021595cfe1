use std::path::PathBuf;

use chrono::NaiveDate;

use crate::analysis::{build_report, describe};
use crate::chart::{self, DisplayOptions};
use crate::chat::{ChatBackend, ChatExchange, ChatHistory, PlaceholderChat};
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SESSION_EVENTS;
use crate::data::{
    PrepareConfig, PreparedTable, cache_key, load_cached_table, prepare_csv, write_cached_table,
};
use crate::error::{DashError, Result};
use crate::models::Table;

use super::messages::{DashboardEvent, DashboardView};
use super::state::LoadedUpload;

/// All state for one user's dashboard. Nothing is shared between sessions.
pub struct DashboardSession {
    upload: Option<LoadedUpload>,
    options: DisplayOptions,
    date_range: Option<(NaiveDate, NaiveDate)>,
    history: ChatHistory,

    backend: Box<dyn ChatBackend>,
    prepare_config: PrepareConfig,
    /// Optional on-disk layer under the in-memory memo
    cache_dir: Option<PathBuf>,

    /// Telemetry: how many times the CSV was actually parsed
    parse_count: usize,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(Box::new(PlaceholderChat))
    }
}

impl DashboardSession {
    pub fn new(backend: Box<dyn ChatBackend>) -> Self {
        Self {
            upload: None,
            options: DisplayOptions::default(),
            date_range: None,
            history: ChatHistory::default(),
            backend,
            prepare_config: PrepareConfig::default(),
            cache_dir: None,
            parse_count: 0,
        }
    }

    pub fn with_prepare_config(mut self, config: PrepareConfig) -> Self {
        self.prepare_config = config;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    // --- ACCESSORS ---

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn prepared(&self) -> Option<&PreparedTable> {
        self.upload.as_ref().map(|u| u.prepared.as_ref())
    }

    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    // --- EVENT HANDLING ---

    /// Applies one event and reruns the pipeline.
    /// A rejected event (bad upload, inverted range, empty question) leaves the
    /// session unchanged. Toggles and ranges are kept even before any upload;
    /// rendering then reports `NoData`.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<DashboardView> {
        #[cfg(debug_assertions)]
        if PRINT_SESSION_EVENTS {
            log::info!("[session] {:?}", EventLabel(&event));
        }

        match event {
            DashboardEvent::Upload(bytes) => {
                self.load(&bytes)?;
                self.render(None)
            }
            DashboardEvent::SetOptions(options) => {
                self.options = options;
                self.render(None)
            }
            DashboardEvent::SetDateRange(range) => {
                if let Some((start, end)) = range {
                    if start > end {
                        return Err(DashError::Validation(format!(
                            "date range start {} is after end {}",
                            start, end
                        )));
                    }
                }
                self.date_range = range;
                self.render(None)
            }
            DashboardEvent::Ask(question) => {
                let table = self.visible_table()?;
                let summary = describe(&table);
                let exchange = self
                    .history
                    .ask(self.backend.as_ref(), &summary, &question)?
                    .clone();
                self.render(Some(exchange))
            }
        }
    }

    fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let fp = cache_key(bytes, &self.prepare_config);
        if self.upload.as_ref().is_some_and(|u| u.matches(fp)) {
            #[cfg(debug_assertions)]
            if PRINT_SESSION_EVENTS {
                log::info!("[session] Memo hit for upload {:016x}", fp);
            }
            return Ok(());
        }

        let prepared = match self.cache_dir.as_deref().map(|dir| load_cached_table(dir, fp)) {
            Some(Ok(prepared)) => prepared,
            cached => {
                if let Some(Err(e)) = cached {
                    log::debug!("Cache miss for {:016x}: {:#}", fp, e);
                }
                let prepared = prepare_csv(bytes, &self.prepare_config)?;
                self.parse_count += 1;
                if let Some(dir) = self.cache_dir.as_deref() {
                    if let Err(e) = write_cached_table(dir, fp, &prepared) {
                        log::error!("⚠️  Failed to write cache: {:#}", e);
                    }
                }
                prepared
            }
        };

        self.upload = Some(LoadedUpload::new(fp, prepared));
        Ok(())
    }

    /// Renders the current state without changing it.
    pub fn current_view(&self) -> Result<DashboardView> {
        self.render(None)
    }

    /// The uploaded table narrowed by the current date range.
    pub fn visible_table(&self) -> Result<Table> {
        let upload = self.upload.as_ref().ok_or(DashError::NoData)?;
        let table = &upload.prepared.table;
        match self.date_range {
            Some((start, end)) => table.filter_date_range(start, end),
            None => Ok(table.clone()),
        }
    }

    fn render(&self, answer: Option<ChatExchange>) -> Result<DashboardView> {
        let table = self.visible_table()?;
        let rejected_rows = self
            .upload
            .as_ref()
            .map_or(0, |u| u.prepared.rejected.len());

        Ok(DashboardView {
            payload: chart::build(&table, &self.options),
            report: build_report(&table),
            visible_rows: table.len(),
            rejected_rows,
            answer,
        })
    }
}

/// Keeps upload bytes out of event logs.
#[cfg(debug_assertions)]
struct EventLabel<'a>(&'a DashboardEvent);

#[cfg(debug_assertions)]
impl std::fmt::Debug for EventLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            DashboardEvent::Upload(bytes) => write!(f, "Upload({} bytes)", bytes.len()),
            other => write!(f, "{:?}", other),
        }
    }
}
