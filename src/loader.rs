// ⏳ Data Loader - one query per session, loading → ready | error
// No retry, no refresh: the first terminal state is final

use crate::db::Entry;
use crate::error::{LoadError, StoreError};
use crate::store::EntryStore;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{error, info, warn};

// ============================================================================
// LOAD STATUS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready(Vec<Entry>),
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// Move out of `Loading` exactly once; later outcomes are ignored
    pub fn resolve(&mut self, outcome: Result<Vec<Entry>, LoadError>) -> bool {
        if !self.is_loading() {
            return false;
        }

        *self = match outcome {
            Ok(entries) => LoadStatus::Ready(entries),
            Err(err) => LoadStatus::Error(err.user_message()),
        };
        true
    }

    pub fn entries(&self) -> &[Entry] {
        match self {
            LoadStatus::Ready(entries) => entries,
            _ => &[],
        }
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// Run the single query and classify the outcome
pub fn load_entries(store: &mut dyn EntryStore) -> Result<Vec<Entry>, LoadError> {
    info!(store = %store.describe(), "Fetching Pokemon data...");

    let entries = store.fetch_all().map_err(|err| {
        error!(error = %err, "Error fetching Pokemon");
        LoadError::from(err)
    })?;

    if entries.is_empty() {
        warn!("No Pokemon data received");
        return Err(LoadError::Empty);
    }

    info!(records = entries.len(), "Pokemon data received");
    Ok(entries)
}

// ============================================================================
// BACKGROUND LOAD
// ============================================================================

/// The in-flight query, run on a worker thread
/// Dropping it before completion discards the result unobserved
pub struct PendingLoad {
    rx: Receiver<Result<Vec<Entry>, LoadError>>,
    delivered: bool,
}

impl PendingLoad {
    pub fn spawn(mut store: Box<dyn EntryStore>) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = load_entries(store.as_mut());
            // Receiver gone means the UI already exited
            let _ = tx.send(outcome);
        });

        Self {
            rx,
            delivered: false,
        }
    }

    /// Non-blocking check for the outcome
    /// Yields `Some` exactly once, then `None` forever
    pub fn poll(&mut self) -> Option<Result<Vec<Entry>, LoadError>> {
        if self.delivered {
            return None;
        }

        let outcome = match self.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        self.delivered = true;
        Some(outcome)
    }
}

/// The worker died without reporting (panicked store); no message to show
fn worker_lost() -> LoadError {
    LoadError::Query(StoreError::Other(String::new()))
}

// ============================================================================
// TESTS
// ============================================================================
