//! Font fetchers
//!
//! The registry only knows the three-outcome contract of [`FontFetcher`];
//! how the family actually gets fetched is up to the implementation.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::SharedFontDatabase;

/// Outcome reported by a fetcher for one family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The family is available for rendering
    Active,
    /// The family could not be loaded
    Inactive,
    /// The load did not finish within its timeout
    TimedOut,
}

/// Completion handler handed to a fetcher; must be called at most once
pub type FetchCallback = Box<dyn FnOnce(FetchOutcome)>;

/// External font-fetch collaborator
pub trait FontFetcher {
    /// Start loading `family`.
    ///
    /// `done` may be invoked before `load` returns or at any later point.
    fn load(&mut self, family: &str, timeout: Duration, done: FetchCallback);
}

/// Resolves families against a shared font database, loading font files
/// from search directories on demand
pub struct DatabaseFetcher {
    db: SharedFontDatabase,
    search_dirs: Vec<PathBuf>,
}

impl DatabaseFetcher {
    pub fn new(db: SharedFontDatabase) -> Self {
        Self {
            db,
            search_dirs: Vec::new(),
        }
    }

    /// Add a directory searched for `<Family>*.ttf|otf|ttc` files
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    fn resolve(&self, family: &str) -> bool {
        if self.db.borrow().has_family(family) {
            return true;
        }

        let key = family_key(family);
        for dir in &self.search_dirs {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Cannot read font directory {}: {}", dir.display(), e);
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if !is_font_file(&path) || !file_matches(&path, &key) {
                    continue;
                }
                if let Err(e) = self.db.borrow_mut().load_font_file(&path) {
                    tracing::warn!("{}", e);
                }
            }
        }

        self.db.borrow().has_family(family)
    }
}

impl FontFetcher for DatabaseFetcher {
    fn load(&mut self, family: &str, timeout: Duration, done: FetchCallback) {
        let started = Instant::now();
        let found = self.resolve(family);
        let outcome = if started.elapsed() > timeout {
            FetchOutcome::TimedOut
        } else if found {
            FetchOutcome::Active
        } else {
            FetchOutcome::Inactive
        };
        tracing::debug!("Font {} resolved from database: {:?}", family, outcome);
        done(outcome);
    }
}

fn family_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
        .unwrap_or(false)
}

fn file_matches(path: &Path, key: &str) -> bool {
    !key.is_empty()
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| family_key(stem).starts_with(key))
            .unwrap_or(false)
}

struct PendingLoad {
    family: String,
    deadline: Duration,
    done: FetchCallback,
}

#[derive(Default)]
struct DeferredState {
    clock: Duration,
    pending: Vec<PendingLoad>,
    history: Vec<String>,
}

/// Fetcher whose loads are resolved later by the host.
///
/// Clones share state: hand one clone to the registry and keep another to
/// call [`resolve`](Self::resolve) or [`advance`](Self::advance) when the
/// host's own fetch finishes or time passes.
#[derive(Clone, Default)]
pub struct DeferredFetcher {
    state: Rc<RefCell<DeferredState>>,
}

impl DeferredFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the oldest pending load for `family`.
    ///
    /// Returns false when nothing is pending for that family.
    pub fn resolve(&self, family: &str, outcome: FetchOutcome) -> bool {
        let load = {
            let mut state = self.state.borrow_mut();
            match state.pending.iter().position(|p| p.family == family) {
                Some(index) => state.pending.remove(index),
                None => return false,
            }
        };
        (load.done)(outcome);
        true
    }

    /// Move the logical clock forward, timing out overdue loads.
    ///
    /// Returns the number of loads that timed out.
    pub fn advance(&self, by: Duration) -> usize {
        let expired: Vec<PendingLoad> = {
            let mut state = self.state.borrow_mut();
            state.clock += by;
            let clock = state.clock;
            let (expired, still_pending) = std::mem::take(&mut state.pending)
                .into_iter()
                .partition(|p| p.deadline <= clock);
            state.pending = still_pending;
            expired
        };

        let count = expired.len();
        for load in expired {
            tracing::debug!("Font {} timed out", load.family);
            (load.done)(FetchOutcome::TimedOut);
        }
        count
    }

    /// Families requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    /// Families still waiting for an outcome
    pub fn pending(&self) -> Vec<String> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|p| p.family.clone())
            .collect()
    }
}

impl FontFetcher for DeferredFetcher {
    fn load(&mut self, family: &str, timeout: Duration, done: FetchCallback) {
        let mut state = self.state.borrow_mut();
        let deadline = state.clock + timeout;
        state.history.push(family.to_string());
        state.pending.push(PendingLoad {
            family: family.to_string(),
            deadline,
            done,
        });
    }
}
