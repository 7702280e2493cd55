//! inkset Font - Font loading and matching
//!
//! This crate owns everything inkset knows about fonts:
//! - The catalogue of supported web font families
//! - A process-wide registry that loads each family at most once and fans
//!   the outcome out to every dependent
//! - Font fetchers (a database-backed one and a host-driven deferred one)
//! - Font database and matching (fontdb) plus face metrics (ttf-parser)

mod database;
mod face;
mod family;
mod fetch;
mod matching;
mod registry;

pub use database::{FontDatabase, SharedFontDatabase};
pub use face::{FontFace, RunMetrics};
pub use family::FontFamily;
pub use fetch::{DatabaseFetcher, DeferredFetcher, FetchCallback, FetchOutcome, FontFetcher};
pub use matching::{FamilyName, FontQuery, GenericFamily};
pub use registry::{FontLoadState, FontRegistry, FontTicket, DEFAULT_FONT_TIMEOUT};

/// Unique identifier for a face in the font database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub fontdb::ID);

/// A font family could not be loaded.
///
/// Delivered to every waiter of a family whose external load was rejected
/// or ran past its timeout. Never raised as a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to load font: {family}")]
pub struct FontLoadFailed {
    /// Family name as requested
    pub family: String,
    /// The load ran out of time rather than being rejected
    pub timed_out: bool,
}

impl FontLoadFailed {
    pub fn new(family: impl Into<String>, timed_out: bool) -> Self {
        Self {
            family: family.into(),
            timed_out,
        }
    }
}

/// Font error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Unknown font family: {0}")]
    UnknownFamily(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Font I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
