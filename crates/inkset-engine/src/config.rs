//! Engine Configuration

use std::time::Duration;

use inkset_font::{FontFetcher, FontRegistry, DEFAULT_FONT_TIMEOUT};

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Timeout attached to every external font load
    pub font_timeout: Duration,

    /// Prefix of per-instance ids (`<prefix>-<n>`)
    pub id_prefix: String,
}

impl EngineConfig {
    /// A font registry honoring this configuration's timeout
    pub fn registry(&self, fetcher: impl FontFetcher + 'static) -> FontRegistry {
        FontRegistry::with_timeout(fetcher, self.font_timeout)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            font_timeout: DEFAULT_FONT_TIMEOUT,
            id_prefix: "ct".to_string(),
        }
    }
}
