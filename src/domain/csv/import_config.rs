// ============================================================
// IMPORT CONFIGURATION
// ============================================================
// Tokenizer and size limits applied to every import

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the tokenizer treats double quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// A quote toggles quoted mode and is dropped; `""` has no special meaning
    #[default]
    Naive,

    /// RFC 4180 quoting: `""` is a literal quote, quoted fields may span lines
    Rfc4180,
}

/// Configuration for CSV imports
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ImportConfig {
    pub quote_mode: QuoteMode,

    /// Largest file accepted, in bytes (default: 10MB)
    #[validate(range(min = 1))]
    pub max_file_bytes: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            quote_mode: QuoteMode::Naive,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote_mode(mut self, quote_mode: QuoteMode) -> Self {
        self.quote_mode = quote_mode;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }
}
