//! Chunk configuration, output and error types.

use thiserror::Error;
use tokchunk_core::config::{ChunkingConfig, DEFAULT_MAX_TOKENS};
use tokchunk_core::ConfigError;

use crate::tokenizer::TokenizerError;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum tokens accumulated per chunk (default: 3500). Soft cap: a
    /// single word larger than the budget still becomes its own chunk.
    pub max_tokens: usize,
}

impl ChunkConfig {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(self.max_tokens));
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(cfg: &ChunkingConfig) -> Self {
        Self::new(cfg.max_tokens)
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A run of consecutive words joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Sum of the token counts of the chunk's words.
    pub token_count: usize,
    /// Number of words in the chunk.
    pub word_count: usize,
}

impl Chunk {
    /// True for the one case allowed past the budget: a lone word that
    /// alone exceeds it.
    pub fn is_oversized_word(&self, max_tokens: usize) -> bool {
        self.word_count == 1 && self.token_count > max_tokens
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("invalid chunking configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("failed to count tokens for word {word:?}: {source}")]
    Tokenization {
        word: String,
        #[source]
        source: TokenizerError,
    },
}
