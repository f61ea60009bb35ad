use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("{text:?} contains a special token of the model vocabulary, which is not allowed in plain text")]
    DisallowedSpecial { text: String },

    #[error("tokenizer failed: {0}")]
    Failed(String),
}

/// Counts how many tokens a word occupies in some model vocabulary.
///
/// Implementations must be deterministic: the same word always yields the
/// same count. Any `Fn(&str) -> Result<usize, TokenizerError>` is a counter,
/// which keeps the chunker testable without a real vocabulary.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, word: &str) -> Result<usize, TokenizerError>;

    /// Identifier of the vocabulary, for logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> Result<usize, TokenizerError> + Send + Sync,
{
    fn count_tokens(&self, word: &str) -> Result<usize, TokenizerError> {
        self(word)
    }
}

/// Shared token counter.
pub type TokenCounterRef = Arc<dyn TokenCounter>;

#[cfg(test)]
mod tests {
    use super::*;

    fn char_count(word: &str) -> Result<usize, TokenizerError> {
        Ok(word.chars().count())
    }

    #[test]
    fn functions_are_counters() {
        assert_eq!(char_count.count_tokens("héllo").unwrap(), 5);
        assert_eq!(char_count.name(), "custom");
    }

    #[test]
    fn closures_behind_arc() {
        let counter: TokenCounterRef = Arc::new(|w: &str| -> Result<usize, TokenizerError> {
            if w == "bad" {
                Err(TokenizerError::Failed("nope".into()))
            } else {
                Ok(1)
            }
        });
        assert_eq!(counter.count_tokens("fine").unwrap(), 1);
        assert!(counter.count_tokens("bad").is_err());
    }
}
