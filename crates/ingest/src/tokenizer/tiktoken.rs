use tiktoken_rs::CoreBPE;
use tokchunk_core::ConfigError;

use super::traits::{TokenCounter, TokenizerError};

/// Every special token of the OpenAI vocabularies is spelled `<|...|>`.
const SPECIAL_TOKEN_OPEN: &str = "<|";

/// BPE token counter bound to the vocabulary of a named model
/// (`gpt-4` → cl100k_base, `gpt-4o` → o200k_base, ...).
pub struct TiktokenCounter {
    model: String,
    bpe: CoreBPE,
}

impl TiktokenCounter {
    /// Resolve the vocabulary for `model`. Unknown names are a configuration
    /// error: there is no token counter to chunk with.
    pub fn for_model(model: &str) -> Result<Self, ConfigError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            tracing::warn!(model, error = %e, "no tokenizer for model");
            ConfigError::UnknownModel(model.to_string())
        })?;
        tracing::debug!(model, "loaded tokenizer vocabulary");
        Ok(Self {
            model: model.to_string(),
            bpe,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, word: &str) -> Result<usize, TokenizerError> {
        let ordinary = self.bpe.encode_ordinary(word);
        // Only this vocabulary's own special tokens are disallowed; a marker
        // from another vocabulary is ordinary text here.
        if word.contains(SPECIAL_TOKEN_OPEN) && self.bpe.encode_with_special_tokens(word) != ordinary {
            return Err(TokenizerError::DisallowedSpecial {
                text: word.to_string(),
            });
        }
        Ok(ordinary.len())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
