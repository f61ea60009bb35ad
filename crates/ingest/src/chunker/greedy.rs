//! Left-to-right greedy word packing.

use super::types::{Chunk, ChunkConfig, ChunkError};
use crate::tokenizer::TokenCounter;

/// Word separators: Unicode whitespace plus the ASCII information separators
/// U+001C..=U+001F, which some PDF text layers emit between words.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Words of `text` in order; separator runs never yield empty words.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|w| !w.is_empty())
}

fn close_chunk(index: usize, words: &[&str], token_count: usize) -> Chunk {
    Chunk {
        index,
        content: words.join(" "),
        token_count,
        word_count: words.len(),
    }
}

/// Split `text` into chunks of at most `config.max_tokens` tokens each, as
/// measured by `counter`.
///
/// Words are taken in order and appended to the current chunk until the next
/// word would push the running total past the budget; that word then starts a
/// new chunk. A word that alone exceeds the budget is never split and becomes
/// a chunk by itself. Whitespace-only text yields no chunks.
///
/// The budget is validated before any word is counted. A counter failure
/// aborts the whole call.
pub fn chunk_text<C>(text: &str, config: &ChunkConfig, counter: &C) -> Result<Vec<Chunk>, ChunkError>
where
    C: TokenCounter + ?Sized,
{
    config.validate()?;

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens = 0usize;

    for word in words(text) {
        let token_len = counter
            .count_tokens(word)
            .map_err(|source| ChunkError::Tokenization {
                word: word.to_string(),
                source,
            })?;

        if current_tokens.saturating_add(token_len) > config.max_tokens && !current.is_empty() {
            chunks.push(close_chunk(chunks.len(), &current, current_tokens));
            current.clear();
            current_tokens = 0;
        }
        current.push(word);
        current_tokens = current_tokens.saturating_add(token_len);
    }

    if !current.is_empty() {
        chunks.push(close_chunk(chunks.len(), &current, current_tokens));
    }

    tracing::debug!(
        counter = counter.name(),
        max_tokens = config.max_tokens,
        chunks = chunks.len(),
        "chunked text"
    );
    Ok(chunks)
}
