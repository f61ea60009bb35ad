//! Greedy token-budgeted chunking engine.
//!
//! Splits document text into whitespace-delimited words and packs them, left
//! to right, into chunks whose summed token counts stay within a budget.
//! There is no overlap between chunks and no sentence or paragraph
//! awareness: boundaries depend only on word token counts.

mod greedy;
mod types;

pub use greedy::chunk_text;
pub use types::{Chunk, ChunkConfig, ChunkError};
