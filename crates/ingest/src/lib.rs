//! PDF text extraction and token-budgeted chunking.

pub mod chunker;
pub mod document;
pub mod pipeline;
pub mod tokenizer;

pub use chunker::{chunk_text, Chunk, ChunkConfig, ChunkError};
pub use document::{extract_file, extract_text, ExtractedDocument, ExtractionError, PageContent};
pub use pipeline::{ChunkPipeline, ChunkedDocument, PipelineError};
pub use tokenizer::{TiktokenCounter, TokenCounter, TokenCounterRef, TokenizerError};
