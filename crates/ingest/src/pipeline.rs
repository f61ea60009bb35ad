//! Extraction followed by chunking, for one uploaded document at a time.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokchunk_core::config::ChunkingConfig;

use crate::chunker::{chunk_text, Chunk, ChunkConfig, ChunkError};
use crate::document::{self, ExtractedDocument, ExtractionError};
use crate::tokenizer::{TiktokenCounter, TokenCounterRef};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Chunking(#[from] ChunkError),
}

/// Outcome of processing one document.
#[derive(Debug, Clone)]
pub struct ChunkedDocument {
    pub filename: String,
    pub page_count: usize,
    pub total_chars: usize,
    pub chunks: Vec<Chunk>,
}

/// Extract → chunk, with a fixed budget and token counter.
///
/// Holds no per-document state, so one pipeline can serve concurrent
/// requests from behind an `Arc`.
#[derive(Clone)]
pub struct ChunkPipeline {
    config: ChunkConfig,
    counter: TokenCounterRef,
}

impl ChunkPipeline {
    /// Build a pipeline, rejecting an invalid budget up front.
    pub fn new(config: ChunkConfig, counter: TokenCounterRef) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config, counter })
    }

    /// Build a pipeline counting tokens with the vocabulary of
    /// `cfg.model_name`.
    pub fn from_config(cfg: &ChunkingConfig) -> Result<Self, ChunkError> {
        cfg.validate()?;
        let counter = TiktokenCounter::for_model(&cfg.model_name)?;
        Self::new(ChunkConfig::from(cfg), Arc::new(counter))
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    pub fn counter_name(&self) -> &str {
        self.counter.name()
    }

    /// Chunk an already extracted document.
    pub fn chunk_document(&self, doc: &ExtractedDocument) -> Result<Vec<Chunk>, ChunkError> {
        chunk_text(&doc.full_text(), &self.config, self.counter.as_ref())
    }

    /// Extract text from PDF bytes and chunk it.
    pub fn process(&self, bytes: &[u8], filename: &str) -> Result<ChunkedDocument, PipelineError> {
        let started = Instant::now();
        let doc = document::extract_text(bytes, filename)?;
        let chunks = self.chunk_document(&doc)?;

        tracing::info!(
            filename,
            pages = doc.page_count(),
            chars = doc.total_chars(),
            chunks = chunks.len(),
            model = self.counter_name(),
            max_tokens = self.config.max_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "processed document"
        );

        Ok(ChunkedDocument {
            filename: filename.to_string(),
            page_count: doc.page_count(),
            total_chars: doc.total_chars(),
            chunks,
        })
    }
}

impl std::fmt::Debug for ChunkPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkPipeline")
            .field("config", &self.config)
            .field("counter", &self.counter.name())
            .finish()
    }
}
