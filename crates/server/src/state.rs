use anyhow::Context;

use tokchunk_core::Config;
use tokchunk_ingest::ChunkPipeline;
use tokchunk_storage::ChunkStore;

use crate::templating::PageRenderer;

/// Shared, read-only request state. Every upload builds its own chunk
/// accumulators inside the pipeline, so nothing here needs a lock.
pub struct AppState {
    pub config: Config,
    pub pipeline: ChunkPipeline,
    pub store: ChunkStore,
    pub pages: PageRenderer,
}

impl AppState {
    /// Build state from config: loads the tokenizer for the configured model
    /// and creates the storage directories.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let pipeline = ChunkPipeline::from_config(&config.chunking)
            .context("failed to set up the chunking pipeline")?;
        Self::with_pipeline(config, pipeline)
    }

    pub fn with_pipeline(config: Config, pipeline: ChunkPipeline) -> anyhow::Result<Self> {
        let store = ChunkStore::new(&config.storage);
        store
            .ensure_dirs()
            .context("failed to create storage directories")?;
        let pages = PageRenderer::new().context("failed to compile page templates")?;
        Ok(Self {
            config,
            pipeline,
            store,
            pages,
        })
    }
}
