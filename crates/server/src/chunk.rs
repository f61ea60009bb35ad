//! One-shot chunking of a PDF on disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use tokchunk_core::Config;
use tokchunk_ingest::ChunkPipeline;
use tokchunk_storage::{ChunkStore, ChunkSummary};

/// Extract and chunk `pdf`, writing chunk files to the configured chunk
/// directory. The source file is not copied into the upload directory.
pub fn run(config: &Config, pdf: &Path, print: bool) -> anyhow::Result<ChunkSummary> {
    let pipeline = ChunkPipeline::from_config(&config.chunking)
        .context("failed to set up the chunking pipeline")?;
    chunk_with(&pipeline, config, pdf, print)
}

fn chunk_with(
    pipeline: &ChunkPipeline,
    config: &Config,
    pdf: &Path,
    print: bool,
) -> anyhow::Result<ChunkSummary> {
    let bytes = fs::read(pdf).with_context(|| format!("failed to read {}", pdf.display()))?;
    let filename = pdf
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf");

    let doc = pipeline
        .process(&bytes, filename)
        .with_context(|| format!("failed to chunk {}", pdf.display()))?;

    let store = ChunkStore::new(&config.storage);
    store
        .ensure_chunk_dir()
        .context("failed to create chunk directory")?;
    let summary = store.write_chunks(filename, &doc.chunks)?;

    info!(
        "{}: {} page(s), {} chunk(s) in {}",
        summary.filename,
        doc.page_count,
        summary.chunk_files.len(),
        store.chunk_dir().display()
    );

    if print {
        for (chunk, file) in doc.chunks.iter().zip(&summary.chunk_files) {
            println!("── {} ({} tokens) ──", file, chunk.token_count);
            println!("{}", chunk.content);
        }
    } else {
        for file in &summary.chunk_files {
            println!("{}", store.chunk_dir().join(file).display());
        }
    }

    Ok(summary)
}
