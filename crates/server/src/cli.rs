//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tokchunk_core::Config;

#[derive(Debug, Parser)]
#[command(name = "tokchunk", version, about = "Split PDF text into token-budgeted chunks")]
pub struct Cli {
    /// Token budget per chunk (overrides MAX_TOKENS).
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,

    /// Model whose tokenizer measures the budget (overrides MODEL_NAME).
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP upload service.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Chunk a single PDF from disk.
    Chunk {
        pdf: PathBuf,
        /// Directory for chunk files (overrides CHUNK_DIR).
        #[arg(long)]
        chunk_dir: Option<PathBuf>,
        /// Print each chunk to stdout as well.
        #[arg(long)]
        print: bool,
    },
}

impl Cli {
    /// Layer command-line overrides on top of the env-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(max_tokens) = self.max_tokens {
            config.chunking.max_tokens = max_tokens;
        }
        if let Some(model) = &self.model {
            config.chunking.model_name = model.clone();
        }
        match &self.command {
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
            Command::Chunk { chunk_dir, .. } => {
                if let Some(dir) = chunk_dir {
                    config.storage.chunk_dir = dir.clone();
                }
            }
        }
    }
}
