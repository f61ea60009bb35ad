use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default token budget per chunk.
pub const DEFAULT_MAX_TOKENS: usize = 3500;

/// Default model whose vocabulary is used for counting tokens.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "ignoring unparseable value");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TOKCHUNK_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TOKCHUNK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            storage: StorageConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject settings that would make every upload fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.chunking.validate()
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  server:      {}:{} (max upload {} MB)",
            self.server.host,
            self.server.port,
            self.server.max_upload_mb
        );
        tracing::info!(
            "  storage:     upload_dir={}, chunk_dir={}",
            self.storage.upload_dir.display(),
            self.storage.chunk_dir.display()
        );
        tracing::info!(
            "  chunking:    model={}, max_tokens={}",
            self.chunking.model_name,
            self.chunking.max_tokens
        );
    }

    /// View safe for API responses.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "storage": {
                "upload_dir": self.storage.upload_dir,
                "chunk_dir": self.storage.chunk_dir,
            },
            "chunking": {
                "model_name": self.chunking.model_name,
                "max_tokens": self.chunking.max_tokens,
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Largest accepted upload body, in megabytes.
    pub max_upload_mb: usize,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_mb == 0 {
            return Err(ConfigError::InvalidMaxUploadMb(self.max_upload_mb));
        }
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 3001),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_usize(p, "MAX_UPLOAD_MB", 100),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origin: "*".to_string(),
            max_upload_mb: 100,
        }
    }
}

// ── Storage ───────────────────────────────────────────────────

/// Where uploads and chunk files are written. Passed explicitly to the
/// chunk store; nothing is created at startup unless asked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub chunk_dir: PathBuf,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            upload_dir: PathBuf::from(profiled_env_or(p, "UPLOAD_DIR", "static")),
            chunk_dir: PathBuf::from(profiled_env_or(p, "CHUNK_DIR", "chunks")),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static"),
            chunk_dir: PathBuf::from("chunks"),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Token budget per chunk (soft cap; a single oversized word may exceed it).
    pub max_tokens: usize,
    /// Model whose tokenizer vocabulary measures the budget.
    pub model_name: String,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_tokens: profiled_env_usize(p, "MAX_TOKENS", DEFAULT_MAX_TOKENS),
            model_name: profiled_env_or(p, "MODEL_NAME", DEFAULT_MODEL_NAME),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(self.max_tokens));
        }
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::UnknownModel(self.model_name.clone()));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}
