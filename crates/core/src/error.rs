use thiserror::Error;

/// Invalid or incomplete configuration, detected before any work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_tokens must be greater than zero (got {0})")]
    InvalidMaxTokens(usize),

    #[error("no token counter available for model '{0}'")]
    UnknownModel(String),

    #[error("max_upload_mb must be greater than zero (got {0})")]
    InvalidMaxUploadMb(usize),
}
