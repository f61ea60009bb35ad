//! Token counting capabilities used to measure chunk budgets.

pub mod tiktoken;
pub mod traits;

pub use tiktoken::TiktokenCounter;
pub use traits::{TokenCounter, TokenCounterRef, TokenizerError};
