//! Error types for the bounded cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the bounded cache.
///
/// Only construction can fail. Every mutation on a built cache is infallible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration values that make the eviction policy ill-defined
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the bounded cache.
pub type Result<T> = std::result::Result<T, CacheError>;
