//! Error types for the trust resolver.

use thiserror::Error;

/// Errors that fail a whole resolution pass.
///
/// `Clone` so a memoized failure can be handed to every caller awaiting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustResolverError {
    /// The trusted account configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure to translate one account name. Never fails a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountResolutionError {
    /// The host has no account identity subsystem.
    #[error("account resolution is not supported on this platform")]
    Unsupported,

    /// The account does not exist.
    #[error("account not found: {0}")]
    NotFound(String),

    /// Translation failed for another reason.
    #[error("account resolution failed: {0}")]
    Failed(String),
}
