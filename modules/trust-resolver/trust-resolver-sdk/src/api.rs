//! Public API trait for the trust resolver.

use async_trait::async_trait;

use crate::error::TrustResolverError;
use crate::models::TrustResolution;

/// Public API trait for the trust resolver.
///
/// One call performs one full resolution pass: load the configured account
/// names, resolve each of them concurrently and fold the outcomes into a
/// [`TrustResolution`]. Callers that need the result for the whole process
/// lifetime are expected to memoize it.
#[async_trait]
pub trait TrustResolverClient: Send + Sync {
    /// Run one resolution pass.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the configured account names cannot be loaded
    /// - `Internal` for unexpected errors
    ///
    /// A single account name failing to resolve is never an error; that name
    /// is simply missing from the result.
    async fn resolve(&self) -> Result<TrustResolution, TrustResolverError>;
}
