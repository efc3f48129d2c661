//! Source of the configured trusted account names.

use async_trait::async_trait;

use crate::error::TrustResolverError;

#[async_trait]
pub trait TrustedAccountSource: Send + Sync {
    /// Ordered list of configured trusted account names, duplicates included.
    ///
    /// # Errors
    ///
    /// `Configuration` if persisted configuration exists but cannot be read or parsed.
    async fn trusted_account_names(&self) -> Result<Vec<String>, TrustResolverError>;
}
