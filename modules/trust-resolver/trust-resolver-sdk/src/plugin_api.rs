//! Platform capability used to translate account names into security identifiers.
//!
//! Implementations are selected once at startup. Hosts without an identity
//! subsystem use an implementation that always reports `Unsupported`.

use async_trait::async_trait;

use crate::error::AccountResolutionError;
use crate::models::ResolvedIdentifier;

#[async_trait]
pub trait AccountResolverPluginClient: Send + Sync {
    /// Translate a fully qualified account name (`DOMAIN\name` or `MACHINE\name`)
    /// into its security identifier.
    ///
    /// # Errors
    ///
    /// - `Unsupported` if the host has no identity subsystem
    /// - `NotFound` if the account does not exist
    /// - `Failed` for any other translation failure
    async fn resolve_account(
        &self,
        account_name: &str,
    ) -> Result<ResolvedIdentifier, AccountResolutionError>;
}
