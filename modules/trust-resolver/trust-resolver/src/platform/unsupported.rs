use async_trait::async_trait;
use trust_resolver_sdk::{AccountResolutionError, AccountResolverPluginClient, ResolvedIdentifier};

/// Resolver for hosts without an account identity subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatformResolver;

#[async_trait]
impl AccountResolverPluginClient for UnsupportedPlatformResolver {
    async fn resolve_account(
        &self,
        _account_name: &str,
    ) -> Result<ResolvedIdentifier, AccountResolutionError> {
        Err(AccountResolutionError::Unsupported)
    }
}
