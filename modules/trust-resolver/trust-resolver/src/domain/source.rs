//! Trusted account name sources.

use std::path::PathBuf;

use async_trait::async_trait;
use trust_resolver_sdk::{TrustResolverError, TrustedAccountSource};

use crate::config::TrustConfig;

#[async_trait]
impl TrustedAccountSource for TrustConfig {
    async fn trusted_account_names(&self) -> Result<Vec<String>, TrustResolverError> {
        Ok(self.trusted_service_accounts.clone())
    }
}

/// Reads the configuration file each time names are requested.
///
/// A missing file yields the built-in default list; a malformed file is a
/// `Configuration` error.
#[derive(Debug, Clone, Default)]
pub struct FileTrustSource {
    path: Option<PathBuf>,
}

impl FileTrustSource {
    /// Source reading `path`, or the default location next to the executable when `None`.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl TrustedAccountSource for FileTrustSource {
    async fn trusted_account_names(&self) -> Result<Vec<String>, TrustResolverError> {
        let config = TrustConfig::load(self.path.as_deref()).await?;
        Ok(config.trusted_service_accounts)
    }
}
