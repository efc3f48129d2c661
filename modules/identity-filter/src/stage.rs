//! The request stage abstraction and the identity filter stage.

use std::sync::Arc;

use async_trait::async_trait;
use trust_resolver::{FileTrustSource, Service, TrustResolverLocalClient, platform_account_resolver};
use trust_resolver_sdk::TrustResolverClient;
use wae_principal::Principal;

use crate::decision::decide;
use crate::error::FilterError;
use crate::resolver::TrustedSetResolver;

/// What a stage did to the request principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The principal is unchanged.
    PassedThrough,
    /// The principal was replaced by an anonymous one.
    Neutralized,
}

/// A pluggable step that runs before the application sees the request.
///
/// The host always continues to the next stage after a successful `apply`,
/// whatever the outcome.
#[async_trait]
pub trait RequestStage: Send + Sync {
    /// Inspect and possibly replace the principal of the current request.
    ///
    /// # Errors
    ///
    /// Implementation-specific; the host must not continue the pipeline.
    async fn apply(&self, principal: &mut Principal) -> Result<StageOutcome, FilterError>;
}

/// Replaces trusted service account principals with anonymous ones.
///
/// Cheap to clone; clones share the memoized trusted set.
#[derive(Clone, Debug)]
pub struct IdentityFilter {
    resolver: Arc<TrustedSetResolver>,
}

impl IdentityFilter {
    #[must_use]
    pub fn new(resolver: Arc<TrustedSetResolver>) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn from_client(client: Arc<dyn TrustResolverClient>) -> Self {
        Self::new(Arc::new(TrustedSetResolver::new(client)))
    }

    /// Filter wired to the configuration file and the host's account resolver.
    ///
    /// `config_path` of `None` uses the file next to the running executable.
    #[must_use]
    pub fn for_host(config_path: Option<std::path::PathBuf>) -> Self {
        let svc = Service::for_host(platform_account_resolver());
        let client = TrustResolverLocalClient::new(
            Arc::new(FileTrustSource::new(config_path)),
            Arc::new(svc),
        );
        Self::from_client(Arc::new(client))
    }

    #[must_use]
    pub fn resolver(&self) -> &TrustedSetResolver {
        &self.resolver
    }
}

#[async_trait]
impl RequestStage for IdentityFilter {
    async fn apply(&self, principal: &mut Principal) -> Result<StageOutcome, FilterError> {
        let resolved = self.resolver.get_resolved_set().await?;

        if !decide(principal.claims(), resolved.trusted()) {
            return Ok(StageOutcome::PassedThrough);
        }

        tracing::debug!(
            identity = principal.name(),
            "Trusted service account identity replaced with anonymous"
        );
        *principal = Principal::anonymous();
        Ok(StageOutcome::Neutralized)
    }
}
