//! Local (in-process) client for the trust resolver.

use std::sync::Arc;

use async_trait::async_trait;
use trust_resolver_sdk::{
    TrustResolution, TrustResolverClient, TrustResolverError, TrustedAccountSource,
};

use super::Service;

/// Local client: loads names from the source, then runs one resolution pass.
pub struct TrustResolverLocalClient {
    source: Arc<dyn TrustedAccountSource>,
    svc: Arc<Service>,
}

impl TrustResolverLocalClient {
    #[must_use]
    pub fn new(source: Arc<dyn TrustedAccountSource>, svc: Arc<Service>) -> Self {
        Self { source, svc }
    }
}

fn log_and_convert(op: &str, e: TrustResolverError) -> TrustResolverError {
    tracing::error!(operation = op, error = %e, "trust_resolver call failed");
    e
}

#[async_trait]
impl TrustResolverClient for TrustResolverLocalClient {
    async fn resolve(&self) -> Result<TrustResolution, TrustResolverError> {
        let names = self
            .source
            .trusted_account_names()
            .await
            .map_err(|e| log_and_convert("trusted_account_names", e))?;

        Ok(self.svc.resolve(&names).await)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TrustConfig;
    use crate::platform::StaticAccountResolver;

    struct FailingSource;

    #[async_trait]
    impl TrustedAccountSource for FailingSource {
        async fn trusted_account_names(&self) -> Result<Vec<String>, TrustResolverError> {
            Err(TrustResolverError::Configuration("broken".to_owned()))
        }
    }

    #[tokio::test]
    async fn resolves_names_from_source() {
        let source = TrustConfig {
            trusted_service_accounts: vec![r"CONTOSO\svc".to_owned(), "missing".to_owned()],
        };
        let resolver = StaticAccountResolver::from_pairs([(r"CONTOSO\svc", "S-1-5-21-1-1-1-500")]);
        let client = TrustResolverLocalClient::new(
            Arc::new(source),
            Arc::new(Service::new(Arc::new(resolver), None)),
        );

        let resolution = client.resolve().await.unwrap();
        assert_eq!(resolution.table().len(), 1);
        assert!(resolution.trusted().contains("S-1-5-21-1-1-1-500"));
    }

    #[tokio::test]
    async fn source_failure_fails_the_pass() {
        let client = TrustResolverLocalClient::new(
            Arc::new(FailingSource),
            Arc::new(Service::new(Arc::new(StaticAccountResolver::default()), None)),
        );

        let err = client.resolve().await.unwrap_err();
        assert_eq!(err, TrustResolverError::Configuration("broken".to_owned()));
    }
}
