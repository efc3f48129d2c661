//! Configuration-driven account resolver.
//!
//! Maps fully qualified account names to fixed identifiers. Used on hosts
//! without an identity subsystem and wherever resolution must be deterministic.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use trust_resolver_sdk::{AccountResolutionError, AccountResolverPluginClient, ResolvedIdentifier};

/// Static resolver configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAccountsConfig {
    /// Account-to-identifier mappings.
    pub accounts: Vec<AccountMapping>,
}

/// Maps one account name to its identifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountMapping {
    /// Fully qualified account name (`DOMAIN\name` or `MACHINE\name`).
    pub name: String,
    /// Security identifier returned for this account.
    pub sid: String,
}

/// Static account resolver.
///
/// Lookups are case-insensitive; the first mapping for a name wins.
#[derive(Debug, Clone, Default)]
pub struct StaticAccountResolver {
    accounts: HashMap<String, ResolvedIdentifier>,
}

impl StaticAccountResolver {
    /// Create a resolver from configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAccountsConfig) -> Self {
        Self::from_pairs(cfg.accounts.iter().map(|m| (m.name.as_str(), m.sid.as_str())))
    }

    /// Create a resolver from `(account name, identifier)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut accounts = HashMap::new();
        for (name, sid) in pairs {
            accounts
                .entry(name.to_lowercase())
                .or_insert_with(|| ResolvedIdentifier::new(sid));
        }
        Self { accounts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountResolverPluginClient for StaticAccountResolver {
    async fn resolve_account(
        &self,
        account_name: &str,
    ) -> Result<ResolvedIdentifier, AccountResolutionError> {
        self.accounts
            .get(&account_name.to_lowercase())
            .cloned()
            .ok_or_else(|| AccountResolutionError::NotFound(account_name.to_owned()))
    }
}
