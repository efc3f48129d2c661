//! Platform account resolvers.
//!
//! The resolver is chosen once at startup by [`platform_account_resolver`].
//! Hosts without an account identity subsystem get a resolver that reports
//! every name as unsupported, which leaves the trusted set empty.

use std::sync::Arc;

use trust_resolver_sdk::AccountResolverPluginClient;

pub mod nt_account;
pub mod static_accounts;
pub mod unsupported;

pub use static_accounts::{AccountMapping, StaticAccountResolver, StaticAccountsConfig};
pub use unsupported::UnsupportedPlatformResolver;
pub use nt_account::NtAccountResolver;

/// Select the account resolver for the current host.
#[must_use]
pub fn platform_account_resolver() -> Arc<dyn AccountResolverPluginClient> {
    #[cfg(windows)]
    {
        Arc::new(NtAccountResolver::default())
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedPlatformResolver)
    }
}

/// Name of the local machine, used to qualify machine-relative account names.
///
/// Prefers `COMPUTERNAME` (the `NetBIOS` name on Windows) over the DNS host name.
#[must_use]
pub fn machine_name() -> Option<String> {
    if let Ok(name) = std::env::var("COMPUTERNAME")
        && !name.is_empty()
    {
        return Some(name);
    }

    match hostname::get() {
        Ok(name) => name.into_string().ok().filter(|n| !n.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read host name");
            None
        }
    }
}

/// Whether `value` has the textual shape of a security identifier (`S-1-5-21-...`).
#[must_use]
pub fn is_well_formed_sid(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("S-") else {
        return false;
    };

    let mut parts = 0usize;
    for part in rest.split('-') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts >= 2
}
