//! Trust Resolver
//!
//! Loads the configured trusted service accounts and resolves each of them
//! to a security identifier through the platform account resolver selected at
//! startup. Implements `TrustResolverClient` for the identity filter.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod platform;

pub use config::{ConfigError, DEFAULT_TRUSTED_ACCOUNT, TrustConfig};
pub use domain::{FileTrustSource, Service, TrustResolverLocalClient};
pub use platform::{
    StaticAccountResolver, StaticAccountsConfig, UnsupportedPlatformResolver,
    platform_account_resolver,
};
