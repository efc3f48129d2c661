//! Trust Resolver SDK
//!
//! This crate provides the public API for the trust resolver:
//!
//! - [`TrustResolverClient`] - Public API trait for consumers (the identity filter)
//! - [`AccountResolverPluginClient`] - Platform capability that turns an account name into a SID
//! - [`TrustedAccountSource`] - Where the configured account names come from
//! - [`ResolutionTable`], [`TrustedIdentifierSet`], [`TrustResolution`] - Resolution models
//! - [`TrustResolverError`], [`AccountResolutionError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use trust_resolver_sdk::TrustResolverClient;
//!
//! let resolution = client.resolve().await?;
//! if resolution.trusted().contains("S-1-5-21-1-2-3-500") {
//!     // caller is a trusted service account
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod source;

// Re-export main types at crate root
pub use api::TrustResolverClient;
pub use error::{AccountResolutionError, TrustResolverError};
pub use models::{
    Resolution, ResolutionOutcome, ResolutionTable, ResolvedIdentifier, TrustResolution,
    TrustedIdentifierSet,
};
pub use plugin_api::AccountResolverPluginClient;
pub use source::TrustedAccountSource;
