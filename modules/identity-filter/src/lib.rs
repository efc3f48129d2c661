//! Identity Filter
//!
//! A request stage that runs before the application and replaces the caller's
//! principal with an anonymous one when the caller is a trusted service account
//! (the web adaptor's own identity) rather than a real end user.
//!
//! - [`decide`] - pure check of claims against the trusted identifier set
//! - [`TrustedSetResolver`] - resolves the trusted set once per process and shares it
//! - [`IdentityFilter`] - the [`RequestStage`] implementation
//! - [`identity_filter_middleware`] - axum binding of the stage
//!
//! ## Usage
//!
//! ```ignore
//! let filter = IdentityFilter::for_host(None);
//! let router = router.layer(axum::middleware::from_fn_with_state(
//!     filter,
//!     identity_filter::identity_filter_middleware,
//! ));
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod decision;
pub mod error;
pub mod middleware;
pub mod resolver;
pub mod stage;

pub use decision::{IDENTITY_CLAIM_TYPES, decide, is_identity_claim};
pub use error::FilterError;
pub use middleware::identity_filter_middleware;
pub use resolver::{ResolutionState, ResolvedSet, TrustedSetResolver};
pub use stage::{IdentityFilter, RequestStage, StageOutcome};
