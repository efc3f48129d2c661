#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod claims;
pub mod principal;

pub use claims::{Claim, claim_types};
pub use principal::{Principal, PrincipalBuilder};
