//! The neutralization decision.

use trust_resolver_sdk::TrustedIdentifierSet;
use wae_principal::{Claim, claim_types};

/// Claim types whose values identify the caller or one of its groups.
///
/// Other SID-bearing claims (deny-only groups and the like) are ignored.
pub const IDENTITY_CLAIM_TYPES: [&str; 2] = [claim_types::PRIMARY_SID, claim_types::GROUP_SID];

#[must_use]
pub fn is_identity_claim(claim: &Claim) -> bool {
    IDENTITY_CLAIM_TYPES.iter().any(|t| claim.is_type(t))
}

/// `true` iff any primary or group SID claim carries a trusted identifier.
///
/// Claim order does not matter.
#[must_use]
pub fn decide(claims: &[Claim], trusted: &TrustedIdentifierSet) -> bool {
    if trusted.is_empty() {
        return false;
    }
    claims
        .iter()
        .any(|claim| is_identity_claim(claim) && trusted.contains(claim.value()))
}
