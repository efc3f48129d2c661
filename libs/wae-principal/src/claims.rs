//! Claim model and the claim type vocabulary used by the host.

use serde::{Deserialize, Serialize};

/// Claim type URIs as issued by the Windows authentication handlers.
///
/// Matching against these is exact string equality.
pub mod claim_types {
    /// The caller's own security identifier.
    pub const PRIMARY_SID: &str =
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/primarysid";

    /// Security identifier of a group the caller belongs to.
    pub const GROUP_SID: &str =
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/groupsid";

    /// Display name of the caller.
    pub const NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";

    /// Security identifier of a deny-only group. Not treated as an identity claim.
    pub const DENY_ONLY_SID: &str =
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/denyonlysid";
}

/// A single `(type, value)` pair presented by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    claim_type: String,
    value: String,
}

impl Claim {
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Primary SID claim for the given identifier.
    #[must_use]
    pub fn primary_sid(value: impl Into<String>) -> Self {
        Self::new(claim_types::PRIMARY_SID, value)
    }

    /// Group SID claim for the given identifier.
    #[must_use]
    pub fn group_sid(value: impl Into<String>) -> Self {
        Self::new(claim_types::GROUP_SID, value)
    }

    #[must_use]
    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this claim has exactly the given type.
    #[must_use]
    pub fn is_type(&self, claim_type: &str) -> bool {
        self.claim_type == claim_type
    }
}
