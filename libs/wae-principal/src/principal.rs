use serde::{Deserialize, Serialize};

use crate::claims::Claim;

/// `Principal` is the caller identity attached to a single request.
///
/// The host's authentication layer builds it and stores it on the request; request
/// stages may replace it before the application sees it. A principal is owned by
/// one request and never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity name, e.g. `DOMAIN\user`. Empty for the anonymous principal.
    name: String,
    /// Authentication scheme that produced the identity (e.g. "Negotiate").
    authentication_type: Option<String>,
    /// Claims presented by the caller, in the order the host issued them.
    #[serde(default)]
    claims: Vec<Claim>,
}

impl Default for Principal {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Principal {
    /// Create a new `Principal` builder
    #[must_use]
    pub fn builder() -> PrincipalBuilder {
        PrincipalBuilder::default()
    }

    /// Create an anonymous `Principal`: empty name, no authentication scheme, no claims
    #[must_use]
    pub fn anonymous() -> Self {
        PrincipalBuilder::default().build()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// A principal is authenticated when it carries a non-empty identity name.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.name.is_empty()
    }

    /// True only for a principal with no name, no scheme and no claims.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() && self.authentication_type.is_none() && self.claims.is_empty()
    }
}

#[derive(Default)]
pub struct PrincipalBuilder {
    name: Option<String>,
    authentication_type: Option<String>,
    claims: Vec<Claim>,
}

impl PrincipalBuilder {
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn authentication_type(mut self, scheme: &str) -> Self {
        self.authentication_type = Some(scheme.to_owned());
        self
    }

    #[must_use]
    pub fn claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    #[must_use]
    pub fn claims(mut self, claims: Vec<Claim>) -> Self {
        self.claims = claims;
        self
    }

    #[must_use]
    pub fn build(self) -> Principal {
        Principal {
            name: self.name.unwrap_or_default(),
            authentication_type: self.authentication_type,
            claims: self.claims,
        }
    }
}
