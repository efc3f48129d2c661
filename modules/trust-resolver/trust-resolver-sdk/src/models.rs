//! Domain models for the trust resolver.
//!
//! Account names and identifiers are compared case-insensitively. Keys are
//! lower-cased before comparison; the first spelling seen is kept for display.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AccountResolutionError;

fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// A security identifier produced by a successful account resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedIdentifier(String);

impl ResolvedIdentifier {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResolvedIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Outcome of resolving one configured account name.
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    /// The account name exactly as configured (before any machine-relative rewrite).
    pub name: String,
    pub result: Result<ResolvedIdentifier, AccountResolutionError>,
}

impl ResolutionOutcome {
    #[must_use]
    pub fn resolved(name: impl Into<String>, identifier: ResolvedIdentifier) -> Self {
        Self {
            name: name.into(),
            result: Ok(identifier),
        }
    }

    #[must_use]
    pub fn failed(name: impl Into<String>, error: AccountResolutionError) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }
}

/// One row of the [`ResolutionTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub identifier: ResolvedIdentifier,
}

/// Case-insensitive map from configured account name to its identifier.
///
/// Only successfully resolved names have an entry. Rows keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResolutionTable {
    rows: Vec<Resolution>,
    index: HashMap<String, usize>,
}

impl ResolutionTable {
    /// Fold a batch of per-name outcomes into a table. Failed outcomes are dropped.
    #[must_use]
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ResolutionOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut table, outcome| {
                if let Ok(identifier) = outcome.result {
                    table.insert(outcome.name, identifier);
                }
                table
            })
    }

    /// Insert a resolution. The first entry for a name wins; returns `false` if
    /// the name (case-insensitively) was already present.
    pub fn insert(&mut self, name: impl Into<String>, identifier: ResolvedIdentifier) -> bool {
        let name = name.into();
        let key = fold(&name);
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.rows.len());
        self.rows.push(Resolution { name, identifier });
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedIdentifier> {
        self.index
            .get(&fold(name))
            .and_then(|&i| self.rows.get(i))
            .map(|r| &r.identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Resolution> {
        self.rows.iter()
    }

    /// Identifiers of the given names that are present in the table, in
    /// first-seen order with duplicates collapsed.
    #[must_use]
    pub fn map_to_identifiers<I, S>(&self, names: I) -> TrustedIdentifierSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.get(name.as_ref()).cloned())
            .collect()
    }
}

/// Identifiers of the trusted service accounts, consulted on every request.
#[derive(Debug, Clone, Default)]
pub struct TrustedIdentifierSet {
    ordered: Vec<ResolvedIdentifier>,
    lookup: HashSet<String>,
}

impl TrustedIdentifierSet {
    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.lookup.contains(&fold(identifier))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Identifiers in configuration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &ResolvedIdentifier> {
        self.ordered.iter()
    }

    fn push(&mut self, identifier: ResolvedIdentifier) {
        if self.lookup.insert(fold(identifier.as_str())) {
            self.ordered.push(identifier);
        }
    }
}

impl FromIterator<ResolvedIdentifier> for TrustedIdentifierSet {
    fn from_iter<T: IntoIterator<Item = ResolvedIdentifier>>(iter: T) -> Self {
        let mut set = Self::default();
        for identifier in iter {
            set.push(identifier);
        }
        set
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct TrustResolution {
    table: ResolutionTable,
    trusted: TrustedIdentifierSet,
}

impl TrustResolution {
    /// Build the trusted set from `table`, following the order of `names`.
    #[must_use]
    pub fn new<I, S>(table: ResolutionTable, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trusted = table.map_to_identifiers(names);
        Self { table, trusted }
    }

    #[must_use]
    pub fn table(&self) -> &ResolutionTable {
        &self.table
    }

    #[must_use]
    pub fn trusted(&self) -> &TrustedIdentifierSet {
        &self.trusted
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sid(value: &str) -> ResolvedIdentifier {
        ResolvedIdentifier::new(value)
    }

    #[test]
    fn table_keys_are_case_insensitive() {
        let mut table = ResolutionTable::default();
        assert!(table.insert("CONTOSO\\Portal-Svc", sid("S-1-5-21-1-2-3-1104")));
        assert!(!table.insert("contoso\\portal-svc", sid("S-1-5-21-9-9-9-9")));

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("CONTOSO\\PORTAL-SVC").map(ResolvedIdentifier::as_str),
            Some("S-1-5-21-1-2-3-1104")
        );
        let row = table.entries().next().unwrap();
        assert_eq!(row.name, "CONTOSO\\Portal-Svc");
    }

    #[test]
    fn rows_keep_insertion_order() {
        let table = ResolutionTable::from_outcomes(vec![
            ResolutionOutcome::resolved("zeta", sid("S-1-3")),
            ResolutionOutcome::resolved("Alpha", sid("S-1-1")),
            ResolutionOutcome::resolved("mid", sid("S-1-2")),
        ]);

        let names: Vec<&str> = table.entries().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "Alpha", "mid"]);
    }

    #[test]
    fn from_outcomes_drops_failures() {
        let table = ResolutionTable::from_outcomes(vec![
            ResolutionOutcome::resolved("a", sid("S-1-1")),
            ResolutionOutcome::failed("b", AccountResolutionError::NotFound("b".to_owned())),
            ResolutionOutcome::failed("c", AccountResolutionError::Unsupported),
        ]);

        assert_eq!(table.len(), 1);
        assert!(table.get("b").is_none());
        assert!(table.get("c").is_none());
    }

    #[test]
    fn map_to_identifiers_uses_given_names_only() {
        let mut table = ResolutionTable::default();
        table.insert("a", sid("S-1-1"));
        table.insert("b", sid("S-1-2"));

        let set = table.map_to_identifiers(["b", "unknown"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("S-1-2"));
        assert!(!set.contains("S-1-1"));
    }

    #[test]
    fn map_to_identifiers_collapses_duplicates_in_order() {
        let mut table = ResolutionTable::default();
        table.insert("a", sid("S-1-1"));
        table.insert("b", sid("S-1-2"));
        table.insert("alias-of-a", sid("s-1-1"));

        let set = table.map_to_identifiers(["b", "A", "alias-of-a", "a"]);
        let values: Vec<&str> = set.identifiers().map(ResolvedIdentifier::as_str).collect();
        assert_eq!(values, vec!["S-1-2", "S-1-1"]);
    }

    #[test]
    fn identifier_set_lookup_ignores_case() {
        let set: TrustedIdentifierSet = vec![sid("S-1-5-21-1-2-3-500")].into_iter().collect();
        assert!(set.contains("s-1-5-21-1-2-3-500"));
        assert!(!set.contains("S-1-5-21-1-2-3-501"));
    }

    #[test]
    fn empty_resolution_has_empty_set() {
        let resolution = TrustResolution::new(ResolutionTable::default(), ["a", "b"]);
        assert!(resolution.table().is_empty());
        assert!(resolution.trusted().is_empty());
    }
}
