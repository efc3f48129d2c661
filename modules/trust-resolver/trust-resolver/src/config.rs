//! Persisted trusted service account configuration.
//!
//! The file is a small JSON document stored next to the running executable:
//!
//! ```json
//! {
//!   "trustedServiceAccounts": [
//!     ".\\ArcGIS Web Adaptor Trusted Service Accounts"
//!   ]
//! }
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trust_resolver_sdk::TrustResolverError;

/// Placeholder entry used when no configuration file exists.
pub const DEFAULT_TRUSTED_ACCOUNT: &str = r".\ArcGIS Web Adaptor Trusted Service Accounts";

const CONFIG_EXTENSION: &str = "json";
const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine default configuration path: {0}")]
    DefaultPath(#[source] io::Error),

    #[error("failed to read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write configuration '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<ConfigError> for TrustResolverError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e.to_string())
    }
}

/// Trusted service account configuration.
///
/// Unknown keys are ignored so that annotated or newer files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustConfig {
    /// Account or group names whose callers are treated as anonymous.
    #[serde(default)]
    pub trusted_service_accounts: Vec<String>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            trusted_service_accounts: vec![DEFAULT_TRUSTED_ACCOUNT.to_owned()],
        }
    }
}

impl TrustConfig {
    /// `<path of the running executable>.json`
    ///
    /// # Errors
    ///
    /// `DefaultPath` if the executable path cannot be determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let exe = std::env::current_exe().map_err(ConfigError::DefaultPath)?;
        let mut path = exe.into_os_string();
        path.push(".");
        path.push(CONFIG_EXTENSION);
        Ok(PathBuf::from(path))
    }

    /// Load the configuration from `path`, or from [`Self::default_path`].
    ///
    /// A missing file yields [`TrustConfig::default`].
    ///
    /// # Errors
    ///
    /// - `Read` if the file exists but cannot be read
    /// - `Parse` if the file is not a valid configuration document
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = resolve_path(path)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "No trust configuration file, using defaults"
                );
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::from_json(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Persist the configuration to `path`, or to [`Self::default_path`].
    ///
    /// # Errors
    ///
    /// - `Serialize` if the document cannot be rendered
    /// - `Write` if the file cannot be written
    pub async fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = resolve_path(path)?;
        let json = self.to_json_pretty()?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ConfigError::Write { path, source })
    }

    /// Parse a configuration document. A leading byte order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is malformed.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim_start_matches(UTF8_BOM))
    }

    /// # Errors
    ///
    /// `Serialize` if the document cannot be rendered.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Add an account unless it is already listed (case-insensitive).
    ///
    /// Returns `true` if the list changed.
    pub fn add_account(&mut self, name: &str) -> bool {
        if self.contains_account(name) {
            return false;
        }
        self.trusted_service_accounts.push(name.to_owned());
        true
    }

    /// Remove every case-insensitive match of `name`. Returns how many entries were removed.
    pub fn remove_account(&mut self, name: &str) -> usize {
        let before = self.trusted_service_accounts.len();
        self.trusted_service_accounts
            .retain(|existing| !eq_folded(existing, name));
        before - self.trusted_service_accounts.len()
    }

    #[must_use]
    pub fn contains_account(&self, name: &str) -> bool {
        self.trusted_service_accounts
            .iter()
            .any(|existing| eq_folded(existing, name))
    }
}

impl fmt::Display for TrustConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_pretty().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    path.map_or_else(TrustConfig::default_path, |p| Ok(p.to_path_buf()))
}

fn eq_folded(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_contains_placeholder_account() {
        let cfg = TrustConfig::default();
        assert_eq!(cfg.trusted_service_accounts, vec![DEFAULT_TRUSTED_ACCOUNT]);
    }

    #[test]
    fn parses_camel_case_document() {
        let cfg = TrustConfig::from_json(
            r#"{ "trustedServiceAccounts": [".\\svc-portal", "CONTOSO\\WA Proxies"] }"#,
        )
        .unwrap();

        assert_eq!(
            cfg.trusted_service_accounts,
            vec![r".\svc-portal", r"CONTOSO\WA Proxies"]
        );
    }

    #[test]
    fn empty_document_has_no_accounts() {
        let cfg = TrustConfig::from_json("{}").unwrap();
        assert!(cfg.trusted_service_accounts.is_empty());
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let cfg = TrustConfig::from_json("\u{feff}{\"trustedServiceAccounts\":[\"a\"]}").unwrap();
        assert_eq!(cfg.trusted_service_accounts, vec!["a"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let cfg = TrustConfig::from_json(
            r#"{ "trustedServiceAccounts": ["CONTOSO\\svc"], "comment": "x" }"#,
        )
        .unwrap();

        assert_eq!(cfg.trusted_service_accounts, vec![r"CONTOSO\svc"]);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let result = TrustConfig::from_json(r#"{ "trustedServiceAccounts": "a" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn add_account_skips_case_insensitive_duplicates() {
        let mut cfg = TrustConfig {
            trusted_service_accounts: vec![r"CONTOSO\Svc".to_owned()],
        };

        assert!(!cfg.add_account(r"contoso\svc"));
        assert!(cfg.add_account(r"CONTOSO\Other"));
        assert_eq!(cfg.trusted_service_accounts.len(), 2);
    }

    #[test]
    fn remove_account_drops_all_matches() {
        let mut cfg = TrustConfig {
            trusted_service_accounts: vec![
                r"CONTOSO\Svc".to_owned(),
                r"contoso\svc".to_owned(),
                r"CONTOSO\Other".to_owned(),
            ],
        };

        assert_eq!(cfg.remove_account(r"Contoso\SVC"), 2);
        assert_eq!(cfg.trusted_service_accounts, vec![r"CONTOSO\Other"]);
        assert_eq!(cfg.remove_account("missing"), 0);
    }

    #[test]
    fn display_renders_pretty_json() {
        let rendered = TrustConfig::default().to_string();
        assert!(rendered.contains("\"trustedServiceAccounts\""));
        assert!(rendered.contains('\n'));
    }

    #[test]
    fn config_error_maps_to_configuration_error() {
        let source = TrustConfig::from_json("not json").unwrap_err();
        let err: TrustResolverError = ConfigError::Parse {
            path: PathBuf::from("wae.json"),
            source,
        }
        .into();

        assert!(matches!(err, TrustResolverError::Configuration(msg) if msg.contains("wae.json")));
    }
}
