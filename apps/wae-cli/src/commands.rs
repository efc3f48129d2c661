//! `status` and `trust` command implementations.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use trust_resolver::{
    Service, StaticAccountResolver, StaticAccountsConfig, TrustConfig, platform_account_resolver,
};
use trust_resolver_sdk::{AccountResolverPluginClient, TrustResolution};

/// One `trust` edit, applied in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustEdit {
    Add(String),
    Remove(String),
}

/// What a `trust` invocation changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TrustEditSummary {
    pub added: usize,
    pub removed: usize,
    /// Accounts not added because they were already listed.
    pub already_present: usize,
}

/// Apply `trust` edits to `cfg` in order.
///
/// Adding skips accounts already listed; removing drops every match. Both
/// compare case-insensitively.
pub fn apply_trust_edits(cfg: &mut TrustConfig, edits: &[TrustEdit]) -> TrustEditSummary {
    let mut summary = TrustEditSummary::default();

    for edit in edits {
        match edit {
            TrustEdit::Remove(name) => summary.removed += cfg.remove_account(name),
            TrustEdit::Add(name) if cfg.add_account(name) => summary.added += 1,
            TrustEdit::Add(_) => summary.already_present += 1,
        }
    }

    summary
}

/// `vgs-wae trust ...`
///
/// # Errors
///
/// Fails if the configuration cannot be loaded or saved.
pub async fn trust(config: Option<&Path>, edits: &[TrustEdit]) -> Result<()> {
    let mut cfg = TrustConfig::load(config)
        .await
        .context("Failed to load trust configuration")?;

    let summary = apply_trust_edits(&mut cfg, edits);

    cfg.save(config)
        .await
        .context("Failed to save trust configuration")?;

    info!(
        added = summary.added,
        removed = summary.removed,
        already_present = summary.already_present,
        accounts = cfg.trusted_service_accounts.len(),
        "Trust configuration updated"
    );
    Ok(())
}

/// `vgs-wae` / `vgs-wae status`
///
/// # Errors
///
/// Fails if the configuration or accounts map cannot be loaded, or stdout
/// cannot be written. Accounts that do not resolve are not errors.
pub async fn status(config: Option<&Path>, accounts_map: Option<&Path>) -> Result<()> {
    let cfg = TrustConfig::load(config)
        .await
        .context("Failed to load trust configuration")?;

    let accounts = account_resolver(accounts_map).await?;
    let resolution = Service::for_host(accounts)
        .resolve(&cfg.trusted_service_accounts)
        .await;

    let mut out = io::stdout().lock();
    render_status(&mut out, &cfg, &resolution).context("Failed to write status")?;
    Ok(())
}

async fn account_resolver(
    accounts_map: Option<&Path>,
) -> Result<Arc<dyn AccountResolverPluginClient>> {
    let Some(path) = accounts_map else {
        return Ok(platform_account_resolver());
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read accounts map '{}'", path.display()))?;
    let map: StaticAccountsConfig = serde_json::from_str(&text)
        .with_context(|| format!("Malformed accounts map '{}'", path.display()))?;

    Ok(Arc::new(StaticAccountResolver::from_config(&map)))
}

/// Usage, configuration, per-account resolutions and the trusted identifiers.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_status(
    out: &mut impl Write,
    cfg: &TrustConfig,
    resolution: &TrustResolution,
) -> io::Result<()> {
    writeln!(out, "Help:")?;
    writeln!(out, "vgs-wae status")?;
    writeln!(out, "vgs-wae trust [-r | --remove] [group/user]")?;
    writeln!(out)?;

    writeln!(out, "Config:")?;
    writeln!(out, "{cfg}")?;
    writeln!(out)?;

    writeln!(out, "Resolutions:")?;
    for row in resolution.table().entries() {
        writeln!(out, "{} = {}", row.name, row.identifier)?;
    }
    writeln!(out)?;

    writeln!(out, "Trusted:")?;
    for identifier in resolution.trusted().identifiers() {
        writeln!(out, "{identifier}")?;
    }
    writeln!(out)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use trust_resolver_sdk::{ResolutionTable, ResolvedIdentifier};

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn config(accounts: &[&str]) -> TrustConfig {
        TrustConfig {
            trusted_service_accounts: args(accounts),
        }
    }

    fn add(name: &str) -> TrustEdit {
        TrustEdit::Add(name.to_owned())
    }

    fn remove(name: &str) -> TrustEdit {
        TrustEdit::Remove(name.to_owned())
    }

    #[test]
    fn adds_new_accounts_and_skips_duplicates() {
        let mut cfg = config(&[r"CONTOSO\Svc"]);

        let summary =
            apply_trust_edits(&mut cfg, &[add(r"contoso\svc"), add(r"CONTOSO\Proxies")]);

        assert_eq!(summary.added, 1);
        assert_eq!(summary.already_present, 1);
        assert_eq!(cfg.trusted_service_accounts, vec![r"CONTOSO\Svc", r"CONTOSO\Proxies"]);
    }

    #[test]
    fn edits_apply_in_order() {
        let mut cfg = config(&["a", "b"]);

        let summary = apply_trust_edits(&mut cfg, &[remove("A"), add("c"), remove("b"), add("a")]);

        assert_eq!(summary.removed, 2);
        assert_eq!(summary.added, 2);
        assert_eq!(cfg.trusted_service_accounts, vec!["c", "a"]);
    }

    #[test]
    fn remove_drops_every_case_insensitive_match() {
        let mut cfg = config(&[r"CONTOSO\svc", r"contoso\SVC", "other"]);

        let summary = apply_trust_edits(&mut cfg, &[remove(r"Contoso\Svc")]);

        assert_eq!(summary.removed, 2);
        assert_eq!(cfg.trusted_service_accounts, vec!["other"]);
    }

    #[test]
    fn removing_missing_account_changes_nothing() {
        let mut cfg = config(&["a"]);

        let summary = apply_trust_edits(&mut cfg, &[remove("b")]);

        assert_eq!(summary, TrustEditSummary::default());
        assert_eq!(cfg.trusted_service_accounts, vec!["a"]);
    }

    #[test]
    fn status_lists_resolutions_and_trusted_identifiers() {
        let cfg = config(&[r".\TrustedSvc", "bad-account"]);
        let mut table = ResolutionTable::default();
        table.insert(r".\TrustedSvc", ResolvedIdentifier::new("S-1-5-21-1-2-3-500"));
        let resolution = TrustResolution::new(table, &cfg.trusted_service_accounts);

        let mut out = Vec::new();
        render_status(&mut out, &cfg, &resolution).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Config:"));
        assert!(text.contains("\"trustedServiceAccounts\""));
        assert!(text.contains(r".\TrustedSvc = S-1-5-21-1-2-3-500"));
        assert!(!text.contains("bad-account ="));
        assert!(text.contains("Trusted:\nS-1-5-21-1-2-3-500\n"));
    }
}
