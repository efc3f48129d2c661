//! Resolution service: turns configured account names into a `TrustResolution`.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use trust_resolver_sdk::{
    AccountResolutionError, AccountResolverPluginClient, ResolutionOutcome, ResolutionTable,
    TrustResolution,
};

use crate::platform;

/// Prefixes marking an account on the local machine (`.\name`).
const MACHINE_RELATIVE_PREFIXES: [&str; 2] = [".\\", "./"];

/// Trust resolver service.
///
/// Every distinct configured name is resolved on its own task; a failure of one
/// name never affects the others and never fails the pass.
pub struct Service {
    accounts: Arc<dyn AccountResolverPluginClient>,
    machine_name: Option<String>,
}

impl Service {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountResolverPluginClient>, machine_name: Option<String>) -> Self {
        Self {
            accounts,
            machine_name,
        }
    }

    /// Service using the host's machine name for `.\` accounts.
    #[must_use]
    pub fn for_host(accounts: Arc<dyn AccountResolverPluginClient>) -> Self {
        Self::new(accounts, platform::machine_name())
    }

    /// Resolve all configured names. Waits for every name to finish.
    #[tracing::instrument(skip_all, fields(configured = names.len()))]
    pub async fn resolve(&self, names: &[String]) -> TrustResolution {
        let outcomes = self.resolve_each(distinct_names(names)).await;
        let table = ResolutionTable::from_outcomes(outcomes);
        let resolution = TrustResolution::new(table, names);

        info!(
            resolved = resolution.table().len(),
            trusted = resolution.trusted().len(),
            "Resolved trusted service accounts"
        );
        resolution
    }

    /// Outcomes come back in the order of `names`, whatever order the tasks finish in.
    async fn resolve_each(&self, names: Vec<String>) -> Vec<ResolutionOutcome> {
        let mut tasks = JoinSet::new();

        for (position, name) in names.into_iter().enumerate() {
            let accounts = Arc::clone(&self.accounts);
            let target = self.qualify(&name);
            tasks.spawn(async move {
                let result = match target {
                    Ok(target) => accounts.resolve_account(&target).await,
                    Err(e) => Err(e),
                };
                (position, ResolutionOutcome { name, result })
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, outcome)) => {
                    if let Err(e) = &outcome.result {
                        debug!(
                            account = %outcome.name,
                            error = %e,
                            "Trusted account did not resolve"
                        );
                    }
                    outcomes.push((position, outcome));
                }
                Err(e) => warn!(error = %e, "Account resolution task aborted"),
            }
        }
        outcomes.sort_by_key(|(position, _)| *position);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    /// Rewrite a machine-relative name to `<MACHINE>\name`; other names pass unchanged.
    fn qualify(&self, name: &str) -> Result<String, AccountResolutionError> {
        let Some(rest) = MACHINE_RELATIVE_PREFIXES
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
        else {
            return Ok(name.to_owned());
        };

        self.machine_name
            .as_deref()
            .map(|machine| format!("{machine}\\{rest}"))
            .ok_or_else(|| AccountResolutionError::Failed("machine name is unavailable".to_owned()))
    }
}

/// Distinct names in first-seen order, compared case-insensitively.
fn distinct_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| seen.insert(name.to_lowercase()))
        .cloned()
        .collect()
}
