//! NT account resolver, selected on Windows hosts.
//!
//! Translates NT account names through `System.Security.Principal.NTAccount`
//! in a short-lived `PowerShell` process. The account name reaches the script
//! through an environment variable and is never spliced into the command text.

use async_trait::async_trait;
use tokio::process::Command;
use trust_resolver_sdk::{AccountResolutionError, AccountResolverPluginClient, ResolvedIdentifier};

use super::is_well_formed_sid;

const ACCOUNT_ENV: &str = "WAE_ACCOUNT_NAME";
const TRANSLATE_SCRIPT: &str = "(New-Object System.Security.Principal.NTAccount($env:WAE_ACCOUNT_NAME)).Translate([System.Security.Principal.SecurityIdentifier]).Value";

#[derive(Debug, Clone)]
pub struct NtAccountResolver {
    program: String,
}

impl Default for NtAccountResolver {
    fn default() -> Self {
        Self {
            program: "powershell.exe".to_owned(),
        }
    }
}

#[async_trait]
impl AccountResolverPluginClient for NtAccountResolver {
    async fn resolve_account(
        &self,
        account_name: &str,
    ) -> Result<ResolvedIdentifier, AccountResolutionError> {
        let output = Command::new(&self.program)
            .args(["-NoLogo", "-NoProfile", "-NonInteractive", "-Command", TRANSLATE_SCRIPT])
            .env(ACCOUNT_ENV, account_name)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AccountResolutionError::Failed(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            tracing::debug!(
                account = account_name,
                status = %output.status,
                stderr,
                "NTAccount translation failed"
            );
            return Err(AccountResolutionError::Failed(format!(
                "translation of '{account_name}' exited with {}: {stderr}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let sid = stdout.trim();
        if is_well_formed_sid(sid) {
            Ok(ResolvedIdentifier::new(sid))
        } else {
            Err(AccountResolutionError::Failed(format!(
                "unexpected translation output for '{account_name}'"
            )))
        }
    }
}
