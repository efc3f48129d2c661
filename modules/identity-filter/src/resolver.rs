//! Process-wide, lazily resolved trusted identifier set.
//!
//! The first request starts a single resolution pass on its own task. Every
//! concurrent or later caller awaits that same pass and receives the same
//! outcome, success or failure. Dropping a waiting request does not cancel the
//! pass and never causes a second one.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use trust_resolver_sdk::{
    TrustResolution, TrustResolverClient, TrustResolverError, TrustedIdentifierSet,
};

use crate::error::FilterError;

type Outcome = Result<Arc<TrustResolution>, TrustResolverError>;
type PendingResolution = Shared<BoxFuture<'static, Outcome>>;

const UNINITIALIZED: u8 = 0;
const RESOLVING: u8 = 1;
const READY: u8 = 2;
const FAILED: u8 = 3;

/// Lifecycle of the memoized resolution. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Uninitialized,
    Resolving,
    Ready,
    Failed,
}

impl ResolutionState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            UNINITIALIZED => Self::Uninitialized,
            RESOLVING => Self::Resolving,
            READY => Self::Ready,
            _ => Self::Failed,
        }
    }
}

/// The resolved trusted set, shared by every request.
#[derive(Debug, Clone)]
pub struct ResolvedSet(Arc<TrustResolution>);

impl ResolvedSet {
    #[must_use]
    pub fn trusted(&self) -> &TrustedIdentifierSet {
        self.0.trusted()
    }

    /// `true` if both handles point at the same memoized pass.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for ResolvedSet {
    type Target = TrustedIdentifierSet;

    fn deref(&self) -> &Self::Target {
        self.trusted()
    }
}

/// Memoizes one [`TrustResolverClient::resolve`] call for the life of the value.
pub struct TrustedSetResolver {
    client: Arc<dyn TrustResolverClient>,
    pending: OnceLock<PendingResolution>,
    state: Arc<AtomicU8>,
}

impl TrustedSetResolver {
    #[must_use]
    pub fn new(client: Arc<dyn TrustResolverClient>) -> Self {
        Self {
            client,
            pending: OnceLock::new(),
            state: Arc::new(AtomicU8::new(UNINITIALIZED)),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResolutionState {
        ResolutionState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Return the trusted set, starting the resolution pass on first use.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// `FilterError::Resolution` if the pass failed. The failure is permanent
    /// for this resolver; later calls return the same error without retrying.
    pub async fn get_resolved_set(&self) -> Result<ResolvedSet, FilterError> {
        let pending = self.pending.get_or_init(|| self.start()).clone();
        pending.await.map(ResolvedSet).map_err(FilterError::from)
    }

    fn start(&self) -> PendingResolution {
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        state.store(RESOLVING, Ordering::Release);

        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            let outcome = client.resolve().await.map(Arc::new);
            match &outcome {
                Ok(resolution) => {
                    tracing::info!(
                        trusted = resolution.trusted().len(),
                        "Trusted identifier set ready"
                    );
                    task_state.store(READY, Ordering::Release);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Trusted identifier resolution failed");
                    task_state.store(FAILED, Ordering::Release);
                }
            }
            outcome
        });

        async move {
            task.await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Trusted identifier resolution task aborted");
                state.store(FAILED, Ordering::Release);
                Err(TrustResolverError::Internal(format!(
                    "resolution task aborted: {e}"
                )))
            })
        }
        .boxed()
        .shared()
    }
}

impl fmt::Debug for TrustedSetResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustedSetResolver")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
