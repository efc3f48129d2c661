//! axum binding of the identity filter.
//!
//! Runs after the host's authentication layer has placed a [`Principal`] in the
//! request extensions:
//!
//! ```ignore
//! router
//!     .layer(from_fn_with_state(filter, identity_filter_middleware))
//!     .layer(from_fn(host_authentication));
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use wae_principal::Principal;

use crate::stage::{IdentityFilter, RequestStage, StageOutcome};

/// Apply the identity filter, then continue with the rest of the pipeline.
///
/// A request without a principal is treated as anonymous and left untouched.
/// If the trusted set cannot be resolved the request fails with a 500 Problem
/// response and the application is not invoked.
pub async fn identity_filter_middleware(
    State(filter): State<IdentityFilter>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = match req.extensions_mut().get_mut::<Principal>() {
        Some(principal) => filter.apply(principal).await,
        None => filter.apply(&mut Principal::anonymous()).await,
    };

    match outcome {
        Ok(StageOutcome::Neutralized) => {
            tracing::debug!(path = %req.uri().path(), "Request continues as anonymous");
        }
        Ok(StageOutcome::PassedThrough) => {}
        Err(err) => {
            tracing::error!(error = %err, "Identity filter failed");
            return err.into_response();
        }
    }

    next.run(req).await
}
