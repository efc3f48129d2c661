//! Identity filter errors and their HTTP mapping.

use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;
use thiserror::Error;
use trust_resolver_sdk::TrustResolverError;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Error returned by the identity filter stage.
///
/// Resolution failures are memoized, so every request after the first failure
/// receives a clone of the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("trusted account resolution failed: {0}")]
    Resolution(#[from] TrustResolverError),
}

/// RFC 9457 Problem Details body.
#[derive(Debug, Serialize)]
struct Problem<'a> {
    #[serde(rename = "type")]
    type_url: &'a str,
    title: &'a str,
    status: u16,
    detail: &'a str,
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let problem = Problem {
            type_url: "about:blank",
            title: "Internal Server Error",
            status: status.as_u16(),
            detail: "Trusted service account resolution failed",
        };

        let body = serde_json::to_vec(&problem).unwrap_or_default();
        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}
