//! # Transport
//!
//! The boundary between the library and the network.
//!
//! A [`Transport`] receives a method name and a parameter record, performs the remote call and
//! hands back the response record. Everything about how that happens (envelope encoding,
//! authentication, timeouts) belongs to the transport. Failures are reported as
//! [`TransportError`]s and propagated to the caller untouched, no retry happens on this side.
mod json_rpc;

pub use json_rpc::*;

use crate::Record;

/// Errors that can occur while performing a remote call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid base url '{url}': '{source}'")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Failed to build the HTTP client: '{0}'")]
    ClientBuild(#[source] reqwest::Error),
    #[error("HTTP request failed: '{0}'")]
    Http(#[from] reqwest::Error),
    #[error("Server returned fault {code}: {message}")]
    Fault { code: i64, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Performs remote calls on behalf of a [`crate::client::BugzillaClient`].
pub trait Transport {
    /// Calls `method` with `params` and returns the response record.
    fn execute(
        &mut self,
        method: &str,
        params: Record,
    ) -> impl Future<Output = Result<Record, TransportError>> + Send;
}
