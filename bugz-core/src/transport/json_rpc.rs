//! # JSON-RPC Transport
//!
//! A [`Transport`] talking to the `jsonrpc.cgi` endpoint every Bugzilla installation exposes.
//!
//! ## Envelope
//!
//! Each call is a single HTTP `POST` with the body:
//!
//! ```json
//! { "method": "Bug.get", "params": [{ "ids": 42 }], "id": 1 }
//! ```
//!
//! The server answers with either a `result` record or an `error` object carrying a fault code
//! and message. Faults are surfaced as [`TransportError::Fault`].
use super::{Transport, TransportError};
use crate::Record;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const ENDPOINT: &str = "jsonrpc.cgi";
const API_KEY_PARAM: &str = "Bugzilla_api_key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings of a [`JsonRpcTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRpcConfig {
    /// Root of the installation, e.g. `https://bugzilla.mozilla.org`.
    pub base_url: String,
    /// Sent as `Bugzilla_api_key` with every call when set.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl JsonRpcConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    method: &'a str,
    params: [&'a Record; 1],
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcFault>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// A transport speaking Bugzilla's JSON-RPC dialect over HTTP.
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    next_id: u64,
}

impl JsonRpcTransport {
    /// Creates a transport for the installation described by `config`.
    ///
    /// No request is sent until the first call.
    pub fn new(config: JsonRpcConfig) -> Result<Self, TransportError> {
        let endpoint = endpoint_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
            next_id: 1,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for JsonRpcTransport {
    async fn execute(&mut self, method: &str, mut params: Record) -> Result<Record, TransportError> {
        if let Some(api_key) = &self.api_key {
            params.insert(API_KEY_PARAM.to_string(), Value::String(api_key.clone()));
        }

        let id = self.next_id;
        self.next_id += 1;

        tracing::trace!(method, id, endpoint = %self.endpoint, "sending JSON-RPC request");

        let request = JsonRpcRequest {
            method,
            params: [&params],
            id,
        };

        let response: JsonRpcResponse = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        into_result(response)
    }
}

/// Resolves `jsonrpc.cgi` against `base_url`, tolerating a missing trailing slash.
fn endpoint_url(base_url: &str) -> Result<Url, TransportError> {
    let invalid = |source| TransportError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };

    let mut base = Url::parse(base_url).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(ENDPOINT).map_err(invalid)
}

fn into_result(response: JsonRpcResponse) -> Result<Record, TransportError> {
    if let Some(fault) = response.error {
        return Err(TransportError::Fault {
            code: fault.code,
            message: fault.message,
        });
    }

    match response.result {
        Some(Value::Object(result)) => Ok(result),
        // Some methods answer with an empty result
        None | Some(Value::Null) => Ok(Record::new()),
        Some(other) => Err(TransportError::MalformedResponse(format!(
            "expected a result record, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> JsonRpcResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_endpoint_is_resolved_against_base_url() {
        let with_slash = endpoint_url("https://bugs.example.org/bugzilla/").unwrap();
        let without_slash = endpoint_url("https://bugs.example.org/bugzilla").unwrap();

        assert_eq!(with_slash.as_str(), "https://bugs.example.org/bugzilla/jsonrpc.cgi");
        assert_eq!(without_slash, with_slash);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            endpoint_url("not a url"),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_request_envelope_shape() {
        let mut params = Record::new();
        params.insert("ids".to_string(), json!(42));

        let request = JsonRpcRequest {
            method: "Bug.get",
            params: [&params],
            id: 7,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "method": "Bug.get", "params": [{ "ids": 42 }], "id": 7 })
        );
    }

    #[test]
    fn test_fault_becomes_an_error() {
        let res = response(json!({
            "result": null,
            "error": { "code": 101, "message": "Bug #9 does not exist." },
            "id": 1
        }));

        match into_result(res) {
            Err(TransportError::Fault { code, message }) => {
                assert_eq!(code, 101);
                assert_eq!(message, "Bug #9 does not exist.");
            }
            other => panic!("expected a fault, got {other:?}"),
        }
    }

    #[test]
    fn test_result_record_is_returned() {
        let res = response(json!({ "result": { "id": 3 }, "error": null, "id": 1 }));

        let result = into_result(res).unwrap();

        assert_eq!(result["id"], 3);
    }

    #[test]
    fn test_non_record_result_is_malformed() {
        let res = response(json!({ "result": [1, 2], "id": 1 }));

        assert!(matches!(
            into_result(res),
            Err(TransportError::MalformedResponse(_))
        ));
    }
}
