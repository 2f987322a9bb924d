//! # Bugzilla Client
//!
//! The [`BugzillaClient`] drives method descriptors through a [`Transport`].
//!
//! A call goes through three steps:
//!
//! 1. The descriptor provides the method name and its parameters.
//! 2. The transport performs the remote call.
//! 3. The response record is handed back to the descriptor, which decodes it on demand.
//!
//! The client is generic over its transport so that tests (or alternative protocols) can plug
//! in their own. [`BugzillaClient::connect`] builds a client over the JSON-RPC transport.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bugz_core::client::BugzillaClient;
//! use bugz_core::entity::{Bug, BugEntity};
//! use bugz_core::method::GetBug;
//! use bugz_core::transport::JsonRpcConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = BugzillaClient::connect(JsonRpcConfig::new("https://bugzilla.example.org"))?;
//!
//! let mut get_bug = GetBug::<Bug>::by_id(42);
//! client.call(&mut get_bug).await?;
//!
//! if let Some(bug) = get_bug.bug()? {
//!     println!("{:?}", bug.summary()?);
//! }
//! # Ok(())
//! # }
//! ```
use crate::{
    method::{BugzillaMethod, MethodError},
    transport::{JsonRpcConfig, JsonRpcTransport, Transport, TransportError},
};

/// Errors that can occur while executing a method.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("Remote call failed: '{0}'")]
    Transport(#[from] TransportError),
    #[error("Invalid method response: '{0}'")]
    Method(#[from] MethodError),
}

/// Executes [`BugzillaMethod`]s against a Bugzilla server.
#[derive(Debug, Clone)]
pub struct BugzillaClient<T> {
    transport: T,
}

impl BugzillaClient<JsonRpcTransport> {
    /// Creates a client talking JSON-RPC to the installation described by `config`.
    pub fn connect(config: JsonRpcConfig) -> Result<Self, TransportError> {
        JsonRpcTransport::new(config).map(Self::new)
    }
}

impl<T: Transport> BugzillaClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Calls the remote method described by `method` and stores the response in it.
    ///
    /// On transport failure the descriptor is left untouched.
    pub async fn call<M: BugzillaMethod>(&mut self, method: &mut M) -> Result<(), CallError> {
        let name = method.method_name();
        tracing::debug!(method = name, "executing Bugzilla method");

        let response = self.transport.execute(name, method.parameters()).await?;
        method.set_result(response)?;

        Ok(())
    }
}
