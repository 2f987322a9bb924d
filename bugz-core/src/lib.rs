//! # Bugz Core
//!
//! `bugz-core` is the foundational library powering the Bugz CLI. It maps the loosely-typed
//! payloads exchanged with a Bugzilla server into typed entities, and back.
//!
//! ## Key Components
//!
//! * **[`entity::EntityRecord`]:** The key-value record backing every entity, with checked,
//!   typed accessors over `serde_json::Value`.
//! * **Entities:** [`entity::Bug`], [`entity::EcsBug`], [`entity::Product`] and its children,
//!   [`entity::BugField`] and [`entity::BugFieldValue`].
//! * **Factories:** [`factory::BugFactory`] and [`factory::ProductFactory`] either wrap a record
//!   received from the server or build a new entity through an exclusive builder session.
//! * **Methods:** One descriptor per remote method (`Bug.get`, `Bug.search`, `Bug.update`,
//!   `Bug.add_comment`, `Product.get`, `Bug.fields`). Each knows its parameters and how to
//!   decode its response.
//! * **[`client::BugzillaClient`]:** Drives a method descriptor through a [`transport::Transport`].
//!
//! ## Transport
//!
//! The library does not care how a call reaches the server. Anything implementing
//! [`transport::Transport`] can be plugged into the client. [`transport::JsonRpcTransport`]
//! talks to Bugzilla's `jsonrpc.cgi` endpoint over HTTP.
//!
//! ## Re-exports
//!
//! This crate re-exports `serde_json` so that consumers build parameters and inspect
//! responses with a compatible version.
pub mod client;
pub mod entity;
pub mod factory;
pub mod method;
pub mod transport;

// Re-exports
pub use serde_json;

/// The raw key-value shape of every payload going to or coming from the server.
pub type Record = serde_json::Map<String, serde_json::Value>;
