//! # Request Dispatcher
//!
//! Generic web-service call with reachability gating and a normalized
//! response envelope.
//!
//! ## Overview
//!
//! A call is described by a [`RequestDescriptor`]: URL, method, parameters,
//! optional image/video/audio payloads, and whether it needs the session
//! token and a loading indicator. [`Dispatcher::dispatch`] issues exactly
//! one HTTP request for it and returns either the parsed JSON body or a
//! synthetic `{errorCode, status: false, message}` envelope.
//!
//! ## Features
//!
//! - Multipart uploads whenever any payload entry is present
//! - Form/query encoding of parameters for plain requests
//! - `Authorization: Token <token>` from an injected [`IdentityProvider`]
//! - Offline short-circuit with a single user-facing toast

pub mod dispatcher;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod payload;
pub mod request;

pub use bridge_traits::http::HttpMethod;
pub use dispatcher::Dispatcher;
pub use envelope::{ErrorEnvelope, ResponseEnvelope};
pub use error::{DispatchError, Result};
pub use identity::{IdentityProvider, SettingsIdentity, StaticIdentity};
pub use payload::{Attachment, MediaKind, MediaPayload, PayloadSet};
pub use request::{Parameters, RequestDescriptor};
