//! Core components for configuring and signing CloudStack API calls.
//!
//! This crate provides the foundational types shared by the csgen crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds the injected collaborators: the HTTP
//!   transport ([`HttpSend`]), environment access ([`Env`]) and the logger
//!   (any [`log::Log`]).
//! - **Error**: A single error type whose [`ErrorKind`] tells operators exactly
//!   which configuration field or precondition failed.
//!
//! ## Example
//!
//! ```
//! use csgen_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("CLOUDSTACK_HOST".to_string(), "10.0.0.1".to_string())]),
//! });
//!
//! assert_eq!(ctx.env_var("CLOUDSTACK_HOST").as_deref(), Some("10.0.0.1"));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC-SHA1 and base64 helpers
//! - [`utils`]: General utilities including secret redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopLog, OsEnv, StaticEnv, LOG_TARGET};

mod error;
pub use error::{Error, ErrorKind, Result};
