//! Configuration and request signing for generated CloudStack API clients.
//!
//! A [`Configuration`] is built once per generator run from a parameter map.
//! It validates and normalizes the connection parameters, derives the
//! compiled base address, signs query strings with the secret key and maps
//! API commands to their event types.
//!
//! ## Example
//!
//! ```no_run
//! use csgen_cloudstack::{params_from_value, Configuration};
//! use csgen_core::Context;
//! use serde_json::json;
//!
//! # fn example() -> csgen_core::Result<()> {
//! let params = params_from_value(json!({
//!     "host": "10.0.0.1",
//!     "api_key": "my-api-key",
//!     "secret_key": "my-secret-key",
//! }))?;
//!
//! let config = Configuration::new(Context::new(), params)?;
//! assert_eq!(config.compiled_address(), "http://10.0.0.1:8080/client");
//!
//! let signature = config.build_signature("command=listZones&response=json")?;
//! assert!(!signature.is_empty());
//! assert_eq!(config.event_for_api("deployVirtualMachine"), "VM.CREATE");
//! # Ok(())
//! # }
//! ```

/// Emit a debug record through the configuration's injected logger.
macro_rules! debug {
    ($ctx:expr, $($arg:tt)+) => {
        $ctx.log(::log::Level::Debug, format_args!($($arg)+))
    };
}

/// Emit an info record through the configuration's injected logger.
macro_rules! info {
    ($ctx:expr, $($arg:tt)+) => {
        $ctx.log(::log::Level::Info, format_args!($($arg)+))
    };
}

mod address;
mod bind;
mod constants;
pub use constants::*;
mod normalize;

mod config;
pub use config::Configuration;

mod event;
pub use event::{ApiDescriptor, EventTypeMap};

mod params;
pub use params::{params_from_env, params_from_json_str, params_from_toml_str, params_from_value, Params};

mod sign_request;
