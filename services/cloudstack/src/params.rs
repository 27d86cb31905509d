use csgen_core::{Context, Error, Result};
use serde_json::{Map, Value};

use crate::constants::*;

/// Parameter map consumed by [`Configuration::new`](crate::Configuration::new).
///
/// Keys are parameter names in either `snake_case` or `camelCase`. Entries
/// keep insertion order and are bound in that order.
pub type Params = Map<String, Value>;

/// Env variables read by [`params_from_env`] and the parameter each feeds.
const ENV_PARAMS: [(&str, &str); 10] = [
    (CLOUDSTACK_API_KEY, "api_key"),
    (CLOUDSTACK_SECRET_KEY, "secret_key"),
    (CLOUDSTACK_SCHEME, "scheme"),
    (CLOUDSTACK_HOST, "host"),
    (CLOUDSTACK_PORT, "port"),
    (CLOUDSTACK_PATH_PREFIX, "path_prefix"),
    (CLOUDSTACK_API_PATH, "api_path"),
    (CLOUDSTACK_CONSOLE_PATH, "console_path"),
    (CLOUDSTACK_NAMESPACE, "namespace"),
    (CLOUDSTACK_OUTPUT_DIR, "output_dir"),
];

/// Convert a JSON value into a parameter map.
///
/// Only objects are accepted.
pub fn params_from_value(value: Value) -> Result<Params> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::config_invalid(format!(
            "parameters must be an object, got {}",
            value_kind(&other)
        ))),
    }
}

/// Parse a JSON document whose top level object is the parameter map.
pub fn params_from_json_str(content: &str) -> Result<Params> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| Error::config_invalid("failed to parse JSON parameters").with_source(e))?;
    params_from_value(value)
}

/// Parse a TOML document whose top level table is the parameter map.
pub fn params_from_toml_str(content: &str) -> Result<Params> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| Error::config_invalid("failed to parse TOML parameters").with_source(e))?;
    let value = serde_json::to_value(table)
        .map_err(|e| Error::config_invalid("failed to convert TOML parameters").with_source(e))?;
    params_from_value(value)
}

/// Collect parameters from the `CLOUDSTACK_*` variables visible in `ctx`.
///
/// Variables that are unset are skipped so that defaults still apply.
pub fn params_from_env(ctx: &Context) -> Params {
    let mut params = Params::new();
    for (env, name) in ENV_PARAMS {
        if let Some(v) = ctx.env_var(env) {
            params.insert(name.to_string(), Value::String(v));
        }
    }
    params
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
