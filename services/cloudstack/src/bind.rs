//! Parameter binding.
//!
//! Parameter names are turned into setter identifiers (`path_prefix` becomes
//! `setPathPrefix`) and resolved through a dispatch table built once.

use std::collections::HashMap;

use csgen_core::{Error, Result};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::params::value_kind;
use crate::Configuration;

type Setter = fn(&mut Configuration, &str, &Value) -> Result<()>;

// Keys are lowercased: identifiers resolve without regard to ASCII case.
static SETTERS: Lazy<HashMap<String, Setter>> = Lazy::new(|| {
    let table: [(&str, Setter); 10] = [
        ("setApiKey", |c, n, v| {
            c.set_api_key(as_string(n, v)?);
            Ok(())
        }),
        ("setSecretKey", |c, n, v| {
            c.set_secret_key(as_string(n, v)?);
            Ok(())
        }),
        ("setScheme", |c, n, v| {
            c.set_scheme(as_string(n, v)?);
            Ok(())
        }),
        ("setHost", |c, n, v| {
            c.set_host(as_string(n, v)?);
            Ok(())
        }),
        ("setPort", |c, n, v| {
            c.set_port(as_port(n, v)?);
            Ok(())
        }),
        ("setPathPrefix", |c, n, v| {
            c.set_path_prefix(as_string(n, v)?);
            Ok(())
        }),
        ("setApiPath", |c, n, v| {
            c.set_api_path(as_string(n, v)?);
            Ok(())
        }),
        ("setConsolePath", |c, n, v| {
            c.set_console_path(as_string(n, v)?);
            Ok(())
        }),
        ("setNamespace", |c, n, v| {
            c.set_namespace(as_string(n, v)?);
            Ok(())
        }),
        ("setOutputDir", |c, n, v| {
            c.set_output_dir(as_string(n, v)?)?;
            Ok(())
        }),
    ];

    table
        .into_iter()
        .map(|(ident, setter)| (ident.to_ascii_lowercase(), setter))
        .collect()
});

/// Build the setter identifier for a parameter name.
///
/// - `host` => `setHost`
/// - `apiKey` => `setApiKey`
/// - `path_prefix` => `setPathPrefix`
pub(crate) fn setter_ident(name: &str) -> String {
    let mut ident = String::from("set");
    if name.contains('_') {
        name.split('_').for_each(|seg| push_ucfirst(&mut ident, seg));
    } else {
        push_ucfirst(&mut ident, name);
    }
    ident
}

fn push_ucfirst(s: &mut String, seg: &str) {
    let mut chars = seg.chars();
    if let Some(first) = chars.next() {
        s.push(first.to_ascii_uppercase());
        s.push_str(chars.as_str());
    }
}

/// Bind one parameter onto the configuration through its setter.
pub(crate) fn bind(config: &mut Configuration, name: &str, value: &Value) -> Result<()> {
    let ident = setter_ident(name);
    let setter = SETTERS.get(&ident.to_ascii_lowercase()).ok_or_else(|| {
        Error::parameter_unknown(format!(
            "parameter `{name}` does not match any setter (looked for `{ident}`)"
        ))
    })?;

    setter(config, name, value)
}

fn as_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(v) => Ok(v.clone()),
        Value::Number(v) => Ok(v.to_string()),
        other => Err(Error::config_invalid(format!(
            "parameter `{name}` must be a string, got {}",
            value_kind(other)
        ))),
    }
}

fn as_port(name: &str, value: &Value) -> Result<u16> {
    let port = match value {
        Value::Number(v) => v.as_u64(),
        Value::String(v) => v.trim().parse::<u64>().ok(),
        _ => None,
    };

    port.and_then(|p| u16::try_from(p).ok()).ok_or_else(|| {
        Error::config_invalid(format!(
            "parameter `{name}` must be a port number between 0 and 65535, got {}",
            value_kind(value)
        ))
    })
}
