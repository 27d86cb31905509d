use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csgen_core::utils::Redact;
use csgen_core::{Context, Error, HttpSend, Result};
use csgen_http_send_reqwest::ReqwestHttpSend;

use crate::address::CompiledAddress;
use crate::bind::bind;
use crate::constants::*;
use crate::event::{ApiDescriptor, EventTypeMap};
use crate::normalize::{normalize_namespace, trim_path_segment};
use crate::params::{params_from_env, Params};

/// Configuration carries everything a generated CloudStack client needs to
/// address and authenticate its calls.
///
/// It is built once from a [`Params`] map and then treated as read-only. The
/// setters stay public; the ones touching scheme, host, port or path prefix
/// drop the compiled address so the next read reflects them.
#[derive(Clone)]
pub struct Configuration {
    ctx: Context,

    api_key: String,
    secret_key: String,

    scheme: String,
    host: String,
    port: u16,

    path_prefix: String,
    api_path: String,
    console_path: String,

    namespace: String,
    output_dir: PathBuf,

    compiled_address: CompiledAddress,
    event_type_map: EventTypeMap,
    now: DateTime<Utc>,
}

impl Configuration {
    /// Build a configuration from a parameter map.
    ///
    /// Every parameter is bound through its setter. The build fails if:
    ///
    /// - the legacy `endpoint` parameter is present
    /// - a parameter has no setter or carries a value of the wrong type
    /// - `output_dir` does not name a writable directory
    /// - `host`, `api_key` or `secret_key` ends up empty
    ///
    /// A [`ReqwestHttpSend`] transport is installed when `ctx` carries none.
    pub fn new(ctx: Context, params: Params) -> Result<Self> {
        if params.contains_key(DEPRECATED_ENDPOINT) {
            return Err(Error::parameter_deprecated(
                "the `endpoint` parameter is deprecated, please use `scheme`, `host`, `port` and `path_prefix` instead",
            ));
        }

        let mut config = Self::with_context(ctx);
        for (name, value) in &params {
            bind(&mut config, name, value)?;
        }
        config.now = Utc::now();

        if config.host.is_empty() {
            return Err(Error::host_missing("parameter `host` must be set"));
        }
        if config.api_key.is_empty() {
            return Err(Error::api_key_missing("parameter `api_key` must be set"));
        }
        if config.secret_key.is_empty() {
            return Err(Error::secret_key_missing(
                "parameter `secret_key` must be set",
            ));
        }

        if !config.ctx.has_http_send() {
            config.set_http_send(ReqwestHttpSend::default());
        }

        config.event_type_map = EventTypeMap::bundled()?;

        debug!(config.ctx, "configuration built: {config:?}");
        Ok(config)
    }

    /// Build a configuration from the `CLOUDSTACK_*` variables of `ctx`.
    pub fn from_env(ctx: Context) -> Result<Self> {
        let params = params_from_env(&ctx);
        Self::new(ctx, params)
    }

    fn with_context(ctx: Context) -> Self {
        Self {
            ctx,
            api_key: String::new(),
            secret_key: String::new(),
            scheme: DEFAULT_SCHEME.to_string(),
            host: String::new(),
            port: DEFAULT_PORT,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            console_path: DEFAULT_CONSOLE_PATH.to_string(),
            namespace: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compiled_address: CompiledAddress::default(),
            event_type_map: EventTypeMap::default(),
            now: Utc::now(),
        }
    }

    /// Context holding the transport, env and logger.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Time this configuration was built.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.api_key = api_key.into();
        self
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn set_secret_key(&mut self, secret_key: impl Into<String>) -> &mut Self {
        self.secret_key = secret_key.into();
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = scheme.into();
        self.compiled_address.invalidate();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = host.into();
        self.compiled_address.invalidate();
        self
    }

    /// Port of the management server, `0` leaves it out of the address.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self.compiled_address.invalidate();
        self
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Set the path prefix, `"/client/"` is stored as `"client"`.
    pub fn set_path_prefix(&mut self, path_prefix: impl AsRef<str>) -> &mut Self {
        self.path_prefix = trim_path_segment(path_prefix.as_ref()).to_string();
        self.compiled_address.invalidate();
        self
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    pub fn set_api_path(&mut self, api_path: impl AsRef<str>) -> &mut Self {
        self.api_path = trim_path_segment(api_path.as_ref()).to_string();
        self
    }

    pub fn console_path(&self) -> &str {
        &self.console_path
    }

    pub fn set_console_path(&mut self, console_path: impl AsRef<str>) -> &mut Self {
        self.console_path = trim_path_segment(console_path.as_ref()).to_string();
        self
    }

    /// Namespace of the generated code, separated by `\`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: impl AsRef<str>) -> &mut Self {
        self.namespace = normalize_namespace(namespace.as_ref());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Set the directory generated code is written to.
    ///
    /// The directory must already exist and be writable. Writability is
    /// probed by creating an anonymous temporary file inside it.
    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) -> Result<&mut Self> {
        let output_dir = output_dir.into();

        let meta = std::fs::metadata(&output_dir).map_err(|e| {
            Error::output_dir_invalid(format!(
                "unable to locate dir \"{}\"",
                output_dir.display()
            ))
            .with_source(e)
        })?;
        if !meta.is_dir() {
            return Err(Error::output_dir_invalid(format!(
                "\"{}\" is not a directory",
                output_dir.display()
            )));
        }
        tempfile::tempfile_in(&output_dir).map_err(|e| {
            Error::output_dir_invalid(format!(
                "dir \"{}\" is not writable",
                output_dir.display()
            ))
            .with_source(e)
        })?;

        self.output_dir = output_dir;
        Ok(self)
    }

    /// Replace the transport handed to the HTTP layer.
    pub fn set_http_send(&mut self, http: impl HttpSend) -> &mut Self {
        self.ctx = std::mem::take(&mut self.ctx).with_http_send(http);
        self
    }

    /// Event type map loaded at construction.
    pub fn event_type_map(&self) -> &EventTypeMap {
        &self.event_type_map
    }

    /// Event type emitted by an API command, or `""` when it emits none.
    pub fn event_for_api<A: ApiDescriptor + ?Sized>(&self, api: &A) -> &str {
        self.event_type_map.get(api.name()).unwrap_or_default()
    }

    /// Base address of the management server.
    ///
    /// ```text
    /// {scheme}://{host}[:{port}]/{path_prefix}
    /// ```
    ///
    /// The port is omitted when it is `0` and trailing `/` are stripped. The
    /// result is compiled once and reused until an address setter is called.
    pub fn compiled_address(&self) -> &str {
        self.compiled_address.get_or_compile(|| {
            let port = match self.port {
                0 => String::new(),
                port => format!(":{port}"),
            };
            let address = format!(
                "{}://{}{}/{}",
                self.scheme, self.host, port, self.path_prefix
            );
            let address = address.trim_end_matches('/').to_string();

            debug!(self.ctx, "compiled address: {address}");
            address
        })
    }

    /// Address of the API endpoint, for example `http://10.0.0.1:8080/client/api`.
    pub fn api_address(&self) -> String {
        join_segment(self.compiled_address(), &self.api_path)
    }

    /// Address of the console proxy, for example `http://10.0.0.1:8080/client/console`.
    pub fn console_address(&self) -> String {
        join_segment(self.compiled_address(), &self.console_path)
    }
}

fn join_segment(base: &str, segment: &str) -> String {
    if segment.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{segment}")
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::masked(&self.secret_key))
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path_prefix", &self.path_prefix)
            .field("api_path", &self.api_path)
            .field("console_path", &self.console_path)
            .field("namespace", &self.namespace)
            .field("output_dir", &self.output_dir)
            .field("event_type_map", &self.event_type_map)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
