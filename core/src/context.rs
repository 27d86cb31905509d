// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Error, Result};
use bytes::Bytes;
use log::{Level, Log, Metadata, Record};
use std::collections::HashMap;
use std::fmt::{Arguments, Debug};
use std::sync::Arc;

/// Target used for every record emitted through [`Context::log`].
pub const LOG_TARGET: &str = "csgen";

/// Context carries the collaborators a configuration talks to.
///
/// ## Important
///
/// The context never reaches for process-wide state on its own. The logger
/// defaults to [`NoopLog`] and the environment to [`NoopEnv`]; the transport
/// is left unset so that its owner can decide which default to install.
///
/// ## Example
///
/// ```
/// use csgen_core::{Context, OsEnv};
///
/// let ctx = Context::new()
///     .with_env(OsEnv)
///     .with_logger(env_logger::Builder::new().build());
/// assert!(!ctx.has_http_send());
/// ```
#[derive(Clone)]
pub struct Context {
    http: Option<Arc<dyn HttpSend>>,
    env: Arc<dyn Env>,
    logger: Arc<dyn Log>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context without transport, with no-op env and logger.
    pub fn new() -> Self {
        Self {
            http: None,
            env: Arc::new(NoopEnv),
            logger: Arc::new(NoopLog),
        }
    }

    /// Replace the HTTP transport implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Some(Arc::new(http));
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the logger implementation.
    pub fn with_logger(mut self, logger: impl Log + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Check whether a transport has been configured.
    #[inline]
    pub fn has_http_send(&self) -> bool {
        self.http.is_some()
    }

    /// Send http request through the configured transport.
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        match &self.http {
            Some(http) => http.http_send(req).await,
            None => Err(Error::unexpected(
                "HTTP sending not supported: no HTTP client configured",
            )),
        }
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Emit a log record through the injected logger.
    pub fn log(&self, level: Level, args: Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        if !self.logger.enabled(&metadata) {
            return;
        }

        self.logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }
}

/// HttpSend is the transport used by generated clients to reach the API.
///
/// The configuration only stores it; requests are issued by the HTTP layer
/// built on top of the generated code.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Permits parameterizing environment access.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    fn var(&self, key: &str) -> Option<String>;
}

/// Implements Env for the OS process environment.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }
}

/// StaticEnv provides a fixed set of variables.
///
/// This is useful for testing or for feeding parameters from another source.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// NoopEnv is a no-op implementation that always returns None.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

/// NoopLog drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _: &Record<'_>) {}

    fn flush(&self) {}
}
