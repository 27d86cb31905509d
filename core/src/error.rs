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

use std::fmt;
use thiserror::Error;

/// The error type for csgen operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The `host` parameter is missing or empty
    HostMissing,

    /// The `api_key` parameter is missing or empty
    ApiKeyMissing,

    /// The `secret_key` parameter is missing or empty
    SecretKeyMissing,

    /// A legacy parameter was supplied that is no longer accepted
    ParameterDeprecated,

    /// A parameter does not resolve to any setter
    ParameterUnknown,

    /// A parameter value has the wrong type or is out of range
    ConfigInvalid,

    /// The output directory does not exist or is not writable
    OutputDirInvalid,

    /// Attempted to sign an empty query string
    QueryEmpty,

    /// Request handed to the transport is malformed
    RequestInvalid,

    /// Unexpected errors (network, I/O, bundled data, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the kind prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this error is raised while building a configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::HostMissing
                | ErrorKind::ApiKeyMissing
                | ErrorKind::SecretKeyMissing
                | ErrorKind::ParameterDeprecated
                | ErrorKind::ParameterUnknown
                | ErrorKind::ConfigInvalid
                | ErrorKind::OutputDirInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a host missing error
    pub fn host_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HostMissing, message)
    }

    /// Create an api key missing error
    pub fn api_key_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiKeyMissing, message)
    }

    /// Create a secret key missing error
    pub fn secret_key_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SecretKeyMissing, message)
    }

    /// Create a deprecated parameter error
    pub fn parameter_deprecated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParameterDeprecated, message)
    }

    /// Create an unknown parameter error
    pub fn parameter_unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParameterUnknown, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an output dir invalid error
    pub fn output_dir_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutputDirInvalid, message)
    }

    /// Create a query empty error
    pub fn query_empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::QueryEmpty, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::HostMissing => write!(f, "host is empty"),
            ErrorKind::ApiKeyMissing => write!(f, "api key is empty"),
            ErrorKind::SecretKeyMissing => write!(f, "secret key is empty"),
            ErrorKind::ParameterDeprecated => write!(f, "deprecated parameter"),
            ErrorKind::ParameterUnknown => write!(f, "unknown parameter"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::OutputDirInvalid => write!(f, "invalid output directory"),
            ErrorKind::QueryEmpty => write!(f, "string to sign is empty"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
