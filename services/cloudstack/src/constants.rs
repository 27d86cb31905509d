use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used to build parameters from the environment.
pub const CLOUDSTACK_API_KEY: &str = "CLOUDSTACK_API_KEY";
pub const CLOUDSTACK_SECRET_KEY: &str = "CLOUDSTACK_SECRET_KEY";
pub const CLOUDSTACK_SCHEME: &str = "CLOUDSTACK_SCHEME";
pub const CLOUDSTACK_HOST: &str = "CLOUDSTACK_HOST";
pub const CLOUDSTACK_PORT: &str = "CLOUDSTACK_PORT";
pub const CLOUDSTACK_PATH_PREFIX: &str = "CLOUDSTACK_PATH_PREFIX";
pub const CLOUDSTACK_API_PATH: &str = "CLOUDSTACK_API_PATH";
pub const CLOUDSTACK_CONSOLE_PATH: &str = "CLOUDSTACK_CONSOLE_PATH";
pub const CLOUDSTACK_NAMESPACE: &str = "CLOUDSTACK_NAMESPACE";
pub const CLOUDSTACK_OUTPUT_DIR: &str = "CLOUDSTACK_OUTPUT_DIR";

// Defaults
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PATH_PREFIX: &str = "client";
pub const DEFAULT_API_PATH: &str = "api";
pub const DEFAULT_CONSOLE_PATH: &str = "console";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Legacy combined address parameter, replaced by scheme/host/port/path_prefix.
pub const DEPRECATED_ENDPOINT: &str = "endpoint";

/// AsciiSet matching `application/x-www-form-urlencoded` escaping.
///
/// Everything except `A-Z a-z 0-9 - _ .` is escaped.
pub static FORM_URLENCODE_SET: AsciiSet = NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// AsciiSet for RFC 3986 unreserved characters, used for query values.
pub static RFC3986_ENCODE_SET: AsciiSet = FORM_URLENCODE_SET.remove(b'~');

/// Characters stripped from both ends of path segments and namespaces.
pub(crate) const TRIM_WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];
