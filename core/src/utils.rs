//! Utility functions and types.

use std::fmt::{Debug, Display, Formatter};

/// Redacts a secret so it can be placed in logs and `Debug` output.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 characters is fully masked.
/// - Longer input keeps its first and last three characters, so that two
///   different keys can still be told apart in a log line.
///
/// Use [`Redact::masked`] for values where no fragment may be shown.
#[derive(Clone, Copy)]
pub struct Redact<'a> {
    value: &'a str,
    show_edges: bool,
}

impl<'a> Redact<'a> {
    /// Redact `value` completely, rendering every non-empty input as `***`.
    pub fn masked(value: &'a str) -> Self {
        Redact {
            value,
            show_edges: false,
        }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact {
            value,
            show_edges: true,
        }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::from(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = self.value;
        let length = value.len();
        if length == 0 {
            return f.write_str("EMPTY");
        }
        if !self.show_edges
            || length < 12
            || !value.is_char_boundary(3)
            || !value.is_char_boundary(length - 3)
        {
            return f.write_str("***");
        }

        f.write_str(&value[..3])?;
        f.write_str("***")?;
        f.write_str(&value[length - 3..])
    }
}
