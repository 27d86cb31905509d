//! CloudStack query signing.
//!
//! - [CloudStack API: Signing API Requests](https://docs.cloudstack.apache.org/en/latest/developersguide/dev.html#signing-api-requests)

use csgen_core::hash::base64_hmac_sha1;
use csgen_core::{Error, Result};
use percent_encoding::utf8_percent_encode;

use crate::constants::{FORM_URLENCODE_SET, RFC3986_ENCODE_SET};
use crate::Configuration;

impl Configuration {
    /// Build the signature of a query string.
    ///
    /// The whole query is lower-cased, signed with HMAC-SHA1 keyed by the
    /// secret key, base64 encoded and finally url encoded so that it can be
    /// appended as the `signature` query parameter.
    ///
    /// Signing an empty query is always a caller bug and fails before any
    /// hashing happens.
    pub fn build_signature(&self, query: &str) -> Result<String> {
        if query.is_empty() {
            return Err(Error::query_empty("refusing to sign an empty query string"));
        }

        let string_to_sign = query.to_ascii_lowercase();
        debug!(self.context(), "string to sign: {string_to_sign}");

        let signature = base64_hmac_sha1(self.secret_key().as_bytes(), string_to_sign.as_bytes());
        Ok(utf8_percent_encode(&signature, &FORM_URLENCODE_SET).to_string())
    }

    /// Build a signed query string for a command call.
    ///
    /// `apiKey` is injected, pairs are sorted by key without regard to case
    /// and values are percent encoded before signing. Any caller supplied
    /// `apiKey` or `signature` pair is dropped.
    ///
    /// ```text
    /// apiKey=...&command=listZones&response=json&signature=...
    /// ```
    pub fn sign_query<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k != "apiKey" && k != "signature")
            .collect();
        pairs.push(("apiKey".to_string(), self.api_key().to_string()));
        pairs.sort_by(|(a, _), (b, _)| {
            a.to_ascii_lowercase()
                .cmp(&b.to_ascii_lowercase())
                .then_with(|| a.cmp(b))
        });

        let query = pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, &RFC3986_ENCODE_SET),
                    utf8_percent_encode(v, &RFC3986_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let signature = self.build_signature(&query)?;
        info!(self.context(), "signed query for {} parameters", pairs.len());
        Ok(format!("{query}&signature={signature}"))
    }
}
