//! Connection-string parsing for the App Configuration endpoint.

use crate::error::{Result, SyncError};

/// Endpoint and credentials extracted from a store connection string.
///
/// Connection strings have the form `Endpoint=...;Id=...;Secret=...`, as issued
/// by the App Configuration portal. Unknown segments are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    /// Store endpoint, e.g. `https://example.azconfig.io` (no trailing slash).
    pub endpoint: String,
    /// Credential identifier used in the Authorization header.
    pub id: String,
    /// Base64-encoded signing secret.
    pub secret: String,
}

impl ConnectionString {
    /// Parse a connection string of the form `Endpoint=...;Id=...;Secret=...`.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment is not `name=value` or any of the three
    /// required segments is missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use appconfig_sync::store::ConnectionString;
    ///
    /// let parsed = ConnectionString::parse(
    ///     "Endpoint=https://example.azconfig.io;Id=abc;Secret=c2VjcmV0",
    /// ).unwrap();
    /// assert_eq!(parsed.endpoint, "https://example.azconfig.io");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut id = None;
        let mut secret = None;

        for segment in raw.split(';').filter(|s| !s.is_empty()) {
            // Secrets are base64 and may themselves contain '=' padding, so
            // split on the first '=' only.
            let Some((name, value)) = segment.split_once('=') else {
                return Err(SyncError::ConnectionStringError(format!(
                    "segment '{segment}' is not of the form name=value"
                )));
            };

            match name {
                "Endpoint" => endpoint = Some(value.trim_end_matches('/').to_string()),
                "Id" => id = Some(value.to_string()),
                "Secret" => secret = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Self {
            endpoint: endpoint.ok_or_else(|| missing("Endpoint"))?,
            id: id.ok_or_else(|| missing("Id"))?,
            secret: secret.ok_or_else(|| missing("Secret"))?,
        })
    }

    /// Host portion of the endpoint, as signed into each request.
    pub fn host(&self) -> &str {
        self.endpoint
            .strip_prefix("https://")
            .or_else(|| self.endpoint.strip_prefix("http://"))
            .unwrap_or(&self.endpoint)
    }
}

fn missing(segment: &str) -> SyncError {
    SyncError::ConnectionStringError(format!("missing required segment '{segment}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_connection_string() {
        let parsed = ConnectionString::parse(
            "Endpoint=https://example.azconfig.io;Id=abc-123;Secret=c2VjcmV0a2V5",
        )
        .unwrap();

        assert_eq!(parsed.endpoint, "https://example.azconfig.io");
        assert_eq!(parsed.id, "abc-123");
        assert_eq!(parsed.secret, "c2VjcmV0a2V5");
    }

    #[test]
    fn test_parse_keeps_base64_padding() {
        let parsed =
            ConnectionString::parse("Endpoint=https://e.azconfig.io;Id=a;Secret=c2VjcmV0==")
                .unwrap();

        assert_eq!(parsed.secret, "c2VjcmV0==");
    }

    #[test]
    fn test_parse_trims_trailing_slash() {
        let parsed =
            ConnectionString::parse("Endpoint=https://e.azconfig.io/;Id=a;Secret=cw==").unwrap();

        assert_eq!(parsed.endpoint, "https://e.azconfig.io");
    }

    #[test]
    fn test_parse_missing_segment() {
        let err = ConnectionString::parse("Endpoint=https://e.azconfig.io;Id=a").unwrap_err();
        assert!(err.to_string().contains("Secret"));
    }

    #[test]
    fn test_parse_malformed_segment() {
        let result = ConnectionString::parse("Endpoint=https://e.azconfig.io;garbage");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(ConnectionString::parse("").is_err());
    }

    #[test]
    fn test_host() {
        let parsed =
            ConnectionString::parse("Endpoint=https://example.azconfig.io;Id=a;Secret=cw==")
                .unwrap();

        assert_eq!(parsed.host(), "example.azconfig.io");
    }
}
