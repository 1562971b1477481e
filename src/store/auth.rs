//! HMAC-SHA256 request signing for the App Configuration REST API.

use crate::error::{Result, SyncError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Signed header set for one request.
pub struct RequestSignature {
    /// RFC 1123 timestamp for the `x-ms-date` header.
    pub date: String,
    /// Base64 SHA-256 of the body, for the `x-ms-content-sha256` header.
    pub content_hash: String,
    /// Value for the `Authorization` header.
    pub authorization: String,
}

/// Current UTC time in the RFC 1123 form the store expects.
pub fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Sign one request per the App Configuration HMAC scheme.
///
/// The string-to-sign is `METHOD\n<path-and-query>\n<date>;<host>;<content-hash>`,
/// keyed with the base64-decoded connection-string secret. The signed header set
/// is fixed to `x-ms-date;host;x-ms-content-sha256`.
///
/// # Errors
///
/// Returns an error if the secret is not valid base64.
pub fn sign_request(
    credential_id: &str,
    secret: &str,
    method: &str,
    host: &str,
    path_and_query: &str,
    body: &[u8],
    date: &str,
) -> Result<RequestSignature> {
    let key = BASE64.decode(secret).map_err(|e| {
        SyncError::ConnectionStringError(format!("secret is not valid base64: {e}"))
    })?;

    let content_hash = BASE64.encode(Sha256::digest(body));
    let string_to_sign = format!("{method}\n{path_and_query}\n{date};{host};{content_hash}");

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| SyncError::ConnectionStringError(format!("invalid signing key: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    Ok(RequestSignature {
        date: date.to_string(),
        content_hash,
        authorization: format!(
            "HMAC-SHA256 Credential={credential_id}&SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature={signature}"
        ),
    })
}
