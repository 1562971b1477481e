//! Azure App Configuration REST client.

use crate::error::{Result, SyncError};
use crate::setting::Setting;
use crate::store::auth::{http_date, sign_request};
use crate::store::connection::ConnectionString;
use crate::store::{ConfigStore, Observation};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const API_VERSION: &str = "1.0";
const KV_CONTENT_TYPE: &str = "application/vnd.microsoft.appconfig.kv+json";

/// Key-value body returned by the store's `/kv/{key}` endpoint.
#[derive(Deserialize)]
struct KeyValueBody {
    value: Option<String>,
    content_type: Option<String>,
}

/// REST client for a single App Configuration store.
///
/// Authenticates every request with the HMAC scheme derived from the
/// connection string. The underlying HTTP client is safe for concurrent use,
/// so one `AppConfigClient` serves all reconciliation units of a run.
///
/// # Examples
///
/// ```rust,no_run
/// use appconfig_sync::store::AppConfigClient;
///
/// # fn example() -> appconfig_sync::error::Result<()> {
/// let store = AppConfigClient::from_connection_string(
///     "Endpoint=https://example.azconfig.io;Id=abc;Secret=c2VjcmV0",
/// )?;
/// # Ok(())
/// # }
/// ```
pub struct AppConfigClient {
    connection: ConnectionString,
    client: Client,
}

impl AppConfigClient {
    /// Create a client from an `Endpoint=...;Id=...;Secret=...` connection string.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is malformed or the HTTP
    /// client cannot be constructed.
    pub fn from_connection_string(raw: &str) -> Result<Self> {
        let connection = ConnectionString::parse(raw)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SyncError::StoreError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { connection, client })
    }

    /// Path and query addressing one key-value under the run's label.
    ///
    /// `%00` is the store's encoding for the null (absent) label.
    fn kv_path(&self, key: &str, label: Option<&str>) -> String {
        let encoded_label = match label {
            Some(label) => urlencoding::encode(label).into_owned(),
            None => "%00".to_string(),
        };
        format!(
            "/kv/{}?label={}&api-version={}",
            urlencoding::encode(key),
            encoded_label,
            API_VERSION
        )
    }

    async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<reqwest::Response> {
        let date = http_date();
        let signature = sign_request(
            &self.connection.id,
            &self.connection.secret,
            method.as_str(),
            self.connection.host(),
            path_and_query,
            &body,
            &date,
        )?;

        let mut request = self
            .client
            .request(method, format!("{}{path_and_query}", self.connection.endpoint))
            .header("x-ms-date", signature.date)
            .header("x-ms-content-sha256", signature.content_hash)
            .header("Authorization", signature.authorization);
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }

        request
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::StoreError(format!("HTTP request failed: {e}")))
    }
}

#[async_trait]
impl ConfigStore for AppConfigClient {
    async fn get(&self, key: &str, label: Option<&str>) -> Result<Observation> {
        let path = self.kv_path(key, label);
        let response = self.send(Method::GET, &path, Vec::new(), None).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Observation::Absent);
        }
        if !status.is_success() {
            return Err(SyncError::StoreError(format!(
                "GET {key} failed with status {status}"
            )));
        }

        let body: KeyValueBody = response
            .json()
            .await
            .map_err(|e| SyncError::StoreError(format!("Failed to parse store reply: {e}")))?;

        Ok(Observation::Present {
            value: body.value.unwrap_or_default(),
            content_type: body.content_type,
        })
    }

    async fn set(&self, setting: &Setting) -> Result<()> {
        let path = self.kv_path(&setting.key, setting.label.as_deref());
        let body = json!({
            "value": setting.value,
            "content_type": setting.content_type,
        });

        let response = self
            .send(
                Method::PUT,
                &path,
                body.to_string().into_bytes(),
                Some(KV_CONTENT_TYPE),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::StoreError(format!(
                "PUT {} failed with status {status}",
                setting.key
            )));
        }

        Ok(())
    }

    fn name(&self) -> String {
        format!("appconfig:{}", self.connection.endpoint)
    }
}
