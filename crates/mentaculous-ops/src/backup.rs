//! Remote backup of the ledger records to a Supabase table.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::build_http_client;
use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// Table receiving snapshots.
pub const BACKUP_TABLE: &str = "mentaculous_backups";

/// One inserted row. `mentaculous` and `order` are the stored strings verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub user_id: String,
    pub mentaculous: String,
    pub order: String,
}

/// PostgREST insert client.
#[derive(Debug, Clone)]
pub struct BackupClient {
    http: reqwest::Client,
    url: String,
    key: String,
}

impl BackupClient {
    /// Build from configuration, failing when credentials are missing.
    pub fn from_config(config: &Config) -> OpsResult<Self> {
        let (url, key) = config.backup_credentials()?;
        Ok(Self {
            http: build_http_client(config.request_timeout_secs)?,
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    /// Endpoint rows are inserted into.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, BACKUP_TABLE)
    }

    fn headers(&self) -> OpsResult<HeaderMap> {
        let invalid = |_| OpsError::Config("backup key is not a valid header value".to_string());
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", HeaderValue::from_str(&self.key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    /// Insert one snapshot row.
    pub async fn push(&self, snapshot: &BackupSnapshot) -> OpsResult<()> {
        let response = self
            .http
            .post(self.endpoint())
            .headers(self.headers()?)
            .json(&[snapshot])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpsError::Backup(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        info!(user_id = %snapshot.user_id, bytes = snapshot.mentaculous.len(), "Backup stored");
        Ok(())
    }
}
