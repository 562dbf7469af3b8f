use crate::domain::entities::search_result::SearchResult;
use crate::domain::error::DomainError;
use crate::domain::ports::shard_client::{ShardClient, ShardReply};
use crate::domain::values::query::Query;
use crate::domain::values::topology::ShardEndpoint;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Talks to shard nodes over their HTTP/JSON interface.
///
/// Every response body is either read to the end or dropped before the call
/// returns, which hands the connection back to reqwest's pool on all paths.
pub struct HttpShardClient {
    client: Client,
    timeout: Duration,
}

impl HttpShardClient {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client error: {e}")))?;
        Ok(Self { client, timeout })
    }

    fn transport_error(&self, shard: &ShardEndpoint, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::ShardTimeout {
                shard: shard.to_string(),
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            DomainError::upstream(shard.as_str(), format!("Error contacting shard: {e}"))
        }
    }
}

#[async_trait::async_trait]
impl ShardClient for HttpShardClient {
    async fn insert(
        &self,
        shard: &ShardEndpoint,
        payload: Vec<u8>,
    ) -> Result<ShardReply, DomainError> {
        let resp = self
            .client
            .post(shard.url("/insert"))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(shard, e))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(shard, e))?;
        Ok(ShardReply {
            status,
            body: body.to_vec(),
        })
    }

    async fn search(
        &self,
        shard: &ShardEndpoint,
        query: &Query,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let resp = self
            .client
            .post(shard.url("/search"))
            .json(query)
            .send()
            .await
            .map_err(|e| self.transport_error(shard, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::upstream(
                shard.as_str(),
                format!("search returned {status}: {body}"),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(shard, e))?;
        // A shard with nothing to report may answer `null` instead of `[]`.
        let results: Option<Vec<SearchResult>> = serde_json::from_slice(&body).map_err(|e| {
            DomainError::upstream(shard.as_str(), format!("Invalid search response: {e}"))
        })?;
        Ok(results.unwrap_or_default())
    }
}
