//! Scatter-gather coordination across shard nodes.
//!
//! Inserts go to exactly one shard chosen by [`ShardRouter`]. Searches go to
//! every shard at once; the first failure or missed deadline fails the whole
//! request and drops the remaining in-flight calls.

use crate::application::merge::merge_ranked;
use crate::domain::entities::search_result::{is_ranked, rank_order, SearchResult};
use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;
use crate::domain::ports::shard_client::{ShardClient, ShardReply};
use crate::domain::router::ShardRouter;
use crate::domain::values::query::Query;
use crate::domain::values::topology::{ShardEndpoint, ShardTopology};
use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SHARD_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub topology: ShardTopology,
    /// Deadline applied to each individual shard call.
    pub shard_timeout: Duration,
}

impl CoordinatorSettings {
    pub fn new(topology: ShardTopology) -> Self {
        Self {
            topology,
            shard_timeout: DEFAULT_SHARD_TIMEOUT,
        }
    }

    pub fn with_shard_timeout(mut self, timeout: Duration) -> Self {
        self.shard_timeout = timeout;
        self
    }
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self::new(ShardTopology::default())
    }
}

pub struct Coordinator {
    topology: ShardTopology,
    client: Arc<dyn ShardClient>,
    shard_timeout: Duration,
}

impl Coordinator {
    pub fn new(settings: CoordinatorSettings, client: Arc<dyn ShardClient>) -> Self {
        Self {
            topology: settings.topology,
            client,
            shard_timeout: settings.shard_timeout,
        }
    }

    pub fn topology(&self) -> &ShardTopology {
        &self.topology
    }

    /// Index of the shard that owns `id`.
    pub fn shard_for(&self, id: &str) -> usize {
        ShardRouter::index(id, self.topology.len())
    }

    /// Routes an insert body to its owning shard and relays the reply.
    ///
    /// The body is validated here so malformed inserts never reach a shard,
    /// then forwarded byte for byte so the shard sees exactly what the
    /// client sent.
    pub async fn insert(&self, payload: Vec<u8>) -> Result<ShardReply, DomainError> {
        let vector: Vector = serde_json::from_slice(&payload)?;
        vector.validate()?;

        let index = self.shard_for(&vector.id);
        let shard = self.topology.get(index);
        tracing::debug!(id = %vector.id, shard_index = index, shard = %shard, "routing insert");

        let reply = self
            .with_deadline(shard, self.client.insert(shard, payload))
            .await?;
        if !reply.is_success() {
            tracing::warn!(shard = %shard, status = reply.status, "shard rejected insert");
            return Err(DomainError::upstream(
                shard.as_str(),
                format!(
                    "insert returned status {}: {}",
                    reply.status,
                    String::from_utf8_lossy(&reply.body)
                ),
            ));
        }
        Ok(reply)
    }

    /// Queries every shard concurrently and merges the partial rankings.
    pub async fn search(&self, query: &Query) -> Result<Vec<SearchResult>, DomainError> {
        query.validate()?;

        let calls = self
            .topology
            .iter()
            .map(|shard| self.search_shard(shard, query));
        let per_shard = try_join_all(calls).await?;

        let merged = merge_ranked(per_shard, query.limit());
        tracing::debug!(
            shards = self.topology.len(),
            returned = merged.len(),
            "merged search results"
        );
        Ok(merged)
    }

    async fn search_shard(
        &self,
        shard: &ShardEndpoint,
        query: &Query,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let mut results = self
            .with_deadline(shard, self.client.search(shard, query))
            .await
            .inspect_err(|e| tracing::warn!(shard = %shard, error = %e, "shard search failed"))?;
        if !is_ranked(&results) {
            tracing::warn!(shard = %shard, "shard returned unranked results, re-sorting");
            results.sort_by(rank_order);
        }
        Ok(results)
    }

    async fn with_deadline<T>(
        &self,
        shard: &ShardEndpoint,
        call: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.shard_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::ShardTimeout {
                shard: shard.to_string(),
                after_ms: self.shard_timeout.as_millis() as u64,
            }),
        }
    }
}
