use crate::domain::entities::search_result::SearchResult;
use crate::domain::error::DomainError;
use crate::domain::values::query::Query;
use crate::domain::values::topology::ShardEndpoint;

/// Raw shard answer to an insert, relayed to the caller untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ShardReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How the coordinator reaches a shard node.
///
/// Transport failures are reported as `DomainError::Upstream` naming the
/// shard. `search` also treats a non-success status or an undecodable body
/// as upstream failure; `insert` hands back whatever status the shard sent.
#[async_trait::async_trait]
pub trait ShardClient: Send + Sync {
    /// Forwards an insert body verbatim.
    async fn insert(&self, shard: &ShardEndpoint, payload: Vec<u8>)
        -> Result<ShardReply, DomainError>;

    /// Runs a query on one shard and returns its locally ranked results.
    async fn search(
        &self,
        shard: &ShardEndpoint,
        query: &Query,
    ) -> Result<Vec<SearchResult>, DomainError>;
}
