pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::coordinator::{Coordinator, CoordinatorSettings};
use crate::application::insert::{InsertAck, InsertVectorUseCase};
use crate::application::nearest::NearestNeighborSearch;
use crate::domain::entities::search_result::SearchResult;
use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;
use crate::domain::ports::shard_client::{ShardClient, ShardReply};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::query::Query;
use crate::domain::values::topology::ShardTopology;
use crate::infrastructure::http::server::{coordinator_router, shard_router};
use crate::infrastructure::http::shard_client::HttpShardClient;
use crate::infrastructure::memory::vector_store::InMemoryVectorStore;
use std::sync::Arc;

/// A storage node owning one partition of the vectors.
pub struct ShardNode {
    store: Arc<dyn VectorStore>,
    insert_uc: InsertVectorUseCase,
    search_uc: NearestNeighborSearch,
}

impl ShardNode {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryVectorStore::new()))
    }

    pub fn with_store(store: Arc<dyn VectorStore>) -> Self {
        Self {
            insert_uc: InsertVectorUseCase::new(store.clone()),
            search_uc: NearestNeighborSearch::new(store.clone()),
            store,
        }
    }

    pub fn insert(&self, vector: Vector) -> Result<InsertAck, DomainError> {
        self.insert_uc.execute(vector)
    }

    pub fn search(&self, query: &Query) -> Result<Vec<SearchResult>, DomainError> {
        self.search_uc.search(query)
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// HTTP routes for this shard: `POST /insert` and `POST /search`.
    pub fn router(self) -> axum::Router {
        shard_router(Arc::new(self))
    }
}

impl Default for ShardNode {
    fn default() -> Self {
        Self::new()
    }
}

/// The routing node clients talk to. Holds no vectors of its own.
pub struct CoordinatorNode {
    coordinator: Coordinator,
}

impl CoordinatorNode {
    pub fn new(settings: CoordinatorSettings) -> Result<Self, DomainError> {
        let client = HttpShardClient::new(settings.shard_timeout)?;
        Ok(Self::with_client(settings, Arc::new(client)))
    }

    pub fn with_client(settings: CoordinatorSettings, client: Arc<dyn ShardClient>) -> Self {
        tracing::info!(
            shards = settings.topology.len(),
            timeout_ms = settings.shard_timeout.as_millis() as u64,
            "coordinator configured"
        );
        Self {
            coordinator: Coordinator::new(settings, client),
        }
    }

    pub async fn insert(&self, payload: Vec<u8>) -> Result<ShardReply, DomainError> {
        self.coordinator.insert(payload).await
    }

    pub async fn search(&self, query: &Query) -> Result<Vec<SearchResult>, DomainError> {
        self.coordinator.search(query).await
    }

    pub fn topology(&self) -> &ShardTopology {
        self.coordinator.topology()
    }

    pub fn shard_for(&self, id: &str) -> usize {
        self.coordinator.shard_for(id)
    }

    pub fn router(self) -> axum::Router {
        coordinator_router(Arc::new(self))
    }
}
