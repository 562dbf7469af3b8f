use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shard reply to a successful insert: `{"status": "inserted", "id": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertAck {
    pub status: String,
    pub id: String,
}

impl InsertAck {
    pub fn inserted(id: String) -> Self {
        Self {
            status: "inserted".to_string(),
            id,
        }
    }
}

pub struct InsertVectorUseCase {
    store: Arc<dyn VectorStore>,
}

impl InsertVectorUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, vector: Vector) -> Result<InsertAck, DomainError> {
        vector.validate()?;
        let id = vector.id.clone();
        let dimension = vector.dimension();
        if self.store.insert(vector)?.is_some() {
            tracing::debug!(id = %id, dimension, "overwrote vector");
        } else {
            tracing::debug!(id = %id, dimension, "stored vector");
        }
        Ok(InsertAck::inserted(id))
    }
}
