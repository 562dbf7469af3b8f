use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// An identified embedding. On the wire the embedding travels as `vector`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "vector", default)]
    pub embedding: Vec<f64>,
}

impl Vector {
    pub fn new(id: impl Into<String>, embedding: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            embedding,
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_empty() {
            return Err(DomainError::BadRequest("Missing ID".into()));
        }
        if self.embedding.is_empty() {
            return Err(DomainError::BadRequest("Missing vector".into()));
        }
        Ok(())
    }
}
