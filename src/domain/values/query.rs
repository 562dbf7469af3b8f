use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "vector", default)]
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub top_k: i64,
}

impl Query {
    pub fn new(embedding: Vec<f64>, top_k: i64) -> Self {
        Self { embedding, top_k }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.embedding.is_empty() {
            return Err(DomainError::BadRequest("Missing vector".into()));
        }
        Ok(())
    }

    pub fn limit(&self) -> TopK {
        TopK::from_raw(self.top_k)
    }
}

/// How many results a caller wants back. Zero or negative means everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopK {
    All,
    Bounded(usize),
}

impl TopK {
    pub fn from_raw(top_k: i64) -> Self {
        if top_k <= 0 {
            TopK::All
        } else {
            TopK::Bounded(usize::try_from(top_k).unwrap_or(usize::MAX))
        }
    }

    /// Number of entries kept out of `available`.
    pub fn keep(&self, available: usize) -> usize {
        match self {
            TopK::All => available,
            TopK::Bounded(k) => (*k).min(available),
        }
    }

    pub fn truncate<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let keep = self.keep(items.len());
        items.truncate(keep);
        items
    }
}
