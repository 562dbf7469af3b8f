use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;

/// Per-shard embedding storage.
///
/// Implementations must allow concurrent readers and make `insert`
/// exclusive with every other operation. `scan` returns a consistent
/// snapshot taken at a single point in time.
pub trait VectorStore: Send + Sync {
    /// Stores or overwrites `vector`, returning the embedding it replaced.
    fn insert(&self, vector: Vector) -> Result<Option<Vec<f64>>, DomainError>;
    fn scan(&self) -> Vec<Vector>;
    fn get(&self, id: &str) -> Option<Vec<f64>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
