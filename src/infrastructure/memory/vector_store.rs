use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local store. Nothing survives a restart.
///
/// Searches take the read lock and may run in parallel; inserts take the
/// write lock and block everything else until the map is updated.
#[derive(Default)]
pub struct InMemoryVectorStore {
    vectors: RwLock<HashMap<String, Vec<f64>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorStore for InMemoryVectorStore {
    fn insert(&self, vector: Vector) -> Result<Option<Vec<f64>>, DomainError> {
        vector.validate()?;
        let mut vectors = self.vectors.write();
        Ok(vectors.insert(vector.id, vector.embedding))
    }

    fn scan(&self) -> Vec<Vector> {
        let vectors = self.vectors.read();
        vectors
            .iter()
            .map(|(id, embedding)| Vector::new(id.clone(), embedding.clone()))
            .collect()
    }

    fn get(&self, id: &str) -> Option<Vec<f64>> {
        self.vectors.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.vectors.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let store = InMemoryVectorStore::new();
        assert_eq!(store.insert(Vector::new("a", vec![1.0, 2.0])).unwrap(), None);
        let replaced = store.insert(Vector::new("a", vec![3.0])).unwrap();

        assert_eq!(replaced, Some(vec![1.0, 2.0]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(vec![3.0]));
    }

    #[test]
    fn test_rejects_empty_id_and_embedding() {
        let store = InMemoryVectorStore::new();
        assert!(store.insert(Vector::new("", vec![1.0])).is_err());
        assert!(store.insert(Vector::new("a", vec![])).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_mixed_dimensions_allowed() {
        let store = InMemoryVectorStore::new();
        store.insert(Vector::new("a", vec![1.0])).unwrap();
        store.insert(Vector::new("b", vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(store.scan().len(), 2);
    }
}
