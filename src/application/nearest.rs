use crate::domain::entities::search_result::{rank_order, SearchResult};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::distance::euclidean;
use crate::domain::values::query::{Query, TopK};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Exact brute-force k-nearest-neighbor search over one shard's store.
pub struct NearestNeighborSearch {
    store: Arc<dyn VectorStore>,
}

impl NearestNeighborSearch {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Ranks every stored vector of the query's dimension by Euclidean
    /// distance. Vectors of any other dimension are skipped. A distance too
    /// large for `f64` fails the search with `Internal`.
    pub fn search(&self, query: &Query) -> Result<Vec<SearchResult>, DomainError> {
        query.validate()?;
        let snapshot = self.store.scan();
        let scanned = snapshot.len();

        let mut candidates = Vec::with_capacity(scanned);
        for v in snapshot {
            let Some(distance) = euclidean(&query.embedding, &v.embedding) else {
                continue;
            };
            // JSON has no encoding for inf or NaN.
            if !distance.is_finite() {
                return Err(DomainError::Internal(format!(
                    "Distance to {} is not representable",
                    v.id
                )));
            }
            candidates.push(SearchResult::new(v.id, distance));
        }
        let results = rank(candidates.into_iter(), query.limit());

        tracing::debug!(
            scanned,
            returned = results.len(),
            dimension = query.embedding.len(),
            "nearest neighbor search"
        );
        Ok(results)
    }
}

/// Orders candidates with `rank_order` and keeps the best `top_k`.
///
/// Unbounded requests sort everything in O(n log n). Bounded requests keep
/// a max-heap of the current best k, so the worst kept entry is always on
/// top and can be evicted in O(log k).
pub fn rank(candidates: impl Iterator<Item = SearchResult>, top_k: TopK) -> Vec<SearchResult> {
    match top_k {
        TopK::All => {
            let mut results: Vec<SearchResult> = candidates.collect();
            results.sort_by(rank_order);
            results
        }
        TopK::Bounded(k) => {
            let mut heap: BinaryHeap<Ranked> = BinaryHeap::new();
            for candidate in candidates {
                if heap.len() < k {
                    heap.push(Ranked(candidate));
                    continue;
                }
                let better = heap
                    .peek()
                    .map(|worst| rank_order(&candidate, &worst.0).is_lt())
                    .unwrap_or(false);
                if better {
                    heap.pop();
                    heap.push(Ranked(candidate));
                }
            }
            heap.into_sorted_vec().into_iter().map(|r| r.0).collect()
        }
    }
}

/// `SearchResult` ordered by `rank_order`, for use in heaps.
#[derive(Debug, Clone)]
pub(crate) struct Ranked(pub(crate) SearchResult);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(&self.0, &other.0)
    }
}
