use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub distance: f64,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, distance: f64) -> Self {
        Self {
            id: id.into(),
            distance,
        }
    }
}

/// Ascending by distance, ties broken by id so rankings are reproducible.
pub fn rank_order(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.id.cmp(&b.id))
}

/// A list is ranked iff its distances never decrease.
pub fn is_ranked(results: &[SearchResult]) -> bool {
    results.windows(2).all(|w| w[0].distance <= w[1].distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order_breaks_ties_by_id() {
        let mut results = vec![
            SearchResult::new("b", 1.0),
            SearchResult::new("c", 0.5),
            SearchResult::new("a", 1.0),
        ];
        results.sort_by(rank_order);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(is_ranked(&results));
    }

    #[test]
    fn test_is_ranked_detects_disorder() {
        let results = vec![SearchResult::new("a", 2.0), SearchResult::new("b", 1.0)];
        assert!(!is_ranked(&results));
        assert!(is_ranked(&[]));
    }
}
