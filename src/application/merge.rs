use crate::application::nearest::Ranked;
use crate::domain::entities::search_result::SearchResult;
use crate::domain::values::query::TopK;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// K-way merge of per-shard ranked lists into one global ranking.
///
/// Each input must already be ordered by `rank_order`. The heap holds one
/// cursor per shard, so producing `m` outputs costs O(m log s) for `s`
/// shards. An id seen twice (possible only after routing drift) is kept at
/// its first, closest position and later copies are dropped.
pub fn merge_ranked(per_shard: Vec<Vec<SearchResult>>, top_k: TopK) -> Vec<SearchResult> {
    let total: usize = per_shard.iter().map(Vec::len).sum();
    let want = top_k.keep(total);
    if want == 0 {
        return Vec::new();
    }

    let mut cursors: Vec<_> = per_shard.into_iter().map(Vec::into_iter).collect();
    let mut heap: BinaryHeap<(Reverse<Ranked>, usize)> = BinaryHeap::with_capacity(cursors.len());
    for (shard, cursor) in cursors.iter_mut().enumerate() {
        if let Some(head) = cursor.next() {
            heap.push((Reverse(Ranked(head)), shard));
        }
    }

    let mut merged = Vec::with_capacity(want);
    let mut seen: HashSet<String> = HashSet::with_capacity(want);
    while let Some((Reverse(Ranked(result)), shard)) = heap.pop() {
        if let Some(next) = cursors[shard].next() {
            heap.push((Reverse(Ranked(next)), shard));
        }
        if !seen.insert(result.id.clone()) {
            tracing::warn!(id = %result.id, shard, "dropping duplicate id from merge");
            continue;
        }
        merged.push(result);
        if merged.len() == want {
            break;
        }
    }
    merged
}
