// src/rank.rs

use std::cmp::Reverse;

use crate::aggregate::FrequencyTable;

/// Distinct keys ordered by descending count. Equal counts keep the order in
/// which the keys first appeared in the input.
pub fn rank(table: &FrequencyTable) -> Vec<String> {
    rank_with_counts(table)
        .into_iter()
        .map(|(key, _)| key)
        .collect()
}

/// Same order as [`rank`], with each key's count.
pub fn rank_with_counts(table: &FrequencyTable) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = table
        .iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect();
    // Stable, so ties stay in first-occurrence order.
    pairs.sort_by_key(|&(_, count)| Reverse(count));
    pairs
}
