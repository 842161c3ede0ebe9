//! Leaderboard aggregation shared by the store backends.
//!
//! Searches are grouped by (normalized query, network). Entries sort by amount
//! descending, then query and network ascending, so equal counts render in a
//! stable order.

use std::cmp::Ordering;
use std::collections::HashMap;

use socialsearch_common::{
    normalize_query, Network, RankingEntry, RankingPayload, SearchRecord, SocialCounts,
};

/// Aggregate raw search records into a ranking payload.
pub fn build_ranking(searches: &[SearchRecord], limit: usize) -> RankingPayload {
    let mut grouped: HashMap<(String, Network), i64> = HashMap::new();
    let mut statistics = SocialCounts::default();

    for record in searches {
        let key = normalize_query(&record.query);
        if key.is_empty() {
            continue;
        }
        *grouped.entry((key, record.social)).or_insert(0) += 1;
        statistics.increment(record.social);
    }

    let mut list: Vec<RankingEntry> = grouped
        .into_iter()
        .map(|((query, network), amount)| RankingEntry {
            query,
            network: network.as_str().to_string(),
            amount,
        })
        .collect();
    sort_entries(&mut list);
    list.truncate(limit);

    RankingPayload { list, statistics }
}

pub fn sort_entries(list: &mut [RankingEntry]) {
    list.sort_by(compare_entries);
}

fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.amount
        .cmp(&a.amount)
        .then_with(|| a.query.cmp(&b.query))
        .then_with(|| a.network.cmp(&b.network))
}
