//! Per-dimension totals for the bar charts

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{EnrichedTransaction, GroupTotal};

/// Sum amounts per key
///
/// Every row lands in exactly one group. Groups are sorted by amount,
/// largest first; equal amounts are ordered by key.
pub fn group_totals<'r, I, F>(rows: I, key: F) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'r EnrichedTransaction>,
    F: Fn(&'r EnrichedTransaction) -> &'r str,
{
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for row in rows {
        let entry = groups.entry(key(row)).or_insert((Decimal::ZERO, 0));
        entry.0 += row.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(key, (amount, count))| GroupTotal {
            key: key.to_string(),
            amount,
            transaction_count: count,
        })
        .collect();

    totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));
    totals
}
