//! Sorting and grouping of the retrieved row set.
//!
//! Every refresh produces groups fresh from the current filtered rows;
//! nothing here persists across passes. Rows are sorted first, then
//! bucketed by group key (one bucket per distinct key, so rows sharing a
//! key merge even when the sort interleaves them), and finally the buckets
//! themselves are ordered by the comparator applied to the group key.
//!
//! Group order and row order are independent: when the group key is not
//! monotonic with the sort key, the group sequence may reorder relative to
//! the row sort. Callers wanting visually coherent output should keep the
//! two aligned.

use std::collections::HashMap;

use super::types::{GroupKeyFn, OrderFn, SortKeyFn, Value};

/// One bucket of rows sharing a group key, in sorted row order.
#[derive(Debug)]
pub(super) struct Group<R> {
    /// The derived key all member rows share.
    pub key: Value,
    /// Member rows, preserving the row sort order.
    pub rows: Vec<R>,
}

/// Sorts and buckets up to `cap` rows into an ordered group sequence.
///
/// With no sort accessor the upstream retrieval order is kept unchanged.
/// Bucketing keys on the display text of the group key, matching how group
/// labels are rendered and diffed.
pub(super) fn partition<R>(
    mut rows: Vec<R>,
    group_key: &GroupKeyFn<R>,
    sort_key: Option<&SortKeyFn<R>>,
    order: &OrderFn,
    cap: usize,
) -> Vec<Group<R>> {
    rows.truncate(cap);
    if let Some(sort_key) = sort_key {
        rows.sort_by(|a, b| order(&sort_key(a), &sort_key(b)));
    }

    let mut groups: Vec<Group<R>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let key = group_key(&row);
        let text = key.to_string();
        match index.get(&text) {
            Some(&i) => groups[i].rows.push(row),
            None => {
                index.insert(text, groups.len());
                groups.push(Group {
                    key,
                    rows: vec![row],
                });
            }
        }
    }

    groups.sort_by(|a, b| order(&a.key, &b.key));
    groups
}
