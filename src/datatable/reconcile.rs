//! Generic keyed enter/update/exit diffing.
//!
//! Given the previous and next ordered sequences and key extractors for
//! each, [`reconcile`] matches items by key equality — never by position —
//! and reports what a caller must do to turn the previous sequence into the
//! next one: `Enter` slots for keys only in `next`, `Update` slots pairing
//! the surviving previous item with its next counterpart, and `exit` for
//! keys that disappeared. Slots come back in next-sequence order, exits in
//! previous-sequence order, so callers can rebuild their retained children
//! with a single pass.
//!
//! The diff is pure data-in/data-out; applying it (removing nodes, building
//! subtrees) is entirely the caller's business.

use std::collections::HashMap;
use std::hash::Hash;

/// One position in the reconciled output sequence.
#[derive(Debug)]
pub(super) enum Slot<P, N> {
    /// The key is new; the caller constructs a fresh child for it.
    Enter(N),
    /// The key survives; the caller keeps the previous child and re-binds
    /// the next item to it.
    Update(P, N),
}

/// Result of a keyed diff.
#[derive(Debug)]
pub(super) struct Reconciliation<P, N> {
    /// Output positions in next-sequence order.
    pub slots: Vec<Slot<P, N>>,
    /// Previous items whose key is gone, in previous-sequence order.
    pub exit: Vec<P>,
}

/// Diffs `previous` against `next` by extracted key.
///
/// A key appearing in both sequences yields exactly one `Update` slot
/// regardless of position change. Should `next` repeat a key, the first
/// occurrence claims the previous item and later ones enter fresh.
pub(super) fn reconcile<P, N, K, KP, KN>(
    previous: Vec<P>,
    next: Vec<N>,
    prev_key: KP,
    next_key: KN,
) -> Reconciliation<P, N>
where
    K: Eq + Hash,
    KP: Fn(&P) -> K,
    KN: Fn(&N) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::with_capacity(previous.len());
    for (i, p) in previous.iter().enumerate() {
        index.insert(prev_key(p), i);
    }

    let mut remaining: Vec<Option<P>> = previous.into_iter().map(Some).collect();
    let mut slots = Vec::with_capacity(next.len());
    for n in next {
        let matched = index.get(&next_key(&n)).and_then(|&i| remaining[i].take());
        match matched {
            Some(p) => slots.push(Slot::Update(p, n)),
            None => slots.push(Slot::Enter(n)),
        }
    }

    let exit: Vec<P> = remaining.into_iter().flatten().collect();
    Reconciliation { slots, exit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(recon: &Reconciliation<&str, &str>) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut enter = Vec::new();
        let mut update = Vec::new();
        for slot in &recon.slots {
            match slot {
                Slot::Enter(n) => enter.push(n.to_string()),
                Slot::Update(_, n) => update.push(n.to_string()),
            }
        }
        let exit = recon.exit.iter().map(|p| p.to_string()).collect();
        (enter, update, exit)
    }

    fn diff(previous: Vec<&'static str>, next: Vec<&'static str>) -> Reconciliation<&'static str, &'static str> {
        reconcile(previous, next, |p| p.to_string(), |n| n.to_string())
    }

    #[test]
    fn test_enter_update_exit_partition_the_keys() {
        let recon = diff(vec!["a", "b", "c"], vec!["b", "c", "d"]);
        let (enter, update, exit) = keys_of(&recon);
        assert_eq!(enter, vec!["d"]);
        assert_eq!(update, vec!["b", "c"]);
        assert_eq!(exit, vec!["a"]);
    }

    #[test]
    fn test_no_key_in_two_sets() {
        let recon = diff(vec!["a", "b"], vec!["b", "c"]);
        let (enter, update, exit) = keys_of(&recon);
        let mut all: Vec<String> = enter.into_iter().chain(update).chain(exit).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_reorder_is_all_updates() {
        let recon = diff(vec!["a", "b", "c"], vec!["c", "a", "b"]);
        let (enter, update, _) = keys_of(&recon);
        assert!(enter.is_empty());
        assert!(recon.exit.is_empty());
        assert_eq!(update, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_from_empty_all_enter() {
        let recon = diff(vec![], vec!["a", "b"]);
        let (enter, update, _) = keys_of(&recon);
        assert_eq!(enter, vec!["a", "b"]);
        assert!(update.is_empty());
        assert!(recon.exit.is_empty());
    }

    #[test]
    fn test_to_empty_all_exit() {
        let recon = diff(vec!["a", "b"], vec![]);
        assert!(recon.slots.is_empty());
        assert_eq!(recon.exit, vec!["a", "b"]);
    }

    #[test]
    fn test_exit_preserves_previous_order() {
        let recon = diff(vec!["d", "a", "c", "b"], vec!["a"]);
        assert_eq!(recon.exit, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_identical_sequences_are_clean() {
        let recon = diff(vec!["x", "y"], vec!["x", "y"]);
        let (enter, update, _) = keys_of(&recon);
        assert!(enter.is_empty());
        assert!(recon.exit.is_empty());
        assert_eq!(update, vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_next_key_enters_once_matched() {
        let recon = diff(vec!["a"], vec!["a", "a"]);
        let (enter, update, _) = keys_of(&recon);
        assert_eq!(update, vec!["a"]);
        assert_eq!(enter, vec!["a"]);
    }

    #[test]
    fn test_update_pairs_carry_both_sides() {
        let previous = vec![("a", 1), ("b", 2)];
        let next = vec![("b", 20), ("a", 10)];
        let recon = reconcile(previous, next, |p| p.0, |n| n.0);
        match &recon.slots[0] {
            Slot::Update(p, n) => {
                assert_eq!(p.1, 2);
                assert_eq!(n.1, 20);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }
}
