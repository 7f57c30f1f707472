//! Property tests checking the list against a `BTreeMap` model.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::Config;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use skiplist::{Ascending, Descending, KeyOrder, Options, SkipList};

// =============================================================================
// Operations
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Set(i32, u32),
    Remove(i32),
    RemoveFront,
    RemoveBack,
    SetMaxLevel(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (-200i32..200, any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => (-200i32..200).prop_map(Op::Remove),
        1 => Just(Op::RemoveFront),
        1 => Just(Op::RemoveBack),
        1 => (1usize..12).prop_map(Op::SetMaxLevel),
    ]
}

fn new_list<O: KeyOrder<i32>>(order: O, seed: u64) -> SkipList<i32, u32, O> {
    let mut list = SkipList::with_options(order, Options { max_level: 8 }).unwrap();
    list.set_rand_source(SmallRng::seed_from_u64(seed));
    list
}

/// Applies `op` to both the list and the model.
fn apply<O: KeyOrder<i32>>(
    list: &mut SkipList<i32, u32, O>,
    model: &mut BTreeMap<i32, u32>,
    op: &Op,
    descending: bool,
) -> Result<(), TestCaseError> {
    match *op {
        Op::Set(k, v) => {
            let node = list.set(k, v);
            prop_assert_eq!(*node.key(), k);
            prop_assert_eq!(*node.value(), v);
            model.insert(k, v);
        }
        Op::Remove(k) => {
            let removed = list.remove(&k).map(|node| node.into_parts());
            prop_assert_eq!(removed, model.remove_entry(&k));
        }
        Op::RemoveFront => {
            let removed = list.remove_front().map(|node| node.into_parts());
            let expected = if descending { model.pop_last() } else { model.pop_first() };
            prop_assert_eq!(removed, expected);
        }
        Op::RemoveBack => {
            let removed = list.remove_back().map(|node| node.into_parts());
            let expected = if descending { model.pop_first() } else { model.pop_last() };
            prop_assert_eq!(removed, expected);
        }
        Op::SetMaxLevel(level) => {
            let old = list.max_level();
            prop_assert_eq!(list.set_max_level(level), Ok(old));
        }
    }
    Ok(())
}

/// Checks ordering, length, back-links and the per-level structure using
/// only the public node accessors.
fn check_structure<O: KeyOrder<i32>>(list: &SkipList<i32, u32, O>) -> Result<(), TestCaseError> {
    let mut chain = Vec::new();
    let mut cursor = list.front();
    while let Some(node) = cursor {
        chain.push(node);
        cursor = node.next();
    }
    prop_assert_eq!(chain.len(), list.len());
    prop_assert_eq!(chain.first().copied(), list.front());
    prop_assert_eq!(chain.last().copied(), list.back());

    for pair in chain.windows(2) {
        prop_assert!(list.order().compare(pair[1].key(), pair[0].key()));
        prop_assert!(pair[0].score() <= pair[1].score());
        prop_assert_eq!(pair[1].prev(), Some(pair[0]));
        prop_assert_eq!(pair[0].next(), Some(pair[1]));
    }

    for (pos, node) in chain.iter().enumerate() {
        prop_assert!(node.level() >= 1 && node.level() <= list.max_level());
        for level in 0..node.level() {
            let expected = chain[pos + 1..].iter().find(|n| n.level() > level).copied();
            prop_assert_eq!(node.next_level(level), expected);
        }
    }
    Ok(())
}

fn run_ops<O: KeyOrder<i32>>(
    order: O,
    descending: bool,
    seed: u64,
    ops: &[Op],
) -> Result<(), TestCaseError> {
    let mut list = new_list(order, seed);
    let mut model = BTreeMap::new();
    for op in ops {
        apply(&mut list, &mut model, op, descending)?;
        prop_assert_eq!(list.len(), model.len());
    }
    check_structure(&list)?;

    let actual: Vec<(i32, u32)> = list.iter().map(|(k, v)| (*k, *v)).collect();
    let mut expected: Vec<(i32, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
    if descending {
        expected.reverse();
    }
    prop_assert_eq!(actual, expected);
    Ok(())
}

// =============================================================================
// Proptest Tests
// =============================================================================

proptest! {
    #![proptest_config(Config {
        cases: 200,
        ..Config::default()
    })]

    /// Random operation sequences keep every structural invariant.
    #[test]
    fn ascending_matches_model(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        run_ops(Ascending, false, seed, &ops)?;
    }

    #[test]
    fn descending_matches_model(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        run_ops(Descending, true, seed, &ops)?;
    }

    /// Setting an existing key replaces its value without adding a node.
    #[test]
    fn overwrite_is_idempotent(
        keys in prop::collection::vec(-50i32..50, 1..100),
        k in -50i32..50,
        v1 in any::<u32>(),
        v2 in any::<u32>(),
    ) {
        let mut list = new_list(Ascending, 1);
        for key in &keys {
            list.set(*key, 0);
        }
        list.set(k, v1);
        let len = list.len();
        list.set(k, v2);
        prop_assert_eq!(list.len(), len);
        prop_assert_eq!(list.get_value(&k), Some(&v2));
        prop_assert_eq!(list.iter().filter(|(key, _)| **key == k).count(), 1);
    }

    /// `find` is the ceiling, and `find_next` agrees with it for any hint.
    #[test]
    fn ceiling_and_hint_parity(
        seed in any::<u64>(),
        keys in prop::collection::btree_set(-1000i32..1000, 0..200),
        queries in prop::collection::vec(-1100i32..1100, 1..50),
    ) {
        let mut list = new_list(Ascending, seed);
        for key in &keys {
            list.set(*key, 0);
        }

        for q in &queries {
            let found = list.find(q).map(|node| *node.key());
            prop_assert_eq!(found, keys.range(*q..).next().copied());

            let mut hint = list.front();
            while let Some(node) = hint {
                prop_assert_eq!(list.find_next(Some(node), q), list.find(q));
                hint = node.next();
            }
            prop_assert_eq!(list.find_next(None, q), list.find(q));
        }
    }

    /// Descending ceiling: first key not greater than the query.
    #[test]
    fn descending_ceiling(
        keys in prop::collection::btree_set(-1000i32..1000, 0..200),
        q in -1100i32..1100,
    ) {
        let mut list = new_list(Descending, 3);
        for key in &keys {
            list.set(*key, 0);
        }
        let found = list.find(&q).map(|node| *node.key());
        prop_assert_eq!(found, keys.range(..=q).next_back().copied());
    }
}
