#![cfg(test)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;

use proptest::prelude::*;

use super::*;
use crate::collections::traits::{Comparator, NaturalOrder, Reverse};
use crate::util::alloc::CountedDrop;
use crate::util::error::MissingStringifier;
use crate::util::panic::assert_panics;

/// Checks every red-black and bookkeeping invariant of `map`, panicking with a description of the
/// first one that doesn't hold.
fn validate<K: Debug, V, C: Comparator<K>>(map: &TreeMap<K, V, C>) {
    if let Some(root) = map.root {
        assert!(root.is_black(), "The root should always be black.");
        assert!(root.parent().is_none(), "The root shouldn't have a parent.");
    }

    let (count, _) = validate_branch(map.root, None);
    assert_eq!(count, map.len, "The length should match the number of nodes in the tree.");

    let keys: Vec<&K> = map.keys().collect();
    for pair in keys.windows(2) {
        assert_eq!(
            map.cmp.compare(pair[0], pair[1]),
            Ordering::Less,
            "In-order traversal should produce strictly ascending keys, found {:?} before {:?}.",
            pair[0],
            pair[1]
        );
    }
}

/// Returns the number of nodes in the branch and its black height.
fn validate_branch<K: Debug, V>(link: Link<K, V>, parent: Link<K, V>) -> (usize, usize) {
    let Some(node) = link else {
        return (0, 1);
    };

    assert!(node.parent() == parent, "Node {:?} has an inconsistent parent link.", node.key());
    if node.is_red() {
        assert!(
            !is_red(node.left()) && !is_red(node.right()),
            "Red node {:?} shouldn't have a red child.",
            node.key()
        );
    }

    let (left_count, left_height) = validate_branch(node.left(), Some(node));
    let (right_count, right_height) = validate_branch(node.right(), Some(node));
    assert_eq!(
        left_height,
        right_height,
        "Both sides of {:?} should contain the same number of black nodes.",
        node.key()
    );

    (left_count + right_count + 1, left_height + usize::from(node.is_black()))
}

/// Pre-order keys and colors, which together describe the exact shape of a tree.
fn shape<K: Clone, V, C>(map: &TreeMap<K, V, C>) -> Vec<(K, Color)> {
    let mut walk = Walk::new(map.root, Traversal::PreOrder);
    let mut shape = Vec::new();
    while let Some(node) = walk.next_node() {
        shape.push((node.key().clone(), node.color()));
    }
    shape
}

fn balanced_seven() -> TreeMap<i32, &'static str> {
    let mut map = TreeMap::new();
    for (key, value) in [(4, "d"), (2, "b"), (6, "f"), (1, "a"), (3, "c"), (5, "e"), (7, "g")] {
        map.insert(key, value);
    }
    map
}

#[test]
fn test_insert_and_remove_small() {
    let mut map = TreeMap::new();
    for key in [10, 20, 30, 15, 25, 5, 1] {
        assert_eq!(map.insert(key, key * 10), None, "A new key shouldn't replace anything.");
        validate(&map);
    }

    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [1, 5, 10, 15, 20, 25, 30],
        "Keys should be produced in ascending order."
    );

    assert_eq!(map.remove(&20), Some(200), "Removing a present key should return its value.");
    validate(&map);
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [1, 5, 10, 15, 25, 30],
        "The removed key should no longer be produced."
    );
    assert_eq!(map.get(&20), None, "A removed key shouldn't be found.");
    assert_eq!(map.len(), 6);
}

#[test]
fn test_remove_evens() {
    let mut map = TreeMap::new();
    for key in 1..=100 {
        map.insert(key, key.to_string());
        validate(&map);
    }
    assert_eq!(map.len(), 100);

    for key in (2..=100).step_by(2) {
        assert_eq!(map.remove(&key), Some(key.to_string()));
        validate(&map);
    }

    assert_eq!(map.len(), 50, "Half of the entries should remain.");
    assert!(
        map.keys().copied().eq((1..=100).step_by(2)),
        "Only the odd keys should remain, in ascending order."
    );
    assert_eq!(map.remove(&2), None, "Removing an absent key should return None.");
}

#[test]
fn test_insert_orders() {
    let mut ascending = TreeMap::new();
    let mut descending = TreeMap::new();
    let mut alternating = TreeMap::new();

    for i in 0..256 {
        ascending.insert(i, ());
        validate(&ascending);

        descending.insert(255 - i, ());
        validate(&descending);

        // 0, 255, 1, 254, ...
        let key = if i % 2 == 0 { i / 2 } else { 255 - i / 2 };
        alternating.insert(key, ());
        validate(&alternating);
    }

    for map in [&ascending, &descending, &alternating] {
        assert_eq!(map.len(), 256);
        assert!(map.keys().copied().eq(0..256), "Every key should be present, in order.");
        // 2 log2(256 + 1) is just over 16.
        assert!(map.height() <= 16, "The tree should stay balanced, got height {}.", map.height());
    }
}

#[test]
fn test_replace_value() {
    let mut map = TreeMap::new();
    map.insert("key", 1);
    map.insert("other", 2);

    assert_eq!(map.insert("key", 3), Some(1), "Replacing should return the previous value.");
    assert_eq!(map.get(&"key"), Some(&3), "The new value should be stored.");
    assert_eq!(map.len(), 2, "Replacing a value shouldn't change the length.");
    validate(&map);
}

#[test]
fn test_empty() {
    let mut map: TreeMap<i32, i32> = TreeMap::new();

    assert!(map.is_empty());
    assert_eq!(map.height(), 0, "An empty tree has no levels.");
    assert_eq!(map.get(&1), None);
    assert!(!map.contains(&1));
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.first_entry(), None);
    assert_eq!(map.pop_last(), None);

    for traversal in [Traversal::InOrder, Traversal::PreOrder, Traversal::PostOrder] {
        let mut cursor = map.cursor(traversal);
        assert!(!cursor.has_next(), "A cursor over an empty map has nothing to visit.");
        assert_eq!(cursor.next(), None);
    }
}

#[test]
fn test_single_removal() {
    let mut map = TreeMap::new();
    map.insert(1, 'a');
    assert_eq!(map.remove(&1), Some('a'));

    assert!(map.is_empty());
    assert!(map.root.is_none(), "Removing the only entry should leave no root.");

    map.insert(2, 'b');
    validate(&map);
    assert_eq!(map.get(&2), Some(&'b'), "The map should be usable after becoming empty.");
}

#[test]
fn test_traversal_orders() {
    let map = balanced_seven();
    validate(&map);

    let keys = |traversal| map.cursor(traversal).map(|(k, _)| *k).collect::<Vec<_>>();
    assert_eq!(keys(Traversal::InOrder), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(keys(Traversal::PreOrder), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(keys(Traversal::PostOrder), [1, 3, 2, 5, 7, 6, 4]);

    let mut cursor = map.cursor(Traversal::PostOrder);
    assert_eq!(cursor.len(), 7, "A fresh cursor should report every entry as remaining.");
    assert_eq!(cursor.last_yielded(), None);
    cursor.next();
    cursor.next();
    assert_eq!(cursor.last_yielded(), Some((&3, &"c")));
    assert_eq!(cursor.len(), 5);
    assert!(cursor.has_next());
    assert_eq!(cursor.by_ref().count(), 5);
    assert!(!cursor.has_next(), "An exhausted cursor has nothing left to visit.");
}

#[test]
fn test_first_and_last() {
    let mut map: TreeMap<i32, i32> = (0..32).map(|i| (i, -i)).collect();

    assert_eq!(map.first_entry(), Some((&0, &0)));
    assert_eq!(map.last_entry(), Some((&31, &-31)));

    assert_eq!(map.pop_first(), Some((0, 0)));
    assert_eq!(map.pop_last(), Some((31, -31)));
    validate(&map);
    assert_eq!(map.len(), 30);

    let drained: Vec<_> = map.into_iter().rev().map(|(k, _)| k).collect();
    assert!(drained.into_iter().eq((1..31).rev()), "Owned iteration should work from both ends.");
}

#[test]
fn test_get_mut() {
    let mut map = balanced_seven();
    if let Some(value) = map.get_mut(&5) {
        *value = "five";
    }

    assert_eq!(map.get(&5), Some(&"five"));
    assert_eq!(map.get_entry(&5), Some((&5, &"five")));
    assert_eq!(map.get_mut(&8), None);
}

#[test]
fn test_custom_comparators() {
    let mut reversed = TreeMap::with_comparator(Reverse(NaturalOrder));
    reversed.extend((0..10).map(|i| (i, ())));
    validate(&reversed);
    assert!(reversed.keys().copied().eq((0..10).rev()), "Keys should follow the comparator.");

    let mut by_magnitude = TreeMap::with_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
    by_magnitude.insert(-3, "negative");
    by_magnitude.insert(1, "one");

    assert_eq!(
        by_magnitude.insert(3, "positive"),
        Some("negative"),
        "Keys that compare equal should be treated as the same key."
    );
    assert_eq!(by_magnitude.get_entry(&3), Some((&-3, &"positive")), "The key should be kept.");
    assert_eq!(by_magnitude.len(), 2);
}

#[test]
fn test_clone() {
    let mut map = TreeMap::new();
    for key in [50, 20, 80, 10, 30, 70, 90, 25, 35, 5] {
        map.insert(key, key.to_string());
    }
    map.remove(&80);

    let mut copy = map.clone();
    validate(&copy);
    assert_eq!(shape(&copy), shape(&map), "A clone should have the same shape and colors.");
    assert!(copy.iter().eq(map.iter()));

    copy.insert(100, "new".into());
    copy.remove(&50);
    if let Some(value) = copy.get_mut(&20) {
        value.push('!');
    }

    assert_eq!(map.len(), 9, "Changes to a clone shouldn't affect the original.");
    assert_eq!(map.get(&50), Some(&"50".to_string()));
    assert_eq!(map.get(&20), Some(&"20".to_string()));
    assert!(!map.contains(&100));
    validate(&map);
    validate(&copy);
}

#[test]
fn test_clear_releases_entries() {
    let counter = CountedDrop::new();
    let mut map = TreeMap::new();
    for key in 0..20 {
        map.insert(key, counter.clone());
    }

    map.clear();
    assert_eq!(counter.dropped(), 20, "Clearing should drop every value exactly once.");
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);

    for key in 0..10 {
        map.insert(key, counter.clone());
    }
    validate(&map);
    drop(map);
    assert_eq!(counter.dropped(), 30, "Dropping the map should drop every remaining value.");
}

#[test]
fn test_remove_releases_entry() {
    let counter = CountedDrop::new();
    let mut map = TreeMap::new();
    for key in 0..8 {
        map.insert(key, counter.clone());
    }

    drop(map.remove(&3));
    drop(map.pop_first());
    assert_eq!(counter.dropped(), 2);
    drop(map);
    assert_eq!(counter.dropped(), 8);
}

#[test]
fn test_render() {
    let mut map = balanced_seven();
    map.set_stringifier(|k, _| k.to_string());

    assert_eq!(
        map.render(),
        concat!(
            "TreeMap - Size: 7\n",
            "       4:B\n",
            "      /   \\\n",
            "   2:B     6:B\n",
            "   / \\     / \\\n",
            " 1:R 3:R 5:R 7:R\n",
        ),
        "Each level should be centred over its children, tagged with its color."
    );

    let empty: TreeMap<i32, ()> =
        TreeMap::with_comparator_and_stringifier(NaturalOrder, |k, _| k.to_string());
    assert_eq!(empty.render(), "TreeMap - Size: 0\n");
}

#[test]
fn test_render_without_stringifier() {
    let map = balanced_seven();

    assert_eq!(map.try_render(), Err(MissingStringifier));
    assert_panics!(
        { map.render() },
        "Rendering without a stringifier should panic."
    );
}

#[test]
fn test_display() {
    let map = balanced_seven();
    assert_eq!(
        format!("{map}"),
        r#"{1: "a", 2: "b", 3: "c", 4: "d", 5: "e", 6: "f", 7: "g"}"#
    );
}

#[test]
fn test_sync_tree_map() {
    let map = SyncTreeMap::new();
    assert_eq!(map.insert(2, "two".to_string()), None);
    assert_eq!(map.insert(1, "one".to_string()), None);

    assert_eq!(map.get(&2), Some("two".to_string()), "Values should be cloned out of the map.");
    assert_eq!(map.update(&1, |v| v.push('!')), Some(()));
    assert_eq!(map.get(&1), Some("one!".to_string()));

    let copy = map.clone();
    assert_eq!(map.remove(&2), Some("two".to_string()));
    assert!(!map.contains(&2));
    assert!(copy.contains(&2), "A clone shouldn't share entries with the original.");

    {
        let frame = copy.read();
        let keys: Vec<_> = frame.keys().copied().collect();
        assert_eq!(keys, [1, 2], "A cursor should be usable inside a read frame.");
    }

    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(map.into_inner().len(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_matches_btree_map(ops in proptest::collection::vec(op(), 1..300)) {
        let mut map = TreeMap::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                },
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                },
            }
            validate(&map);
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert!(map.iter().eq(model.iter()));
        let copy = map.clone();
        prop_assert_eq!(shape(&copy), shape(&map));
    }
}
