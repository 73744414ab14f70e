use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;

use super::{Color, Cursor, Dir, Iter, Keys, Link, Node, NodePtr, Traversal, Values, Walk, is_red};
use crate::collections::traits::{Comparator, NaturalOrder, Stringifier};
use crate::util::option::OptionExtension;

/// A map of keys to values, ordered by a [`Comparator`] and stored in a red-black tree.
///
/// The comparator decides both the order of the keys and their identity: two keys that compare
/// [`Equal`](Ordering::Equal) are the same key, so inserting the second replaces the value of the
/// first. By default, keys are ordered by their [`Ord`] implementation ([`NaturalOrder`]).
///
/// It is a logic error for a key to be modified in a way that changes its ordering while it is in
/// the map. Because of this, TreeMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the TreeMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `get` | `O(log n)` |
/// | `contains` | `O(log n)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `first/last_entry` | `O(log n)` |
/// | `clear` | `O(n)` |
/// | `clone` | `O(n)` |
/// | `height` | `O(n)` |
///
/// Every path from the root to a missing child passes through the same number of black nodes,
/// and no red node has a red child, so the tree's height never exceeds `2 log2(n + 1)`.
pub struct TreeMap<K, V, C = NaturalOrder> {
    pub(crate) root: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
    pub(crate) fmt: Option<Stringifier<K, V>>,
    pub(crate) _phantom: PhantomData<Box<Node<K, V>>>,
}

// SAFETY: TreeMap owns all of its nodes (and through them, the keys and values), so it can be sent
// or shared exactly when its contents and comparator can be.
unsafe impl<K: Send, V: Send, C: Send> Send for TreeMap<K, V, C> {}
// SAFETY: Shared access only hands out shared references to keys and values.
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for TreeMap<K, V, C> {}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates a new, empty TreeMap ordered by the keys' [`Ord`] implementation.
    pub const fn new() -> TreeMap<K, V> {
        TreeMap::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates a new, empty TreeMap that orders its keys with `cmp`.
    pub const fn with_comparator(cmp: C) -> TreeMap<K, V, C> {
        TreeMap {
            root: None,
            len: 0,
            cmp,
            fmt: None,
            _phantom: PhantomData,
        }
    }

    /// Creates a new, empty TreeMap that orders its keys with `cmp` and renders its entries with
    /// `fmt`.
    pub const fn with_comparator_and_stringifier(
        cmp: C,
        fmt: Stringifier<K, V>,
    ) -> TreeMap<K, V, C> {
        TreeMap {
            root: None,
            len: 0,
            cmp,
            fmt: Some(fmt),
            _phantom: PhantomData,
        }
    }

    /// Sets the function used to render entries, see [`TreeMap::render`].
    pub fn set_stringifier(&mut self, fmt: Stringifier<K, V>) {
        self.fmt = Some(fmt);
    }

    /// Returns the comparator used to order this TreeMap.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of entries in the TreeMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the TreeMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry with the smallest key, if the map isn't empty.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| root.leftmost().entry())
    }

    /// Returns the entry with the largest key, if the map isn't empty.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| root.rightmost().entry())
    }

    /// Removes and returns the entry with the smallest key, if the map isn't empty.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = self.root?.leftmost();
        Some(self.remove_node(node))
    }

    /// Removes and returns the entry with the largest key, if the map isn't empty.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = self.root?.rightmost();
        Some(self.remove_node(node))
    }

    /// Removes every entry from the TreeMap. Nodes are released in post-order, so each child is
    /// dropped before its parent.
    pub fn clear(&mut self) {
        let released = self.len;
        let mut walk = Walk::new(self.root.take(), Traversal::PostOrder);

        while let Some(node) = walk.next_node() {
            // SAFETY: The walk has already moved past this node and will only compare its address
            // from here on, the root was taken so nothing else refers to it.
            drop(unsafe { node.take_node() });
        }

        self.len = 0;

        if released > 0 {
            log::debug!("cleared TreeMap, released {released} entries");
        }
    }

    /// Returns a [`Cursor`] that visits every entry in the provided `traversal` order.
    pub fn cursor(&self, traversal: Traversal) -> Cursor<'_, K, V> {
        Cursor::new(self.root, self.len, traversal)
    }

    /// Returns an iterator over all entries in ascending key order, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in ascending order, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values in ascending key order, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns the number of levels in the tree, counted row by row in level order. An empty
    /// tree has a height of 0.
    pub fn height(&self) -> usize {
        let mut row: Vec<NodePtr<K, V>> = self.root.into_iter().collect();
        let mut height = 0;

        while !row.is_empty() {
            row = row.iter()
                .flat_map(|node| [node.left(), node.right()])
                .flatten()
                .collect();
            height += 1;
        }

        height
    }

    /// Removes `node` from the tree and returns its entry, rebalancing as required.
    pub(crate) fn remove_node(&mut self, mut target: NodePtr<K, V>) -> (K, V) {
        // With two children, trade places with the in-order successor, which has no left child.
        if target.left().is_some()
            && let Some(right) = target.right()
        {
            let successor = right.leftmost();
            target.swap_entries(successor);
            target = successor;
        }

        // The target now has at most one child. Removing a black node shortens every path through
        // it, which a red child can absorb by turning black. Without one, the deficit has to be
        // repaired before the node is unlinked.
        let child = target.left().or(target.right());
        if target.is_black() && target.parent().is_some() && !is_red(child) {
            self.repair_double_black(target);
        }

        let parent = target.parent();
        self.replace_child(parent, target, child);
        if let Some(child) = child {
            child.set_parent(parent);
            child.set_color(Color::Black);
        }

        self.len -= 1;
        // SAFETY: The target has just been unlinked from both its parent and its child.
        let node = unsafe { target.take_node() };
        (node.key, node.value)
    }

    /// Points whichever link referred to `old` (the root, or a child of `parent`) at `new`
    /// instead. Doesn't update `new`'s parent.
    fn replace_child(&mut self, parent: Link<K, V>, old: NodePtr<K, V>, new: Link<K, V>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let dir = if parent.left() == Some(old) { Dir::Left } else { Dir::Right };
                parent.set_child(dir, new);
            },
        }
    }

    /// Rotates the subtree at `node` in the direction `dir`, lifting the child on the opposite
    /// side into its place. A left rotation lifts the right child, and vice versa.
    pub(crate) fn rotate(&mut self, node: NodePtr<K, V>, dir: Dir) {
        // SAFETY: Rotations are only requested towards a side whose opposite child exists.
        let lifted = unsafe { node.child(dir.opposite()).unreachable() };
        let inner = lifted.child(dir);

        node.set_child(dir.opposite(), inner);
        if let Some(inner) = inner {
            inner.set_parent(Some(node));
        }

        let parent = node.parent();
        self.replace_child(parent, node, Some(lifted));
        lifted.set_parent(parent);

        lifted.set_child(dir, Some(node));
        node.set_parent(Some(lifted));
    }

    /// Restores the red-black properties after `child` was attached as a red leaf.
    fn repair_red_red(&mut self, mut child: NodePtr<K, V>) {
        while let Some(mut parent) = child.parent()
            && parent.is_red()
        {
            // SAFETY: A red node is never the root, so the parent has a parent.
            let grandparent = unsafe { parent.parent().unreachable() };
            // SAFETY: The parent has a parent, as above.
            let parent_dir = unsafe { parent.dir().unreachable() };

            if let Some(uncle) = grandparent.child(parent_dir.opposite())
                && uncle.is_red()
            {
                // Case A: push the grandparent's blackness down onto both of its children.
                parent.set_color(Color::Black);
                uncle.set_color(Color::Black);
                if grandparent.parent().is_none() {
                    break;
                }
                grandparent.set_color(Color::Red);
                child = grandparent;
                continue;
            }

            // Case B: an inner grandchild is rotated outwards, swapping it with its parent.
            if child.dir() != Some(parent_dir) {
                self.rotate(parent, parent_dir);
                mem::swap(&mut child, &mut parent);
            }

            // Case C: the parent takes the grandparent's place.
            self.rotate(grandparent, parent_dir.opposite());
            grandparent.set_color(Color::Red);
            parent.set_color(Color::Black);
            break;
        }

        if let Some(root) = self.root {
            root.set_color(Color::Black);
        }
    }

    /// Repairs the black-height deficit that removing the black, childless, non-root `node` would
    /// cause. The node stays linked and is unlinked by the caller afterwards.
    fn repair_double_black(&mut self, mut node: NodePtr<K, V>) {
        while let Some(parent) = node.parent() {
            // SAFETY: The node has a parent, so it is one of the parent's children.
            let dir = unsafe { node.dir().unreachable() };
            // SAFETY: The node's path carries at least one more black node than the root does, so
            // the other side of the parent can't be empty.
            let sibling = unsafe { parent.child(dir.opposite()).unreachable() };

            if sibling.is_red() {
                // Case 2: make the sibling black by lifting it above the parent.
                self.rotate(parent, dir);
                parent.set_color(Color::Red);
                sibling.set_color(Color::Black);
                continue;
            }

            let near = sibling.child(dir);
            let far = sibling.child(dir.opposite());

            if !is_red(near) && !is_red(far) {
                sibling.set_color(Color::Red);
                if parent.is_red() {
                    // Case 4: the parent's red absorbs the deficit.
                    parent.set_color(Color::Black);
                    break;
                }
                // Case 3: the whole parent subtree is now short, move the problem upwards.
                node = parent;
                continue;
            }

            if !is_red(far) {
                // Case 5: bring the red near nephew to the far side, then continue into case 6.
                // SAFETY: At least one nephew is red and it isn't the far one.
                let near = unsafe { near.unreachable() };
                self.rotate(sibling, dir.opposite());
                near.set_color(Color::Black);
                sibling.set_color(Color::Red);
                continue;
            }

            // Case 6: lift the sibling above the parent, spending the far nephew's red.
            self.rotate(parent, dir);
            sibling.set_color(parent.color());
            parent.set_color(Color::Black);
            if let Some(far) = far {
                far.set_color(Color::Black);
            }
            break;
        }
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Inserts the provided `key`-`value` pair into the TreeMap. If an equal key was already
    /// present, its value is replaced and the previous value is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut node) = self.root else {
            self.root = Some(NodePtr::from_node(Node::new(key, value, Color::Black, None)));
            self.len = 1;
            return None;
        };

        let dir = loop {
            let dir = match self.cmp.compare(&key, node.key()) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return Some(mem::replace(node.value_mut(), value)),
            };

            match node.child(dir) {
                Some(child) => node = child,
                None => break dir,
            }
        };

        let leaf = NodePtr::from_node(Node::new(key, value, Color::Red, Some(node)));
        node.set_child(dir, Some(leaf));
        self.len += 1;

        self.repair_red_red(leaf);
        None
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(NodePtr::entry)
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(NodePtr::value)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if
    /// the map contains no value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(NodePtr::value_mut)
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        Some(self.remove_node(node))
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Walks from the root towards `key`, returning the node holding an equal key.
    pub(crate) fn find(&self, key: &K) -> Link<K, V> {
        let mut node = self.root;

        while let Some(current) = node {
            node = match self.cmp.compare(key, current.key()) {
                Ordering::Less => current.left(),
                Ordering::Greater => current.right(),
                Ordering::Equal => return Some(current),
            };
        }

        None
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    /// Creates an independent copy of the TreeMap with the same shape and colors, by visiting the
    /// source in pre-order and placing every entry at the matching position of the copy.
    fn clone(&self) -> Self {
        let mut copy = TreeMap {
            root: None,
            len: 0,
            cmp: self.cmp.clone(),
            fmt: self.fmt,
            _phantom: PhantomData,
        };

        // Pending source nodes, each with the copied parent and side they belong under.
        let mut pending: Vec<(NodePtr<K, V>, Option<(NodePtr<K, V>, Dir)>)> = Vec::new();
        pending.extend(self.root.map(|root| (root, None)));

        while let Some((source, place)) = pending.pop() {
            let node = NodePtr::from_node(Node::new(
                source.key().clone(),
                source.value().clone(),
                source.color(),
                place.map(|(parent, _)| parent),
            ));

            match place {
                None => copy.root = Some(node),
                Some((parent, dir)) => parent.set_child(dir, Some(node)),
            }
            copy.len += 1;

            if let Some(right) = source.right() {
                pending.push((right, Some((node, Dir::Right))));
            }
            if let Some(left) = source.left() {
                pending.push((left, Some((node, Dir::Left))));
            }
        }

        copy
    }
}

impl<K, V, C> Drop for TreeMap<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Debug, V: Debug, C: Debug> Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMap")
            .field("nodes", &DebugBranch(self.root))
            .field("len", &self.len)
            .field("cmp", &self.cmp)
            .finish()
    }
}

impl<K: Debug, V: Debug, C> Display for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Formats a subtree sideways, with the left branch above and the right branch below each node.
struct DebugBranch<K, V>(Link<K, V>);

impl<K: Debug, V: Debug> Debug for DebugBranch<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => {
                let indent = |prefix: &'static str, branch: Link<K, V>| {
                    format!("{:?}", DebugBranch(branch))
                        .lines()
                        .map(|l| format!("{prefix}{l}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                };

                write!(
                    f,
                    "{}\n({:?}: {:?}) {}\n{}",
                    indent("┌    ", node.left()),
                    node.key(),
                    node.value(),
                    node.color().tag(),
                    indent("└    ", node.right()),
                )
            },
            None => write!(f, "-"),
        }
    }
}
