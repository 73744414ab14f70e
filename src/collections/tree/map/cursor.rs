use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use derive_more::IsVariant;

use super::{Link, NodePtr};

/// The order in which a [`Cursor`] visits the nodes of a [`TreeMap`](super::TreeMap).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Traversal {
    /// Left subtree, node, right subtree. Yields keys in ascending order.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree. Yields every parent before its children.
    PreOrder,
    /// Left subtree, right subtree, node. Yields every child before its parent.
    PostOrder,
}

/// A stack-based walk over the nodes of a tree, shared by [`Cursor`] and the map's own
/// structural operations.
///
/// The stack only ever holds a path of nodes from (at most) the root downwards, so its depth is
/// bounded by the height of the tree. A node is never dereferenced by the walk after it has been
/// yielded, which lets post-order walks release each node as soon as they receive it.
pub(crate) struct Walk<K, V> {
    pub mode: Traversal,
    pub stack: Vec<NodePtr<K, V>>,
    pub last: Link<K, V>,
}

impl<K, V> Walk<K, V> {
    pub fn new(root: Link<K, V>, mode: Traversal) -> Walk<K, V> {
        let mut walk = Walk {
            mode,
            stack: Vec::new(),
            last: None,
        };

        if let Some(root) = root {
            match mode {
                Traversal::InOrder => walk.descend_left(root),
                Traversal::PreOrder => walk.stack.push(root),
                Traversal::PostOrder => walk.descend_to_leaf(root),
            }
        }

        walk
    }

    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn next_node(&mut self) -> Option<NodePtr<K, V>> {
        let node = self.stack.pop()?;
        self.last = Some(node);

        match self.mode {
            Traversal::InOrder => {
                if let Some(right) = node.right() {
                    self.descend_left(right);
                }
            },
            Traversal::PreOrder => {
                // Right first, so that the left subtree is popped first.
                if let Some(right) = node.right() {
                    self.stack.push(right);
                }
                if let Some(left) = node.left() {
                    self.stack.push(left);
                }
            },
            Traversal::PostOrder => {
                // The top of the stack is the parent of the node just yielded. Having finished its
                // left subtree, the parent's right subtree comes next.
                if let Some(&parent) = self.stack.last()
                    && parent.left() == self.last
                    && let Some(right) = parent.right()
                {
                    self.descend_to_leaf(right);
                }
            },
        }

        Some(node)
    }

    fn descend_left(&mut self, mut node: NodePtr<K, V>) {
        loop {
            self.stack.push(node);
            match node.left() {
                Some(left) => node = left,
                None => break,
            }
        }
    }

    fn descend_to_leaf(&mut self, mut node: NodePtr<K, V>) {
        loop {
            self.stack.push(node);
            match node.left().or(node.right()) {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

/// A type for traversing a [`TreeMap`](super::TreeMap) in a chosen [`Traversal`] order. Produces
/// values of type `(&K, &V)`.
///
/// A Cursor borrows the map it traverses, so the map can't be mutated while a Cursor exists. For
/// a [`SyncTreeMap`](super::SyncTreeMap), a Cursor is created from a read frame and lives no
/// longer than it. Cursors are not [`Send`]: they're meant for the thread that created them.
///
/// See [`TreeMap::cursor`](super::TreeMap::cursor).
pub struct Cursor<'a, K, V> {
    pub(crate) walk: Walk<K, V>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize, mode: Traversal) -> Cursor<'a, K, V> {
        Cursor {
            walk: Walk::new(root, mode),
            remaining: len,
            _phantom: PhantomData,
        }
    }

    /// Returns the order this Cursor visits entries in.
    pub const fn traversal(&self) -> Traversal {
        self.walk.mode
    }

    /// Returns true if there are entries left to visit.
    pub fn has_next(&self) -> bool {
        self.walk.has_next()
    }

    /// Returns the entry most recently produced by [`next`](Iterator::next), if any.
    pub fn last_yielded(&self) -> Option<(&'a K, &'a V)> {
        self.walk.last.map(NodePtr::entry)
    }
}

impl<'a, K, V> Iterator for Cursor<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.walk.next_node()?;
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Cursor<'_, K, V> {}

impl<K, V> FusedIterator for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("traversal", &self.walk.mode)
            .field("last", &self.last_yielded())
            .field("remaining", &self.remaining)
            .finish()
    }
}
