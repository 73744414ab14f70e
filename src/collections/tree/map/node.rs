use std::ptr::{self, NonNull};

use derive_more::IsVariant;

/// The color of a node in a red-black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The single-character tag used when rendering a tree.
    pub const fn tag(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Black => 'B',
        }
    }
}

/// The side of a parent that a child hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

pub(crate) type Link<K, V> = Option<NodePtr<K, V>>;

// NOTE: Children are owned by their parent (and the root by the map), but the pointers are stored
// as NonNull in both directions so that rotations can relink nodes without moving them. Every node
// is allocated through Box and released with take_node, exactly once.

pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub parent: Link<K, V>,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub const fn new(key: K, value: V, color: Color, parent: Link<K, V>) -> Node<K, V> {
        Node {
            key,
            value,
            color,
            parent,
            left: None,
            right: None,
        }
    }
}

pub(crate) struct NodePtr<K, V>(pub NonNull<Node<K, V>>);

// The accessors below hand out references with an unbounded lifetime, like the pointers they come
// from. Callers tie them to a borrow of the owning map.
impl<K, V> NodePtr<K, V> {
    pub fn from_node(node: Node<K, V>) -> NodePtr<K, V> {
        NodePtr(NonNull::from(Box::leak(Box::new(node))))
    }

    /// Releases the allocation behind this pointer, returning the node it held.
    ///
    /// # Safety
    /// The pointer must not be used again, and no other pointer to the same node may be
    /// dereferenced afterwards.
    pub unsafe fn take_node(self) -> Node<K, V> {
        // SAFETY: Every NodePtr is created by from_node, from a leaked Box, and the caller
        // guarantees that this is the only release.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    pub const fn key<'a>(self) -> &'a K {
        // SAFETY: Nodes live until take_node, which is only called once they're unlinked.
        unsafe { &(*self.0.as_ptr()).key }
    }

    pub const fn value<'a>(self) -> &'a V {
        // SAFETY: As above.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn value_mut<'a>(self) -> &'a mut V {
        // SAFETY: As above, and the caller holds the map mutably.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub const fn entry<'a>(self) -> (&'a K, &'a V) {
        (self.key(), self.value())
    }

    pub const fn color(self) -> Color {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).color }
    }

    pub fn set_color(self, color: Color) {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).color = color }
    }

    pub fn is_red(self) -> bool {
        self.color().is_red()
    }

    pub fn is_black(self) -> bool {
        self.color().is_black()
    }

    pub const fn parent(self) -> Link<K, V> {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).parent }
    }

    pub fn set_parent(self, parent: Link<K, V>) {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).parent = parent }
    }

    pub const fn left(self) -> Link<K, V> {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).left }
    }

    pub const fn right(self) -> Link<K, V> {
        // SAFETY: As above.
        unsafe { (*self.0.as_ptr()).right }
    }

    pub const fn child(self, dir: Dir) -> Link<K, V> {
        match dir {
            Dir::Left => self.left(),
            Dir::Right => self.right(),
        }
    }

    pub fn set_child(self, dir: Dir, child: Link<K, V>) {
        // SAFETY: As above.
        unsafe {
            match dir {
                Dir::Left => (*self.0.as_ptr()).left = child,
                Dir::Right => (*self.0.as_ptr()).right = child,
            }
        }
    }

    /// Returns the side of its parent that this node hangs from, or None for the root.
    pub fn dir(self) -> Option<Dir> {
        let parent = self.parent()?;
        if parent.left() == Some(self) {
            Some(Dir::Left)
        } else {
            Some(Dir::Right)
        }
    }

    /// Follows left children as far as possible, to the smallest key in this subtree.
    pub fn leftmost(self) -> NodePtr<K, V> {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// Follows right children as far as possible, to the largest key in this subtree.
    pub fn rightmost(self) -> NodePtr<K, V> {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Exchanges the keys and values of two distinct nodes, leaving their colors and links in
    /// place.
    pub fn swap_entries(self, other: NodePtr<K, V>) {
        debug_assert!(self != other);
        let (a, b) = (self.0.as_ptr(), other.0.as_ptr());
        // SAFETY: Both nodes are live and distinct, so the fields don't overlap.
        unsafe {
            ptr::swap(&raw mut (*a).key, &raw mut (*b).key);
            ptr::swap(&raw mut (*a).value, &raw mut (*b).value);
        }
    }
}

impl<K, V> Clone for NodePtr<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodePtr<K, V> {}

impl<K, V> PartialEq for NodePtr<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, V> Eq for NodePtr<K, V> {}

/// Absent children count as black.
pub(crate) fn is_red<K, V>(link: Link<K, V>) -> bool {
    link.is_some_and(NodePtr::is_red)
}
