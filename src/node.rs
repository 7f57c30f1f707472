use std::fmt;
use std::ptr;

use crate::error::{Error, Result};
use crate::order::KeyOrder;
use crate::score::Scorable;
use crate::skip_list::SkipList;

/// Slot index of a node, or `None` for the virtual head / end of a level.
pub(crate) type Link = Option<usize>;

/// A key-value entry with its per-level links.
///
/// Nodes live inside their list. A node handed back by a removal is
/// detached: it keeps its key, value, score and height, but no links.
#[derive(Clone)]
pub struct Node<K, V> {
    key: K,
    pub value: V,
    pub(crate) score: f64,
    pub(crate) next: Vec<Link>,
    pub(crate) prev: Link,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, score: f64, height: usize) -> Self {
        Self {
            key,
            value,
            score,
            next: vec![None; height],
            prev: None,
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Score as seen by the list that owned the node, negated for
    /// descending lists.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of levels the node was created with.
    #[inline]
    pub fn level(&self) -> usize {
        self.next.len()
    }

    /// `true` once the node no longer links to any neighbor.
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.iter().all(Option::is_none)
    }

    pub(crate) fn detach(&mut self) {
        self.next.fill(None);
        self.prev = None;
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("score", &self.score)
            .field("level", &self.level())
            .finish()
    }
}

/// Borrowed view of a node still linked into a list.
///
/// The view borrows the list, so the node it names stays valid for as long
/// as the view exists.
pub struct NodeRef<'a, K, V, O> {
    list: &'a SkipList<K, V, O>,
    index: usize,
}

impl<'a, K, V, O> NodeRef<'a, K, V, O> {
    #[inline]
    pub(crate) fn new(list: &'a SkipList<K, V, O>, index: usize) -> Self {
        Self { list, index }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn belongs_to(&self, list: &SkipList<K, V, O>) -> bool {
        ptr::eq(self.list, list)
    }

    #[inline]
    fn node(&self) -> &'a Node<K, V> {
        self.list.node(self.index)
    }

    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    #[inline]
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.node().score
    }

    /// Number of levels the node takes part in under the list's current
    /// max level.
    #[inline]
    pub fn level(&self) -> usize {
        self.node().next.len().min(self.list.max_level())
    }

    /// Next node at level 0.
    #[inline]
    pub fn next(&self) -> Option<Self> {
        self.node().next[0].map(|idx| Self::new(self.list, idx))
    }

    /// Previous node at level 0.
    #[inline]
    pub fn prev(&self) -> Option<Self> {
        self.node().prev.map(|idx| Self::new(self.list, idx))
    }

    /// Next node at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level >= self.level()`.
    pub fn next_level(&self, level: usize) -> Option<Self> {
        self.try_next_level(level).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_next_level(&self, level: usize) -> Result<Option<Self>> {
        self.check_level(level)?;
        Ok(self.node().next[level].map(|idx| Self::new(self.list, idx)))
    }

    fn check_level(&self, level: usize) -> Result<()> {
        let height = self.level();
        if level >= height {
            return Err(Error::LevelOutOfRange { level, height });
        }
        Ok(())
    }
}

impl<'a, K: Scorable, V, O: KeyOrder<K>> NodeRef<'a, K, V, O> {
    /// Previous node at `level`.
    ///
    /// Only level 0 keeps back-links; higher levels are recovered with a
    /// search for this node's key.
    ///
    /// # Panics
    ///
    /// Panics if `level >= self.level()`.
    pub fn prev_level(&self, level: usize) -> Option<Self> {
        self.try_prev_level(level).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_prev_level(&self, level: usize) -> Result<Option<Self>> {
        self.check_level(level)?;
        if level == 0 {
            return Ok(self.prev());
        }
        Ok(self
            .list
            .predecessor_at(self.index, level)
            .map(|idx| Self::new(self.list, idx)))
    }
}

impl<K, V, O> Clone for NodeRef<'_, K, V, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, O> Copy for NodeRef<'_, K, V, O> {}

/// Two views are equal when they name the same node of the same list.
impl<K, V, O> PartialEq for NodeRef<'_, K, V, O> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.index == other.index
    }
}

impl<K, V, O> Eq for NodeRef<'_, K, V, O> {}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for NodeRef<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("score", &self.score())
            .field("level", &self.level())
            .finish()
    }
}
