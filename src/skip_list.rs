//- skip_list
//- --
//- A scored, ordered skip list map.

//- A skip list keeps its entries sorted in a base linked list, and promotes a random subset of them
//- into sparser "fast lanes" stacked above it. A search starts in the sparsest lane and drops down a
//- level whenever the next step would overshoot, so lookups, inserts and removals take `O(log(N))`
//- expected time without any rebalancing.
//=

//- Type Definitions
//- ==
//=
//- Keys are compared in two steps. Every key is first reduced to an `f64` score (see `score.rs`),
//- and only when two scores tie does the list ask the ordering policy (see `order.rs`). For integer
//- keys the score alone settles almost every comparison.
use std::fmt;
use std::mem;

use log::{debug, trace};
use rand::RngCore;
use slab::Slab;

use crate::error::{Error, Result};
use crate::level::{self, GlobalRandSource};
use crate::node::{Link, Node, NodeRef};
use crate::option::Options;
use crate::order::{KeyOrder, Orientation};
use crate::score::{self, Scorable};

//- Nodes are stored in a `Slab` and link to each other by slot index, which keeps the borrow checker
//- out of the picture even though level 0 is doubly linked. Unlike a single `Vec` of nodes, the slab
//- recycles the slots of removed nodes.

//- Each node carries its own `next` array, one link per level it takes part in, so a node is stored
//- once no matter how tall it is. The list keeps one head link per level. A `None` head means no node
//- reaches that level.

//- `levels` may be longer than `max_level` after the ceiling was lowered, see `set_max_level`. Every
//- walk stops at `max_level`.
pub struct SkipList<K, V, O> {
    nodes: Slab<Node<K, V>>,
    levels: Vec<Link>,
    max_level: usize,
    tail: Link,
    order: O,
    orientation: Orientation,
    rng: Box<dyn RngCore + Send>,
    prevs: Vec<Link>,
}

//- Construction
//- ==
//=
//- A list needs nothing but an ordering policy. Its height ceiling comes from `Options`, whose default
//- reads the process-wide default max level. A zero ceiling is rejected here rather than discovered on
//- the first insert.
impl<K, V, O> SkipList<K, V, O>
where
    K: Scorable,
    O: KeyOrder<K>,
{
    pub fn new(order: O) -> Result<Self> {
        Self::with_options(order, Options::default())
    }

    pub fn with_options(order: O, options: Options) -> Result<Self> {
        options.validate()?;
        let orientation = order.orientation();
        debug!(
            "new skip list: max_level={} orientation={:?}",
            options.max_level, orientation
        );
        Ok(Self {
            nodes: Slab::new(),
            levels: vec![None; options.max_level],
            max_level: options.max_level,
            tail: None,
            order,
            orientation,
            rng: Box::new(GlobalRandSource),
            prevs: Vec::with_capacity(options.max_level),
        })
    }

    //- Heights are drawn from the shared global generator by default. A list owned by a single thread
    //- can take its own generator and skip the global lock.
    pub fn set_rand_source<R: RngCore + Send + 'static>(&mut self, source: R) {
        debug!("skip list rand source replaced");
        self.rng = Box::new(source);
    }

    //- Search
    //- ==
    //=
    //- The core of every operation is the same walk. Starting from `start` at level `top - 1`, move
    //- forward while the next node sorts strictly before the target, then drop a level. The last node
    //- visited on each level is that level's predecessor, which `visit` may record. When the walk
    //- finishes, the node after the returned cursor at level 0 is the first node not before the
    //- target: the ceiling.
    fn descend(
        &self,
        start: Link,
        top: usize,
        score: f64,
        key: &K,
        mut visit: impl FnMut(usize, Link),
    ) -> Link {
        let mut cur = start;
        for level in (0..top).rev() {
            let mut next = self.next_of(cur, level);
            while let Some(idx) = next {
                if !self.is_before(idx, score, key) {
                    break;
                }
                cur = Some(idx);
                next = self.nodes[idx].next[level];
            }
            visit(level, cur);
        }
        cur
    }

    //- Score first, ordering policy only on a tie.
    #[inline]
    fn is_before(&self, idx: usize, score: f64, key: &K) -> bool {
        let node = &self.nodes[idx];
        node.score < score || (node.score == score && self.order.compare(key, node.key()))
    }

    #[inline]
    fn is_match(&self, idx: usize, score: f64, key: &K) -> bool {
        let node = &self.nodes[idx];
        node.score == score
            && !self.order.compare(node.key(), key)
            && !self.order.compare(key, node.key())
    }

    #[inline]
    fn score_of(&self, key: &K) -> f64 {
        score::oriented_score(key, self.orientation)
    }

    //- Fills `prevs` with the predecessor of `key` on every visible level
    //- and returns the level-0 cursor.
    fn predecessors(&self, score: f64, key: &K, prevs: &mut Vec<Link>) -> Link {
        prevs.clear();
        prevs.resize(self.max_level, None);
        self.descend(None, self.max_level, score, key, |level, at| prevs[level] = at)
    }

    pub(crate) fn predecessor_at(&self, idx: usize, level: usize) -> Link {
        let node = &self.nodes[idx];
        let mut found = None;
        self.descend(None, self.max_level, node.score, node.key(), |at_level, at| {
            if at_level == level {
                found = at;
            }
        });
        found
    }

    //- Exact match: the ceiling, if it carries the same key.
    pub fn get(&self, key: &K) -> Option<NodeRef<'_, K, V, O>> {
        let score = self.score_of(key);
        let cur = self.descend(None, self.max_level, score, key, |_, _| {});
        self.next_of(cur, 0)
            .filter(|&idx| self.is_match(idx, score, key))
            .map(|idx| NodeRef::new(self, idx))
    }

    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.get(key).map(|node| node.value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.get(key)?.index();
        Some(&mut self.nodes[idx].value)
    }

    //- Like `get_value`, for keys that must be present.
    pub fn value_of(&self, key: &K) -> Result<&V> {
        self.get_value(key).ok_or(Error::KeyNotFound)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    //- First node whose key is not before `key` in list order.
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K, V, O>> {
        let score = self.score_of(key);
        let cur = self.descend(None, self.max_level, score, key, |_, _| {});
        self.next_of(cur, 0).map(|idx| NodeRef::new(self, idx))
    }

    //- `find_next` answers the same query as `find`, but may resume from a node returned by an earlier
    //- search. If the hint sorts before the target, every node between the hint and the answer is
    //- reachable from the hint through its own levels, so the walk starts at the hint's height instead
    //- of at the top of the list. A hint that is not before the target (or belongs to another list)
    //- proves nothing, and the search restarts from the head.
    pub fn find_next(
        &self,
        hint: Option<NodeRef<'_, K, V, O>>,
        key: &K,
    ) -> Option<NodeRef<'_, K, V, O>> {
        let score = self.score_of(key);
        if let Some(hint) = hint.filter(|hint| hint.belongs_to(self)) {
            let idx = hint.index();
            if self.is_match(idx, score, key) {
                return Some(NodeRef::new(self, idx));
            }
            if self.is_before(idx, score, key) {
                let top = self.nodes[idx].next.len().min(self.max_level);
                let cur = self.descend(Some(idx), top, score, key, |_, _| {});
                return self.next_of(cur, 0).map(|idx| NodeRef::new(self, idx));
            }
        }
        self.find(key)
    }

    //- Insertion
    //- ==
    //=
    //- `set` runs the walk while recording predecessors. If the ceiling already holds the key, only the
    //- value is replaced: the node keeps its height and links. Otherwise a height is drawn and the new
    //- node is spliced in after each level's predecessor. At level 0 the back-links are patched as
    //- well, and a node with no successor becomes the new tail.
    pub fn set(&mut self, key: K, value: V) -> NodeRef<'_, K, V, O> {
        let score = self.score_of(&key);
        let mut prevs = mem::take(&mut self.prevs);
        let cur = self.predecessors(score, &key, &mut prevs);

        if let Some(idx) = self.next_of(cur, 0) {
            if self.is_match(idx, score, &key) {
                self.nodes[idx].value = value;
                self.prevs = prevs;
                return NodeRef::new(self, idx);
            }
        }

        let height = level::random_level(self.rng.as_mut(), self.max_level);
        let idx = self.nodes.insert(Node::new(key, value, score, height));
        for (level, &pred) in prevs.iter().enumerate().take(height) {
            let succ = self.next_of(pred, level);
            self.nodes[idx].next[level] = succ;
            self.set_next(pred, level, Some(idx));
        }

        self.nodes[idx].prev = prevs[0];
        match self.nodes[idx].next[0] {
            Some(succ) => self.nodes[succ].prev = Some(idx),
            None => self.tail = Some(idx),
        }

        trace!("spliced node {} at height {}", idx, height);
        self.prevs = prevs;
        NodeRef::new(self, idx)
    }

    //- Removal
    //- ==
    //=
    //- Removal is the mirror image: every predecessor on the node's levels is pointed past it, the
    //- successor's back-link skips it, and the node leaves the slab with its own links cleared.
    pub fn remove(&mut self, key: &K) -> Option<Node<K, V>> {
        let score = self.score_of(key);
        let mut prevs = mem::take(&mut self.prevs);
        let cur = self.predecessors(score, key, &mut prevs);
        let mut removed = None;
        if let Some(idx) = self.next_of(cur, 0) {
            if self.is_match(idx, score, key) {
                removed = Some(self.unlink(idx, &prevs));
            }
        }
        self.prevs = prevs;
        removed
    }

    //- The front node is the first node of every level it is on, so all of its predecessors are the
    //- virtual head.
    pub fn remove_front(&mut self) -> Option<Node<K, V>> {
        let idx = self.levels[0]?;
        let mut prevs = mem::take(&mut self.prevs);
        prevs.clear();
        prevs.resize(self.max_level, None);
        let removed = self.unlink(idx, &prevs);
        self.prevs = prevs;
        Some(removed)
    }

    //- The back node is known from the tail link, but only level 0 can walk backwards. Its predecessors
    //- on the upper levels are found with an ordinary search for its own key.
    pub fn remove_back(&mut self) -> Option<Node<K, V>> {
        let idx = self.tail?;
        let mut prevs = mem::take(&mut self.prevs);
        let node = &self.nodes[idx];
        self.predecessors(node.score, node.key(), &mut prevs);
        let removed = self.unlink(idx, &prevs);
        self.prevs = prevs;
        Some(removed)
    }

    fn unlink(&mut self, idx: usize, prevs: &[Link]) -> Node<K, V> {
        let height = self.nodes[idx].next.len().min(self.max_level);
        for (level, &pred) in prevs.iter().enumerate().take(height) {
            let succ = self.nodes[idx].next[level];
            self.set_next(pred, level, succ);
        }

        let pred = self.nodes[idx].prev;
        match self.nodes[idx].next[0] {
            Some(succ) => self.nodes[succ].prev = pred,
            None => self.tail = pred,
        }

        let mut node = match self.nodes.try_remove(idx) {
            Some(node) => node,
            None => unreachable!("unlinked a vacant slot"),
        };
        node.detach();
        trace!("unspliced node {} at height {}", idx, height);
        node
    }

    //- Levels
    //- ==
    //=
    //- Raising the ceiling only extends the head array; existing nodes keep their heights and new
    //- nodes may grow taller. Lowering it is lazy: the head array and the nodes keep their upper
    //- links, and every walk simply stops at the new ceiling.
    //-
    //- Those upper links go stale as soon as the list changes under the lower ceiling, so they are
    //- never revived. When the ceiling is raised again past a previous shrink, links above the old
    //- ceiling are dropped from the head array and from every node, and the new levels start empty.
    pub fn set_max_level(&mut self, max_level: usize) -> Result<usize> {
        if max_level == 0 {
            return Err(Error::InvalidMaxLevel(max_level));
        }

        let old = mem::replace(&mut self.max_level, max_level);
        if max_level > old {
            if self.levels.len() > old {
                self.levels.truncate(old);
                for (_, node) in self.nodes.iter_mut() {
                    node.next.truncate(old);
                }
            }
            self.levels.resize(max_level, None);
        }

        debug!(
            "skip list max level {} -> {} (allocated {})",
            old,
            max_level,
            self.levels.len()
        );
        Ok(old)
    }
}

//- Accessors
//- ==
//=
//- Everything below needs no comparisons, so it is available for any key and policy.
impl<K, V, O> SkipList<K, V, O> {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    //- Allocated height of the head array; above `max_level` after a lazy
    //- shrink.
    #[inline]
    pub fn actual_max_level(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn front(&self) -> Option<NodeRef<'_, K, V, O>> {
        self.levels[0].map(|idx| NodeRef::new(self, idx))
    }

    pub fn back(&self) -> Option<NodeRef<'_, K, V, O>> {
        self.tail.map(|idx| NodeRef::new(self, idx))
    }

    //- Drops every node. The ordering policy, random source and max level
    //- are kept.
    pub fn init(&mut self) {
        debug!("skip list reset, dropping {} nodes", self.nodes.len());
        self.nodes.clear();
        self.levels = vec![None; self.max_level];
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, K, V, O> {
        Iter {
            list: self,
            front: self.levels[0],
            back: self.tail,
            remaining: self.len(),
        }
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &Node<K, V> {
        &self.nodes[idx]
    }

    #[inline]
    fn next_of(&self, at: Link, level: usize) -> Link {
        match at {
            Some(idx) => self.nodes[idx].next[level],
            None => self.levels[level],
        }
    }

    #[inline]
    fn set_next(&mut self, at: Link, level: usize, to: Link) {
        match at {
            Some(idx) => self.nodes[idx].next[level] = to,
            None => self.levels[level] = to,
        }
    }
}

//- Iteration
//- ==
//=
//- The iterator follows level 0 from both ends at once and stops when the two cursors have handed
//- out `len` items between them.
pub struct Iter<'a, K, V, O> {
    list: &'a SkipList<K, V, O>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K, V, O> Iterator for Iter<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next[0];
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O> DoubleEndedIterator for Iter<'_, K, V, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }
}

impl<K, V, O> ExactSizeIterator for Iter<'_, K, V, O> {}

impl<'a, K, V, O> IntoIterator for &'a SkipList<K, V, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Scorable, V, O: KeyOrder<K>> Extend<(K, V)> for SkipList<K, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for SkipList<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

//- This `fmt` implementation is used for Rust's `Display` trait, drawing every non-empty level above
//- the base list, with each key in the column of its level-0 position. An example of the output:
//- ```
//- [             5             ]
//- [    2        5  6        9 ]
//- [ 1  2  3  4  5  6  7  8  9 ]
//- ```
impl<K: fmt::Display, V, O> fmt::Display for SkipList<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut base = Vec::with_capacity(self.len());
        let mut cursor = self.levels[0];
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            base.push((idx, node.key().to_string()));
            cursor = node.next[0];
        }
        let width = base.iter().map(|(_, key)| key.len()).max().unwrap_or(0);

        let top = (0..self.max_level)
            .rev()
            .find(|&level| self.levels[level].is_some())
            .unwrap_or(0);
        for level in (0..=top).rev() {
            let mut cursor = self.levels[level];
            let cells: Vec<String> = base
                .iter()
                .map(|(idx, key)| {
                    if cursor == Some(*idx) {
                        cursor = self.nodes[*idx].next[level];
                        format!("{key:>width$}")
                    } else {
                        " ".repeat(width)
                    }
                })
                .collect();
            write!(f, "[ {} ]", cells.join("  "))?;
            if level > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
