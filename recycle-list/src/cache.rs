use alloc::vec::Vec;

use crate::key::{KeyMap, ListKey};
use crate::{NodePool, SizeModel, Surface, Window};

/// A node currently attached to the surface, with the geometry it was last placed at.
#[derive(Clone, Debug)]
pub struct RenderedNode<N> {
    pub node: N,
    pub index: usize,
    pub top: u64,
    pub height: u32,
    dirty: bool,
}

/// What a reconcile pass did. Useful for tests and trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Nodes created because the pool was empty.
    pub created: usize,
    /// Nodes taken from the pool.
    pub reused: usize,
    /// Render callback invocations (new rows plus stale cached rows).
    pub rendered: usize,
    /// Nodes detached and returned to the pool.
    pub released: usize,
    /// Nodes detached and freed because the pool was full.
    pub discarded: usize,
}

/// Key → attached node map, reconciled against a [`Window`].
#[derive(Clone, Debug)]
pub struct RenderCache<K, N> {
    entries: KeyMap<K, RenderedNode<N>>,
    // Scratch buffers reused across passes.
    wanted: KeyMap<K, usize>,
    order: Vec<(K, usize)>,
    stale: Vec<K>,
}

impl<K: ListKey, N> Default for RenderCache<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ListKey, N> RenderCache<K, N> {
    pub fn new() -> Self {
        Self {
            entries: KeyMap::default(),
            wanted: KeyMap::default(),
            order: Vec::new(),
            stale: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&RenderedNode<N>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over attached nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &RenderedNode<N>)> {
        self.entries.iter()
    }

    /// Flags the entry for `key` to be re-rendered by the next [`Self::reconcile`].
    ///
    /// Returns `false` when the key is not rendered (it will render fresh once visible).
    pub fn mark_dirty(&mut self, key: &K) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Makes the cache hold exactly one placed node per row of `window`.
    ///
    /// Rows leaving the window are detached and pooled; rows entering it get a pooled (or new)
    /// node, are rendered, placed and attached. Rows that stay are re-rendered only when marked
    /// dirty or moved to a different index, and re-placed when their geometry changed.
    pub fn reconcile<S>(
        &mut self,
        window: Window,
        sizes: &SizeModel,
        pool: &mut NodePool<N>,
        surface: &mut S,
        mut key_of: impl FnMut(usize) -> K,
        mut render: impl FnMut(&mut S, &mut N, usize),
    ) -> ReconcileReport
    where
        S: Surface<Node = N>,
    {
        let mut report = ReconcileReport::default();

        self.wanted.clear();
        self.order.clear();
        for index in window.indices() {
            let key = key_of(index);
            if self.wanted.contains_key(&key) {
                vwarn!(index, "RenderCache: duplicate item key in window, row skipped");
                continue;
            }
            self.wanted.insert(key.clone(), index);
            self.order.push((key, index));
        }

        self.stale.clear();
        for key in self.entries.keys() {
            if !self.wanted.contains_key(key) {
                self.stale.push(key.clone());
            }
        }
        for key in self.stale.drain(..) {
            if let Some(entry) = self.entries.remove(&key) {
                let mut node = entry.node;
                surface.detach(&mut node);
                if release_or_discard(pool, surface, node) {
                    report.released += 1;
                } else {
                    report.discarded += 1;
                }
            }
        }

        for (key, index) in self.order.drain(..) {
            let top = sizes.offset_of(index);
            let height = sizes.height_of(index);

            if let Some(entry) = self.entries.get_mut(&key) {
                let rerender = entry.dirty || entry.index != index;
                if rerender {
                    render(surface, &mut entry.node, index);
                    report.rendered += 1;
                    entry.dirty = false;
                    entry.index = index;
                }
                if rerender || entry.top != top || entry.height != height {
                    surface.place(&mut entry.node, top, height);
                    entry.top = top;
                    entry.height = height;
                }
                continue;
            }

            let mut node = match pool.acquire() {
                Some(node) => {
                    report.reused += 1;
                    node
                }
                None => {
                    report.created += 1;
                    surface.create_node()
                }
            };
            render(surface, &mut node, index);
            report.rendered += 1;
            surface.place(&mut node, top, height);
            surface.attach(&mut node);
            self.entries.insert(
                key,
                RenderedNode {
                    node,
                    index,
                    top,
                    height,
                    dirty: false,
                },
            );
        }

        vtrace!(
            rendered = report.rendered,
            created = report.created,
            reused = report.reused,
            released = report.released,
            discarded = report.discarded,
            "RenderCache::reconcile"
        );
        report
    }

    /// Detaches every entry, returning nodes to the pool (or freeing them when it is full).
    ///
    /// Returns the number of entries that were dropped from the cache.
    pub fn clear<S>(&mut self, pool: &mut NodePool<N>, surface: &mut S) -> usize
    where
        S: Surface<Node = N>,
    {
        let n = self.entries.len();
        for (_, entry) in core::mem::take(&mut self.entries) {
            let mut node = entry.node;
            surface.detach(&mut node);
            release_or_discard(pool, surface, node);
        }
        if n > 0 {
            vdebug!(entries = n, "RenderCache::clear");
        }
        n
    }
}

fn release_or_discard<S: Surface>(
    pool: &mut NodePool<S::Node>,
    surface: &mut S,
    node: S::Node,
) -> bool {
    match pool.release(node) {
        Ok(()) => true,
        Err(node) => {
            surface.discard(node);
            false
        }
    }
}
