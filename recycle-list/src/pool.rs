use alloc::vec::Vec;

/// A bounded stack of detached nodes waiting to be reused.
///
/// The pool is owned by a single list; it never grows past `capacity`.
#[derive(Clone, Debug)]
pub struct NodePool<N> {
    free: Vec<N>,
    capacity: usize,
}

impl<N> NodePool<N> {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.free.len() >= self.capacity
    }

    /// Takes the most recently released node, if any.
    pub fn acquire(&mut self) -> Option<N> {
        self.free.pop()
    }

    /// Returns a node to the pool.
    ///
    /// When the pool is full the node is handed back as `Err` so the caller can free it.
    pub fn release(&mut self, node: N) -> Result<(), N> {
        if self.is_full() {
            return Err(node);
        }
        self.free.push(node);
        Ok(())
    }

    /// Removes every pooled node, yielding them to `f`.
    pub fn drain(&mut self, f: impl FnMut(N)) {
        self.free.drain(..).for_each(f);
    }

    /// Changes the bound, handing surplus nodes to `f`.
    pub fn set_capacity(&mut self, capacity: usize, f: impl FnMut(N)) {
        self.capacity = capacity;
        if self.free.len() > capacity {
            self.free.drain(capacity..).for_each(f);
        }
    }
}
