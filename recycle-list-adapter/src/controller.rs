use alloc::vec::Vec;
use core::fmt;

use recycle_list::{
    ItemKey, ListKey, NodePool, RenderCache, RenderedNode, SizeModel, Surface, Window,
    compute_range,
};

use crate::scroll::Recompute;
use crate::{
    ItemRenderer, ListOptions, ScrollBehavior, ScrollContainer, ScrollCoordinator, ScrollPhase,
    Stats, VisibleRange,
};

/// A recycling virtual list bound to a scroll container.
///
/// The controller owns the item sequence, the size model, the rendered-node cache and the node
/// pool. It does not own an event loop. The host drives it by calling:
/// - `on_scroll(now_ms)` for every scroll notification (coalesced to one `on_frame`)
/// - `on_frame()` when the frame requested via `ScrollContainer::request_frame` fires
/// - `on_resize()` when the viewport changes size (handled synchronously)
/// - `tick(now_ms)` from a timer, to leave the scrolling state after a quiet period
pub struct Controller<T, C: ScrollContainer, K = ItemKey> {
    options: ListOptions<T, C::Node, K>,
    container: C,
    items: Vec<T>,
    sizes: SizeModel,
    cache: RenderCache<K, C::Node>,
    pool: NodePool<C::Node>,
    scroll: ScrollCoordinator,
    window: Window,
    viewport_size: u32,
    scroll_offset: u64,
    needs_reconcile: bool,
    destroyed: bool,
}

impl<T, C, K> Controller<T, C, K>
where
    C: ScrollContainer,
    K: ListKey,
{
    /// Subscribes to `container`, reads its geometry and renders the (empty) list.
    pub fn create(mut container: C, options: ListOptions<T, C::Node, K>) -> Self {
        vdebug!(
            item_height = options.config.item_height,
            overscan = options.config.overscan,
            dynamic_height = options.config.dynamic_height,
            pool_capacity = options.config.pool_capacity,
            "Controller::create"
        );
        container.subscribe();
        let viewport_size = container.viewport_size();
        let scroll_offset = container.scroll_offset();
        let mut c = Self {
            sizes: SizeModel::from_config(&options.config),
            pool: NodePool::new(options.config.pool_capacity),
            scroll: ScrollCoordinator::new(options.config.is_scrolling_reset_delay_ms),
            cache: RenderCache::new(),
            items: Vec::new(),
            window: Window::Empty,
            viewport_size,
            scroll_offset,
            needs_reconcile: true,
            destroyed: false,
            options,
            container,
        };
        c.render();
        c
    }

    pub fn options(&self) -> &ListOptions<T, C::Node, K> {
        &self.options
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn size_model(&self) -> &SizeModel {
        &self.sizes
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    /// When the host should call [`Self::tick`] next to leave the scrolling state.
    pub fn idle_deadline(&self) -> Option<u64> {
        self.scroll.idle_deadline()
    }

    /// Iterates over the attached nodes and their placement, in no particular order.
    pub fn rendered(&self) -> impl Iterator<Item = (&K, &RenderedNode<C::Node>)> {
        self.cache.iter()
    }

    /// Replaces the whole sequence.
    ///
    /// Item identity is not assumed to survive a full replace: every rendered node goes back to
    /// the pool and every height is re-estimated.
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.destroyed {
            return;
        }
        self.items = items;
        self.cache.clear(&mut self.pool, &mut self.container);

        let (options, items) = (&self.options, &self.items);
        self.sizes
            .replace(items.len(), |i| options.estimate(&items[i], i));
        vdebug!(
            count = self.items.len(),
            total_height = self.sizes.total_height(),
            "Controller::set_items"
        );
        self.needs_reconcile = true;
        self.render();
    }

    /// Appends items at the end. Rendered rows keep their nodes.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = T>) {
        if self.destroyed {
            return;
        }
        let start = self.items.len();
        self.items.extend(items);
        let added = self.items.len() - start;
        if added == 0 {
            return;
        }

        let (options, items) = (&self.options, &self.items);
        let _height = self
            .sizes
            .append(added, |i| options.estimate(&items[i], i));
        vtrace!(added, height = _height, "Controller::append_items");
        self.needs_reconcile = true;
        self.render();
    }

    /// Inserts items in front of the sequence.
    ///
    /// Every existing row shifts down, so offsets are re-derived and the rendered cache is
    /// invalidated the same way a removal invalidates it.
    pub fn prepend_items(&mut self, items: impl IntoIterator<Item = T>) {
        if self.destroyed {
            return;
        }
        let mut fresh: Vec<T> = items.into_iter().collect();
        let added = fresh.len();
        if added == 0 {
            return;
        }
        fresh.append(&mut self.items);
        self.items = fresh;
        let _dropped = self.cache.clear(&mut self.pool, &mut self.container);

        let (options, items) = (&self.options, &self.items);
        let _height = self
            .sizes
            .prepend(added, |i| options.estimate(&items[i], i));
        vdebug!(
            added,
            height = _height,
            dropped = _dropped,
            "Controller::prepend_items"
        );
        self.needs_reconcile = true;
        self.render();
    }

    /// Removes the item at `index` and returns it.
    ///
    /// The whole rendered cache is invalidated. Out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        if self.destroyed || index >= self.items.len() {
            vdebug!(index, len = self.items.len(), "Controller::remove_item ignored");
            return None;
        }
        let item = self.items.remove(index);
        self.sizes.remove(index);
        let _dropped = self.cache.clear(&mut self.pool, &mut self.container);
        vdebug!(index, dropped = _dropped, "Controller::remove_item");
        self.needs_reconcile = true;
        self.render();
        Some(item)
    }

    /// Replaces the item at `index`, returning the previous one.
    ///
    /// Only that row is re-rendered; neighbors keep their nodes untouched. In dynamic mode an
    /// unmeasured row is re-estimated. Out-of-range indexes are ignored.
    pub fn update_item(&mut self, index: usize, item: T) -> Option<T> {
        if self.destroyed || index >= self.items.len() {
            vdebug!(index, len = self.items.len(), "Controller::update_item ignored");
            return None;
        }
        let prev = core::mem::replace(&mut self.items[index], item);
        let item = &self.items[index];
        if self.sizes.is_dynamic() {
            self.sizes
                .set_estimate(index, self.options.estimate(item, index));
        }
        let key = (self.options.get_item_key)(item, index);
        self.cache.mark_dirty(&key);
        self.needs_reconcile = true;
        self.render();
        Some(prev)
    }

    /// Reports the rendered height of a row (dynamic mode; ignored in fixed mode).
    pub fn measure_item(&mut self, index: usize, height: u32) {
        if self.destroyed {
            return;
        }
        if self.sizes.record_measured(index, height) != 0 {
            self.needs_reconcile = true;
            self.render();
        }
    }

    /// Reports several row heights at once, rendering a single time.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) {
        if self.destroyed {
            return;
        }
        let mut changed = false;
        for (index, height) in measurements {
            changed |= self.sizes.record_measured(index, height) != 0;
        }
        if changed {
            self.needs_reconcile = true;
            self.render();
        }
    }

    /// Asks the container to scroll row `index` (clamped to the last row) to the top.
    ///
    /// Returns the requested offset, or `None` for an empty or destroyed list. The window is
    /// updated by the scroll notification that follows, not by this call.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) -> Option<u64> {
        if self.destroyed || self.items.is_empty() {
            return None;
        }
        let index = index.min(self.items.len() - 1);
        let offset = self.sizes.offset_of(index);
        vtrace!(index, offset, "Controller::scroll_to_index");
        self.container.scroll_to(offset, behavior);
        Some(offset)
    }

    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior) -> Option<u64> {
        if self.destroyed {
            return None;
        }
        self.container.scroll_to(0, behavior);
        Some(0)
    }

    /// Asks the container to scroll so the last row ends at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) -> Option<u64> {
        if self.destroyed {
            return None;
        }
        let offset = self
            .sizes
            .total_height()
            .saturating_sub(self.viewport_size as u64);
        self.container.scroll_to(offset, behavior);
        Some(offset)
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange::from(self.window)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_items: self.items.len(),
            visible_items: self.window.len(),
            container_height: self.viewport_size,
            total_height: self.sizes.total_height(),
            scroll_top: self.scroll_offset,
            rendered_elements: self.cache.len(),
            pool_size: self.pool.len(),
        }
    }

    /// Handles a scroll notification from the container.
    ///
    /// The first notification of a burst requests a frame; the rest only refresh the scrolling
    /// state. The window is recomputed in [`Self::on_frame`].
    pub fn on_scroll(&mut self, now_ms: u64) {
        if self.destroyed || !self.container.is_connected() {
            return;
        }
        if self.scroll.on_scroll(now_ms) == Recompute::NextFrame {
            self.container.request_frame();
        }
    }

    /// Runs the coalesced recompute, reading the container's current scroll offset.
    pub fn on_frame(&mut self) {
        if self.destroyed {
            return;
        }
        let due = self.scroll.take_frame();
        if !due || !self.container.is_connected() {
            return;
        }
        self.scroll_offset = self.container.scroll_offset();
        vtrace!(scroll_offset = self.scroll_offset, "Controller::on_frame");
        self.render();
    }

    /// Handles a resize: remeasures the viewport and re-renders synchronously.
    pub fn on_resize(&mut self) {
        if self.destroyed || !self.container.is_connected() {
            return;
        }
        if self.scroll.on_resize() != Recompute::Now {
            return;
        }
        self.viewport_size = self.container.viewport_size();
        self.scroll_offset = self.container.scroll_offset();
        vtrace!(
            viewport_size = self.viewport_size,
            scroll_offset = self.scroll_offset,
            "Controller::on_resize"
        );
        self.render();
    }

    /// Advances the quiescence timer. Returns `true` when the list just became idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.destroyed {
            return false;
        }
        self.scroll.update(now_ms)
    }

    /// Unsubscribes from the container and releases every node, item and height.
    ///
    /// Pending coalesced work is cancelled. Calling this again is a no-op, and every other
    /// operation becomes a no-op afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.scroll.cancel();
        self.container.unsubscribe();

        self.cache.clear(&mut self.pool, &mut self.container);
        let container = &mut self.container;
        self.pool.drain(|node| container.discard(node));
        self.items.clear();
        self.sizes.clear();
        self.window = Window::Empty;
        self.needs_reconcile = false;
        vdebug!("Controller::destroy");
    }

    /// Recomputes the window and reconciles the cache when the window or the content changed.
    fn render(&mut self) {
        let window = compute_range(
            self.scroll_offset,
            self.viewport_size,
            self.options.config.overscan,
            &self.sizes,
        );
        if window == self.window && !self.needs_reconcile {
            return;
        }
        self.window = window;
        self.needs_reconcile = false;
        self.container.set_content_height(self.sizes.total_height());

        let items = &self.items;
        let get_key = &self.options.get_item_key;
        let renderer = &self.options.render_item;
        self.cache.reconcile(
            window,
            &self.sizes,
            &mut self.pool,
            &mut self.container,
            |i| get_key(&items[i], i),
            |surface, node, i| render_with(renderer, surface, node, &items[i], i),
        );
    }
}

fn render_with<T, S: Surface>(
    renderer: &ItemRenderer<T, S::Node>,
    surface: &mut S,
    node: &mut S::Node,
    item: &T,
    index: usize,
) {
    match renderer {
        ItemRenderer::Text(describe) => {
            let text = describe(item, index);
            surface.write_text(node, &text);
        }
        ItemRenderer::Custom(render) => render(node, item, index),
    }
}

impl<T, C: ScrollContainer, K> fmt::Debug for Controller<T, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("len", &self.items.len())
            .field("window", &self.window)
            .field("viewport_size", &self.viewport_size)
            .field("scroll_offset", &self.scroll_offset)
            .field("phase", &self.scroll.phase())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
