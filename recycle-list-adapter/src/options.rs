use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use recycle_list::{ItemKey, ListConfig};

/// Renders an item into a (possibly reused) node.
///
/// The callback must overwrite everything item-specific on the node: reused nodes still carry
/// the previous item's content.
pub type RenderItemFn<T, N> = Arc<dyn Fn(&mut N, &T, usize) + Send + Sync>;

/// Produces the text the default renderer writes into a node.
pub type DescribeItemFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Estimates an item's height before it is measured (dynamic mode only).
pub type EstimateHeightFn<T> = Arc<dyn Fn(&T, usize) -> u32 + Send + Sync>;

/// Maps an item to its identity key.
pub type ItemKeyFn<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;

/// How item content gets into a node.
pub enum ItemRenderer<T, N> {
    /// Write the item's text via `Surface::write_text`.
    Text(DescribeItemFn<T>),
    /// Caller-owned rendering.
    Custom(RenderItemFn<T, N>),
}

impl<T, N> Clone for ItemRenderer<T, N> {
    fn clone(&self) -> Self {
        match self {
            Self::Text(f) => Self::Text(Arc::clone(f)),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<T, N> fmt::Debug for ItemRenderer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Text(..)"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Configuration plus callbacks for a [`crate::Controller`].
///
/// Callbacks are stored in `Arc`s so options stay cheap to clone.
pub struct ListOptions<T, N, K = ItemKey> {
    pub config: ListConfig,
    /// Used in dynamic mode for rows that have not been measured. Defaults to
    /// `config.item_height`.
    pub estimate_height: Option<EstimateHeightFn<T>>,
    pub render_item: ItemRenderer<T, N>,
    pub get_item_key: ItemKeyFn<T, K>,
}

impl<T, N, K> Clone for ListOptions<T, N, K> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            estimate_height: self.estimate_height.clone(),
            render_item: self.render_item.clone(),
            get_item_key: Arc::clone(&self.get_item_key),
        }
    }
}

impl<T: fmt::Display + 'static, N> ListOptions<T, N, ItemKey> {
    /// Options keyed by index that render each item's `Display` text.
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            estimate_height: None,
            render_item: ItemRenderer::Text(Arc::new(display_text::<T>)),
            get_item_key: Arc::new(index_key::<T>),
        }
    }
}

impl<T: 'static, N> ListOptions<T, N, ItemKey> {
    /// Options keyed by index with a custom renderer; `T` need not implement `Display`.
    pub fn new_with_renderer(
        config: ListConfig,
        render_item: impl Fn(&mut N, &T, usize) + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            estimate_height: None,
            render_item: ItemRenderer::Custom(Arc::new(render_item)),
            get_item_key: Arc::new(index_key::<T>),
        }
    }
}

impl<T, N, K> ListOptions<T, N, K> {
    /// Replaces the key mapping.
    ///
    /// Keys must be unique within the list and stable for an item across renders.
    pub fn with_item_key<K2>(
        self,
        get_item_key: impl Fn(&T, usize) -> K2 + Send + Sync + 'static,
    ) -> ListOptions<T, N, K2> {
        ListOptions {
            config: self.config,
            estimate_height: self.estimate_height,
            render_item: self.render_item,
            get_item_key: Arc::new(get_item_key),
        }
    }

    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.config.item_height = item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.config.overscan = overscan;
        self
    }

    pub fn with_dynamic_height(mut self, dynamic_height: bool) -> Self {
        self.config.dynamic_height = dynamic_height;
        self
    }

    pub fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.config.pool_capacity = pool_capacity;
        self
    }

    pub fn with_estimate_height(
        mut self,
        estimate_height: impl Fn(&T, usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_height = Some(Arc::new(estimate_height));
        self
    }

    pub fn with_render_item(
        mut self,
        render_item: impl Fn(&mut N, &T, usize) + Send + Sync + 'static,
    ) -> Self {
        self.render_item = ItemRenderer::Custom(Arc::new(render_item));
        self
    }

    pub fn with_text(
        mut self,
        describe: impl Fn(&T, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render_item = ItemRenderer::Text(Arc::new(describe));
        self
    }

    pub(crate) fn estimate(&self, item: &T, index: usize) -> u32 {
        match &self.estimate_height {
            Some(f) => f(item, index),
            None => self.config.item_height,
        }
    }
}

fn index_key<T>(_: &T, index: usize) -> ItemKey {
    index as ItemKey
}

fn display_text<T: fmt::Display>(item: &T, _: usize) -> String {
    item.to_string()
}

impl<T, N, K> fmt::Debug for ListOptions<T, N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("config", &self.config)
            .field("estimate_height", &self.estimate_height.is_some())
            .field("render_item", &self.render_item)
            .finish_non_exhaustive()
    }
}
