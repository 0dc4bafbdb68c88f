use crate::*;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use proptest::prelude::*;

/// An in-memory scroll container that records every request the controller makes.
#[derive(Debug)]
struct Feed {
    viewport: u32,
    offset: u64,
    connected: bool,
    subscribed: bool,
    content_height: u64,
    frames_requested: usize,
    scroll_requests: Vec<(u64, ScrollBehavior)>,
    next_id: u32,
    created: usize,
    attached: usize,
    discarded: usize,
    text_writes: usize,
}

impl Feed {
    fn new(viewport: u32) -> Self {
        Self {
            viewport,
            offset: 0,
            connected: true,
            subscribed: false,
            content_height: 0,
            frames_requested: 0,
            scroll_requests: Vec::new(),
            next_id: 0,
            created: 0,
            attached: 0,
            discarded: 0,
            text_writes: 0,
        }
    }
}

#[derive(Debug)]
struct Cell {
    id: u32,
    text: String,
    top: u64,
    height: u32,
    attached: bool,
}

impl Surface for Feed {
    type Node = Cell;

    fn create_node(&mut self) -> Cell {
        self.next_id += 1;
        self.created += 1;
        Cell {
            id: self.next_id,
            text: String::new(),
            top: 0,
            height: 0,
            attached: false,
        }
    }

    fn attach(&mut self, node: &mut Cell) {
        assert!(!node.attached, "cell {} attached twice", node.id);
        node.attached = true;
        self.attached += 1;
    }

    fn detach(&mut self, node: &mut Cell) {
        assert!(node.attached, "cell {} detached while not attached", node.id);
        node.attached = false;
        self.attached -= 1;
    }

    fn place(&mut self, node: &mut Cell, top: u64, height: u32) {
        node.top = top;
        node.height = height;
    }

    fn write_text(&mut self, node: &mut Cell, text: &str) {
        node.text.clear();
        node.text.push_str(text);
        self.text_writes += 1;
    }

    fn discard(&mut self, node: Cell) {
        assert!(!node.attached, "cell {} discarded while attached", node.id);
        self.discarded += 1;
    }
}

impl ScrollContainer for Feed {
    fn viewport_size(&self) -> u32 {
        self.viewport
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_to(&mut self, offset: u64, behavior: ScrollBehavior) {
        self.scroll_requests.push((offset, behavior));
    }

    fn set_content_height(&mut self, height: u64) {
        self.content_height = height;
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

fn feed_items(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item {i}")).collect()
}

fn list_with(config: ListConfig, count: usize) -> Controller<String, Feed> {
    let mut c = Controller::create(Feed::new(500), ListOptions::new(config));
    c.set_items(feed_items(count));
    c
}

fn feed_list(count: usize) -> Controller<String, Feed> {
    list_with(ListConfig::default(), count)
}

fn scroll_and_frame<T>(c: &mut Controller<T, Feed>, offset: u64, now_ms: u64) {
    c.container_mut().offset = offset;
    c.on_scroll(now_ms);
    c.on_frame();
}

fn text_at<T, K: ListKey>(c: &Controller<T, Feed, K>, index: usize) -> Option<&str> {
    c.rendered()
        .find(|(_, row)| row.index == index)
        .map(|(_, row)| row.node.text.as_str())
}

/// Cell id by row index, to detect which rows kept their node.
fn cell_ids<T, K: ListKey>(c: &Controller<T, Feed, K>) -> BTreeMap<usize, u32> {
    c.rendered().map(|(_, row)| (row.index, row.node.id)).collect()
}

fn assert_in_sync(c: &Controller<String, Feed>) {
    let stats = c.stats();
    let range = c.visible_range();
    let sizes = c.size_model();

    assert_eq!(stats.rendered_elements, range.count);
    assert_eq!(c.container().attached, stats.rendered_elements);
    assert_eq!(c.container().content_height, sizes.total_height());
    assert!(stats.pool_size <= c.options().config.pool_capacity);

    for (_, row) in c.rendered() {
        assert!(range.start <= row.index && row.index <= range.end);
        assert_eq!(row.top, sizes.offset_of(row.index));
        assert_eq!(row.node.top, row.top);
        assert_eq!(row.node.height, sizes.height_of(row.index));
        assert_eq!(row.node.text, c.items()[row.index]);
    }
}

#[test]
fn create_subscribes_and_renders_the_first_window() {
    let c = feed_list(1000);

    assert!(c.container().subscribed);
    assert_eq!(
        c.visible_range(),
        VisibleRange {
            start: 0,
            end: 15,
            count: 16
        }
    );
    let stats = c.stats();
    assert_eq!(stats.total_items, 1000);
    assert_eq!(stats.rendered_elements, 16);
    assert_eq!(stats.total_height, 50_000);
    assert_eq!(stats.container_height, 500);
    assert_eq!(c.container().content_height, 50_000);
    assert_eq!(text_at(&c, 0), Some("item 0"));
    assert_eq!(text_at(&c, 15), Some("item 15"));
    assert_in_sync(&c);
}

#[test]
fn empty_list_renders_nothing() {
    let c = feed_list(0);
    assert_eq!(c.visible_range(), VisibleRange::default());
    assert_eq!(c.stats().rendered_elements, 0);
    assert_eq!(c.container().content_height, 0);
}

#[test]
fn scroll_frame_moves_the_window_and_recycles_rows() {
    let mut c = feed_list(1000);

    scroll_and_frame(&mut c, 1000, 0);

    assert_eq!(
        c.visible_range(),
        VisibleRange {
            start: 15,
            end: 35,
            count: 21
        }
    );
    let stats = c.stats();
    assert_eq!(stats.scroll_top, 1000);
    assert_eq!(stats.rendered_elements, 21);
    // 15 rows left the window and were reused; only 5 nodes had to be created.
    assert_eq!(stats.pool_size, 0);
    assert_eq!(c.container().created, 21);
    assert_eq!(text_at(&c, 35), Some("item 35"));
    assert_in_sync(&c);
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let mut c = feed_list(1000);

    for (i, offset) in [100u64, 400, 900, 2000].into_iter().enumerate() {
        c.container_mut().offset = offset;
        c.on_scroll(i as u64);
    }
    assert_eq!(c.container().frames_requested, 1);
    // Nothing moves until the frame runs.
    assert_eq!(c.visible_range().start, 0);

    c.on_frame();
    assert_eq!(c.visible_range().start, 35);
    assert_eq!(c.stats().scroll_top, 2000);

    // A second frame without a new notification does nothing.
    let writes = c.container().text_writes;
    c.container_mut().offset = 4000;
    c.on_frame();
    assert_eq!(c.container().text_writes, writes);
    assert_eq!(c.visible_range().start, 35);

    c.on_scroll(10);
    assert_eq!(c.container().frames_requested, 2);
}

#[test]
fn scrolling_state_resets_after_a_quiet_period() {
    let mut c = feed_list(100);
    assert_eq!(c.scroll_phase(), ScrollPhase::Idle);
    assert_eq!(c.idle_deadline(), None);

    c.on_scroll(100);
    assert!(c.is_scrolling());
    assert_eq!(c.idle_deadline(), Some(250));
    assert!(!c.tick(249));

    c.on_scroll(200);
    assert!(!c.tick(300));
    assert!(c.is_scrolling());

    assert!(c.tick(350));
    assert_eq!(c.scroll_phase(), ScrollPhase::Idle);
    assert!(!c.tick(1000));
}

#[test]
fn resize_recomputes_synchronously() {
    let mut c = feed_list(1000);

    c.container_mut().viewport = 1000;
    c.on_resize();

    assert_eq!(c.container().frames_requested, 0);
    assert_eq!(
        c.visible_range(),
        VisibleRange {
            start: 0,
            end: 25,
            count: 26
        }
    );
    assert_eq!(c.stats().container_height, 1000);
    assert_in_sync(&c);
}

#[test]
fn remove_item_invalidates_the_cache_and_shifts_rows() {
    let mut c = feed_list(1000);
    let writes = c.container().text_writes;

    let removed = c.remove_item(10);

    assert_eq!(removed.as_deref(), Some("item 10"));
    assert_eq!(c.len(), 999);
    assert_eq!(c.stats().total_height, 999 * 50);
    // Every visible row is rendered again.
    assert_eq!(c.container().text_writes, writes + 16);
    assert_eq!(c.stats().rendered_elements, 16);
    assert_eq!(text_at(&c, 10), Some("item 11"));
    assert_eq!(text_at(&c, 15), Some("item 16"));
    assert_in_sync(&c);
}

#[test]
fn removing_the_first_of_ten_rerenders_every_row() {
    let mut c = feed_list(10);
    let created = c.container().created;
    let writes = c.container().text_writes;

    c.remove_item(0);

    let stats = c.stats();
    assert_eq!(stats.total_items, 9);
    assert_eq!(stats.rendered_elements, 9);
    // Nodes came back from the pool, all of them rendered again.
    assert_eq!(c.container().created, created);
    assert_eq!(c.container().text_writes, writes + 9);
    assert_eq!(text_at(&c, 0), Some("item 1"));
    assert_in_sync(&c);
}

#[test]
fn append_grows_total_height_by_the_added_estimates() {
    let options = ListOptions::new(ListConfig::default().with_dynamic_height(true))
        .with_estimate_height(|item: &String, _| item.len() as u32 * 10);
    let mut c = Controller::create(Feed::new(500), options);
    c.set_items(feed_items(5));
    let before = c.stats().total_height;

    c.append_items([String::from("ab"), String::from("abcd")]);

    assert_eq!(c.stats().total_height, before + 20 + 40);
    assert_eq!(c.container().content_height, before + 60);
}

#[test]
fn update_item_rerenders_only_that_row() {
    let mut c = feed_list(1000);
    let writes = c.container().text_writes;
    let ids = cell_ids(&c);

    let prev = c.update_item(3, String::from("edited"));

    assert_eq!(prev.as_deref(), Some("item 3"));
    assert_eq!(c.container().text_writes, writes + 1);
    assert_eq!(text_at(&c, 3), Some("edited"));
    assert_eq!(text_at(&c, 4), Some("item 4"));
    assert_eq!(cell_ids(&c), ids);
    assert_in_sync(&c);
}

#[test]
fn invalid_indexes_are_ignored() {
    let mut c = feed_list(10);
    let writes = c.container().text_writes;

    assert_eq!(c.remove_item(10), None);
    assert_eq!(c.update_item(99, String::from("nope")), None);
    c.measure_item(42, 300);

    assert_eq!(c.len(), 10);
    assert_eq!(c.container().text_writes, writes);
    assert_in_sync(&c);
}

#[test]
fn append_keeps_rendered_rows() {
    let mut c = feed_list(100);
    let writes = c.container().text_writes;
    let ids = cell_ids(&c);

    c.append_items((0..10).map(|i| format!("more {i}")));

    assert_eq!(c.len(), 110);
    assert_eq!(c.container().content_height, 110 * 50);
    assert_eq!(c.container().text_writes, writes);
    assert_eq!(cell_ids(&c), ids);

    c.append_items(core::iter::empty());
    assert_eq!(c.len(), 110);
}

#[test]
fn prepend_shifts_existing_rows_down() {
    let mut c = feed_list(100);

    c.prepend_items((0..5).map(|i| format!("new {i}")));

    assert_eq!(c.len(), 105);
    assert_eq!(c.stats().total_height, 105 * 50);
    assert_eq!(text_at(&c, 0), Some("new 0"));
    assert_eq!(text_at(&c, 5), Some("item 0"));
    assert_in_sync(&c);
}

#[test]
fn set_items_replaces_everything() {
    let mut c = feed_list(1000);
    scroll_and_frame(&mut c, 1000, 0);

    c.set_items(feed_items(3));

    assert_eq!(c.len(), 3);
    // Scroll offset 1000 is past the end: the window collapses onto the last row.
    assert_eq!(
        c.visible_range(),
        VisibleRange {
            start: 2,
            end: 2,
            count: 1
        }
    );
    assert_in_sync(&c);
}

#[test]
fn scroll_to_index_requests_the_row_offset() {
    let mut c = feed_list(1000);

    assert_eq!(c.scroll_to_index(100, ScrollBehavior::Smooth), Some(5000));
    assert_eq!(
        c.container().scroll_requests.last(),
        Some(&(5000, ScrollBehavior::Smooth))
    );
    // The window follows the container's scroll notification, not the request.
    assert_eq!(c.visible_range().start, 0);

    assert_eq!(c.scroll_to_index(5000, ScrollBehavior::Auto), Some(999 * 50));
    assert_eq!(c.scroll_to_top(ScrollBehavior::Instant), Some(0));
    assert_eq!(c.scroll_to_bottom(ScrollBehavior::Auto), Some(50_000 - 500));
    assert_eq!(c.container().scroll_requests.len(), 4);

    let mut empty = feed_list(0);
    assert_eq!(empty.scroll_to_index(3, ScrollBehavior::Auto), None);
    assert!(empty.container().scroll_requests.is_empty());
    assert_eq!(empty.scroll_to_bottom(ScrollBehavior::Auto), Some(0));
}

#[test]
fn dynamic_measurement_moves_following_rows() {
    let config = ListConfig::default().with_dynamic_height(true);
    let mut c = list_with(config, 100);
    assert_eq!(c.stats().total_height, 5000);

    c.measure_item(0, 120);

    assert_eq!(c.stats().total_height, 5070);
    assert_eq!(c.container().content_height, 5070);
    let row = c
        .rendered()
        .find(|(_, row)| row.index == 1)
        .map(|(_, row)| row.top);
    assert_eq!(row, Some(120));
    assert_in_sync(&c);

    let writes = c.container().text_writes;
    c.measure_many([(2, 80), (3, 80), (4, 50)]);
    assert_eq!(c.stats().total_height, 5130);
    // Re-placing rows does not re-render them.
    assert_eq!(c.container().text_writes, writes);
    assert_in_sync(&c);
}

#[test]
fn fixed_mode_ignores_measurements() {
    let mut c = feed_list(100);
    c.measure_item(0, 500);
    assert_eq!(c.stats().total_height, 5000);
}

#[test]
fn estimate_callback_feeds_unmeasured_rows() {
    let options = ListOptions::new(ListConfig::default().with_dynamic_height(true))
        .with_estimate_height(|item: &String, _| if item.ends_with('0') { 100 } else { 50 });
    let mut c = Controller::create(Feed::new(500), options);
    c.set_items(feed_items(10));
    assert_eq!(c.stats().total_height, 100 + 9 * 50);

    c.update_item(1, String::from("x0"));
    assert_eq!(c.stats().total_height, 600);

    // Measured rows keep their measurement across updates.
    c.measure_item(1, 70);
    c.update_item(1, String::from("y"));
    assert_eq!(c.stats().total_height, 570);
}

#[test]
fn custom_renderer_receives_item_and_index() {
    let options =
        ListOptions::new_with_renderer(ListConfig::default(), |cell: &mut Cell, n: &u32, i| {
            cell.text = format!("#{i}: {}", n * 2);
        });
    let mut c = Controller::create(Feed::new(500), options);
    c.set_items((0..50).collect());

    assert_eq!(text_at(&c, 7), Some("#7: 14"));
    assert_eq!(c.container().text_writes, 0);
}

#[test]
fn keyed_rows_follow_their_key() {
    let options =
        ListOptions::new(ListConfig::default()).with_item_key(|item: &String, _| item.clone());
    let mut c = Controller::create(Feed::new(500), options);
    c.set_items(feed_items(100));
    let writes = c.container().text_writes;

    c.update_item(2, String::from("fresh"));

    assert_eq!(c.stats().rendered_elements, 16);
    assert_eq!(text_at(&c, 2), Some("fresh"));
    assert_eq!(c.container().text_writes, writes + 1);
    assert_eq!(c.container().attached, 16);
}

#[test]
fn pool_stays_within_capacity() {
    let mut c = list_with(ListConfig::default().with_pool_capacity(3), 1000);

    scroll_and_frame(&mut c, 10_000, 0);

    // 16 rows left the window: 3 were pooled (then reused), 13 were freed.
    assert_eq!(c.container().discarded, 13);
    assert_eq!(c.stats().pool_size, 0);
    assert_eq!(c.stats().rendered_elements, 21);

    scroll_and_frame(&mut c, 20_000, 1);
    assert!(c.stats().pool_size <= 3);
    assert_in_sync(&c);
}

#[test]
fn destroy_releases_everything_and_is_idempotent() {
    let mut c = feed_list(1000);
    c.on_scroll(0);
    assert_eq!(c.container().frames_requested, 1);

    c.destroy();

    assert!(c.is_destroyed());
    assert!(!c.container().subscribed);
    assert_eq!(c.container().attached, 0);
    assert_eq!(c.container().discarded, c.container().created);
    assert_eq!(
        c.stats(),
        Stats {
            container_height: 500,
            ..Stats::default()
        }
    );

    c.destroy();
    let writes = c.container().text_writes;

    // The pending frame was cancelled and nothing renders afterwards.
    c.on_frame();
    c.on_scroll(10);
    c.on_resize();
    c.set_items(feed_items(10));
    c.append_items(feed_items(10));
    assert_eq!(c.remove_item(0), None);
    assert_eq!(c.scroll_to_index(0, ScrollBehavior::Auto), None);
    assert!(!c.tick(10_000));

    assert_eq!(c.container().frames_requested, 1);
    assert_eq!(c.container().text_writes, writes);
    assert!(c.is_empty());
}

#[test]
fn disconnected_container_ignores_notifications() {
    let mut c = feed_list(1000);
    c.container_mut().connected = false;

    c.container_mut().offset = 1000;
    c.on_scroll(0);
    c.on_frame();
    c.container_mut().viewport = 1000;
    c.on_resize();

    assert_eq!(c.container().frames_requested, 0);
    assert!(!c.is_scrolling());
    assert_eq!(c.visible_range().end, 15);

    c.container_mut().connected = true;
    c.on_scroll(1);
    c.on_frame();
    assert_eq!(c.visible_range().start, 15);
}

#[test]
fn coordinator_skips_while_a_frame_is_pending() {
    let mut s = ScrollCoordinator::default();
    assert_eq!(s.reset_delay_ms(), 150);

    assert_eq!(s.on_scroll(0), Recompute::NextFrame);
    assert_eq!(s.on_scroll(5), Recompute::Skip);
    assert!(s.is_frame_pending());
    assert_eq!(s.on_resize(), Recompute::Now);

    assert!(s.take_frame());
    assert!(!s.take_frame());

    s.cancel();
    assert_eq!(s.on_scroll(10), Recompute::Skip);
    assert_eq!(s.on_resize(), Recompute::Skip);
    assert!(!s.is_scrolling());
}

proptest! {
    #[test]
    fn controller_keeps_rendered_rows_in_sync(
        count in 0usize..300,
        ops in proptest::collection::vec((0u8..6, 0u32..20_000, 1u32..200), 1..40),
    ) {
        let config = ListConfig::default()
            .with_dynamic_height(true)
            .with_pool_capacity(8);
        let mut c = list_with(config, count);

        for (now, (op, a, b)) in ops.into_iter().enumerate() {
            let index = a as usize % (c.len() + 1);
            match op {
                0 => scroll_and_frame(&mut c, a as u64, now as u64),
                1 => c.append_items((0..b % 5).map(|i| format!("more {i}"))),
                2 => {
                    c.remove_item(index);
                }
                3 => {
                    c.update_item(index, format!("edit {a}"));
                }
                4 => c.measure_item(index, b),
                _ => c.prepend_items((0..b % 3).map(|i| format!("head {i}"))),
            }
            assert_in_sync(&c);
        }
    }
}
